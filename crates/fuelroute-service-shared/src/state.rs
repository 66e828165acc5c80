//! Application state for the HTTP service.
//!
//! Holds the service configuration and, when `FUELROUTE_GRAPH_PATH` is set, a
//! graph loaded once at startup for requests that do not carry their own.

use std::sync::Arc;

use fuelroute_lib::{load_graph, Error as LibError, Graph};
use thiserror::Error;

use crate::config::ServiceConfig;

/// Error during application state initialization.
#[derive(Debug, Error)]
pub enum AppStateError {
    #[error("graph file not found: {0}")]
    GraphNotFound(String),

    #[error("failed to load graph: {0}")]
    GraphLoad(#[from] LibError),
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone; share it through axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{extract::State, routing::post, Router};
/// use fuelroute_service_shared::{AppState, ServiceConfig};
///
/// async fn handler(State(state): State<AppState>) {
///     let efficiency = state.default_fuel_efficiency();
/// }
///
/// let state = AppState::load(ServiceConfig::default()).unwrap();
/// let app = Router::new()
///     .route("/api/v1/route", post(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServiceConfig,
    default_graph: Option<Graph>,
}

impl AppState {
    /// Build state from `config`, loading the configured graph if any.
    pub fn load(config: ServiceConfig) -> Result<Self, AppStateError> {
        let default_graph = match &config.graph_path {
            Some(path) if !path.exists() => {
                return Err(AppStateError::GraphNotFound(path.display().to_string()));
            }
            Some(path) => {
                tracing::info!(path = %path.display(), "loading default graph");
                Some(load_graph(path)?)
            }
            None => {
                tracing::info!("no default graph configured, requests must supply one");
                None
            }
        };

        Ok(Self::from_components(config, default_graph))
    }

    /// Create application state from pre-built components.
    pub fn from_components(config: ServiceConfig, default_graph: Option<Graph>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                default_graph,
            }),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    /// Graph used when a request omits `graph`.
    pub fn default_graph(&self) -> Option<&Graph> {
        self.inner.default_graph.as_ref()
    }

    pub fn default_fuel_efficiency(&self) -> f64 {
        self.inner.config.default_fuel_efficiency
    }

    pub fn service_name(&self) -> &str {
        &self.inner.config.service_name
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.inner.config.service_name)
            .field(
                "default_graph_nodes",
                &self.inner.default_graph.as_ref().map(Graph::node_count),
            )
            .field(
                "default_fuel_efficiency",
                &self.inner.config.default_fuel_efficiency,
            )
            .finish()
    }
}
