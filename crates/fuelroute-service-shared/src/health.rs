//! Liveness and readiness checks.
//!
//! Readiness additionally describes the default graph so operators can see
//! which graph requests without a `graph` field will be routed on.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Ok,
    NotReady,
}

/// Body returned by both health endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: HealthState,
    pub service: String,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_nodes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_edges: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_fuel_efficiency: Option<f64>,
}

impl HealthStatus {
    fn live(state: &AppState) -> Self {
        Self {
            status: HealthState::Ok,
            service: state.service_name().to_string(),
            version: env!("CARGO_PKG_VERSION"),
            reason: None,
            graph_nodes: None,
            graph_edges: None,
            default_fuel_efficiency: None,
        }
    }

    /// A configured but empty default graph would fail every request that
    /// relies on it, so it makes the service not ready.
    fn ready(state: &AppState) -> Self {
        let graph = state.default_graph();
        let empty_default = graph.is_some_and(|graph| graph.is_empty());
        Self {
            status: if empty_default {
                HealthState::NotReady
            } else {
                HealthState::Ok
            },
            reason: empty_default.then_some("default graph has no nodes"),
            graph_nodes: graph.map(|graph| graph.node_count()),
            graph_edges: graph.map(|graph| graph.edge_count()),
            default_fuel_efficiency: Some(state.default_fuel_efficiency()),
            ..Self::live(state)
        }
    }

    fn status_code(&self) -> StatusCode {
        match self.status {
            HealthState::Ok => StatusCode::OK,
            HealthState::NotReady => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// `GET /health/live`
pub async fn health_live(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    (StatusCode::OK, Json(HealthStatus::live(&state)))
}

/// `GET /health/ready`
pub async fn health_ready(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let status = HealthStatus::ready(&state);
    (status.status_code(), Json(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceConfig;
    use fuelroute_lib::{AdjacencyMap, Graph};

    fn state_with(graph: Option<Graph>) -> AppState {
        AppState::from_components(ServiceConfig::default(), graph)
    }

    #[test]
    fn test_live_omits_graph_details() {
        let json = serde_json::to_value(HealthStatus::live(&state_with(None))).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "route");
        assert!(json.get("graph_nodes").is_none());
        assert!(json.get("reason").is_none());
    }

    #[test]
    fn test_ready_without_default_graph() {
        let status = HealthStatus::ready(&state_with(None));

        assert_eq!(status.status_code(), StatusCode::OK);
        assert_eq!(status.graph_nodes, None);
        assert_eq!(status.default_fuel_efficiency, Some(0.5));
    }

    #[test]
    fn test_ready_describes_default_graph() {
        let adjacency: AdjacencyMap =
            serde_json::from_str(r#"{"A": {"B": 4}, "B": {"C": 4}}"#).unwrap();
        let graph = Graph::from_adjacency(&adjacency).unwrap();
        let status = HealthStatus::ready(&state_with(Some(graph)));

        assert_eq!(status.status, HealthState::Ok);
        assert_eq!(status.graph_nodes, Some(3));
        assert_eq!(status.graph_edges, Some(2));
    }

    #[tokio::test]
    async fn test_ready_fails_on_empty_default_graph() {
        let (code, Json(status)) = health_ready(State(state_with(Some(Graph::default())))).await;

        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status.status, HealthState::NotReady);
        assert_eq!(status.reason, Some("default graph has no nodes"));
    }
}
