//! Fuel-aware route planning HTTP service.
//!
//! # Configuration
//!
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `FUEL_EFFICIENCY` - fuel per unit distance when a request omits it (default: 0.5)
//! - `FUELROUTE_GRAPH_PATH` - graph used when a request omits `graph` (optional)
//! - `RUST_LOG` - log level (default: info)
//! - `LOG_FORMAT` - json (default) or text
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus endpoint (default: enabled, /metrics)

use std::net::SocketAddr;

use tracing::{error, info};

use fuelroute_service_route::router;
use fuelroute_service_shared::{
    AppState, LoggingConfig, MetricsConfig, ServiceConfig, init_logging, init_metrics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("route");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env().inspect_err(|e| {
        error!(error = %e, "invalid service configuration");
    })?;
    let port = config.port;

    info!(
        port,
        default_fuel_efficiency = config.default_fuel_efficiency,
        graph_path = ?config.graph_path,
        "starting route service"
    );

    let state = AppState::load(config).inspect_err(|e| {
        error!(error = %e, "failed to load application state");
    })?;

    let app = router(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
