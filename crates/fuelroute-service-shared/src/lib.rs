//! Shared infrastructure for the fuelroute HTTP service.
//!
//! - [`AppState`]: service configuration plus an optional pre-loaded graph
//! - [`ServiceConfig`]: environment-driven settings
//! - [`health`]: liveness/readiness handlers
//! - [`ProblemDetails`]: RFC 9457 error responses
//! - [`ServiceResponse`] / [`ErrorResponse`]: `status`-tagged response envelopes
//! - [`metrics`]: Prometheus recorder and business metrics
//! - [`logging`]: JSON or text tracing setup
//! - [`middleware`]: request IDs and HTTP metrics
//! - [`RouteRequest`]: route request body with validation
//!
//! # Architecture
//!
//! Handlers stay thin; all routing logic lives in `fuelroute-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON                                       │
//! │  - Validate parameters                                      │
//! │  - Call fuelroute_lib::plan_route                           │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! Enable the `test-utils` feature to use [`test_utils`] from dependent crates.

#![deny(warnings)]

pub mod config;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig};
pub use health::{health_live, health_ready, HealthStatus, HealthState};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_refuel_stops, record_route_calculated,
    record_route_failed, record_route_hops, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{from_lib_error, ProblemDetails, ProblemKind};
pub use request::{RouteRequest, Validate};
pub use response::{ErrorResponse, ResponseStatus, ServiceResponse, INSUFFICIENT_FUEL_MESSAGE};
pub use state::{AppState, AppStateError};
