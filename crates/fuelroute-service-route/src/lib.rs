//! Fuel-aware route planning over HTTP.
//!
//! # Endpoints
//!
//! - `POST /api/v1/route` - plan a route on the supplied (or default) graph
//! - `POST /submit-nodes` - same handler under the legacy path
//! - `GET /metrics` - Prometheus metrics endpoint (path configurable)
//! - `GET /health/live` - liveness check
//! - `GET /health/ready` - readiness check

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use fuelroute_lib::{
    Error as LibError, Graph, HopProjection, RouteOutcome, RouteStrategy, plan_route,
};
use fuelroute_service_shared::{
    AppState, ErrorResponse, MetricsLayer, ProblemDetails, RequestId, RouteRequest,
    ServiceResponse, Validate, from_lib_error, health_live, health_ready, metrics_handler,
    record_refuel_stops, record_route_calculated, record_route_failed, record_route_hops,
};

/// Route payload returned on success.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Ordered node names from start to destination.
    pub path: Vec<String>,
    pub distance: f64,
    /// Refuelling stops taken.
    pub stops: usize,
    pub strategy: RouteStrategy,
    /// Shortest distance ignoring fuel.
    pub plain_distance: f64,
    /// Per-hop fuel bookkeeping; omitted when no tank capacity was given.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hops: Vec<HopProjection>,
}

/// Build the service router.
pub fn router(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/api/v1/route", post(route_handler))
        .route("/submit-nodes", post(route_handler))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(CorsLayer::permissive())
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle `POST /api/v1/route` and `POST /submit-nodes`.
pub async fn route_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Response {
    let service = state.service_name();
    let request_id = request_id.as_str();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(request_id, error = %rejection.body_text(), "rejected route request body");
            record_route_failed("validation_error", service);
            return ProblemDetails::bad_request(rejection.body_text(), request_id).into_response();
        }
    };

    info!(
        request_id,
        from = %request.from,
        to = %request.to,
        fuel_capacity = ?request.fuel_capacity,
        "handling route request"
    );

    if let Err(problem) = request.validate(request_id) {
        record_route_failed("validation_error", service);
        return problem.into_response();
    }

    let graph = match resolve_graph(&state, &request, request_id) {
        Ok(graph) => graph,
        Err(problem) => {
            record_route_failed("invalid_graph", service);
            return problem.into_response();
        }
    };

    let lib_request = request.to_lib_request(state.default_fuel_efficiency());
    let outcome = match plan_route(&graph, &lib_request) {
        Ok(outcome) => outcome,
        Err(error) => {
            let reason = match &error {
                LibError::NodeNotFound { .. } => "unknown_node",
                other if other.is_input_fault() => "validation_error",
                _ => "internal_error",
            };
            warn!(request_id, error = %error, "route planning rejected");
            record_route_failed(reason, service);
            return from_lib_error(&error, request_id).into_response();
        }
    };

    match outcome {
        RouteOutcome::Routed(plan) => {
            let strategy = plan.strategy.to_string();
            record_route_calculated(&strategy, service);
            record_route_hops(plan.hop_count(), &strategy);
            record_refuel_stops(plan.stops);
            info!(
                request_id,
                strategy = %strategy,
                distance = plan.distance,
                stops = plan.stops,
                "route computed"
            );

            ServiceResponse::new(RouteResponse {
                path: plan.steps,
                distance: plan.distance,
                stops: plan.stops,
                strategy: plan.strategy,
                plain_distance: plan.plain_distance,
                hops: plan.hops,
            })
            .into_response()
        }
        RouteOutcome::Unreachable { start, goal } => {
            info!(request_id, "destination unreachable");
            record_route_failed("no_path", service);
            ProblemDetails::route_not_found(&start, &goal, request_id).into_response()
        }
        RouteOutcome::InsufficientFuel { .. } => {
            info!(request_id, "no refuelling schedule reaches the destination");
            record_route_failed("insufficient_fuel", service);
            ErrorResponse::insufficient_fuel().into_response()
        }
    }
}

/// The request's own graph, else the configured default.
fn resolve_graph(
    state: &AppState,
    request: &RouteRequest,
    request_id: &str,
) -> Result<Graph, Box<ProblemDetails>> {
    match (&request.graph, state.default_graph()) {
        (Some(adjacency), _) => Graph::from_adjacency(adjacency)
            .map_err(|error| Box::new(from_lib_error(&error, request_id))),
        (None, Some(graph)) => Ok(graph.clone()),
        (None, None) => Err(Box::new(ProblemDetails::bad_request(
            "The 'graph' field is required: no default graph is configured",
            request_id,
        ))),
    }
}
