//! RFC 9457 problem responses for route requests.
//!
//! Every failure the service reports, apart from the legacy insufficient-fuel
//! envelope in [`crate::response`], is one of the [`ProblemKind`]s below.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use fuelroute_lib::Error as LibError;

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// The failure categories a route request can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    /// Malformed body, missing graph or out-of-range fuel input.
    InvalidRequest,
    /// Start or destination is not a node of the graph.
    UnknownNode,
    /// No path exists from start to destination.
    RouteNotFound,
    /// A path exists but the tank and stock cannot cover it.
    InsufficientFuel,
    Internal,
}

impl ProblemKind {
    pub fn type_uri(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => "/problems/invalid-request",
            ProblemKind::UnknownNode => "/problems/unknown-node",
            ProblemKind::RouteNotFound => "/problems/route-not-found",
            ProblemKind::InsufficientFuel => "/problems/insufficient-fuel",
            ProblemKind::Internal => "/problems/internal-error",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => "Invalid Request",
            ProblemKind::UnknownNode => "Unknown Node",
            ProblemKind::RouteNotFound => "Route Not Found",
            ProblemKind::InsufficientFuel => "Insufficient Fuel",
            ProblemKind::Internal => "Internal Error",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ProblemKind::InvalidRequest | ProblemKind::InsufficientFuel => StatusCode::BAD_REQUEST,
            ProblemKind::UnknownNode | ProblemKind::RouteNotFound => StatusCode::NOT_FOUND,
            ProblemKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Problem body; `instance` carries the request ID.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_uri: &'static str,
    pub title: &'static str,
    pub status: u16,
    pub detail: String,
    pub instance: String,
    #[serde(skip)]
    pub kind: ProblemKind,
}

impl ProblemDetails {
    pub fn new(kind: ProblemKind, detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            type_uri: kind.type_uri(),
            title: kind.title(),
            status: kind.status().as_u16(),
            detail: detail.into(),
            instance: request_id.into(),
            kind,
        }
    }

    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(ProblemKind::InvalidRequest, detail, request_id)
    }

    pub fn unknown_node(name: &str, suggestions: &[String], request_id: impl Into<String>) -> Self {
        let detail = match suggestions {
            [] => format!("Node '{name}' not found"),
            _ => format!(
                "Node '{name}' not found. Did you mean: {}?",
                suggestions.join(", ")
            ),
        };
        Self::new(ProblemKind::UnknownNode, detail, request_id)
    }

    pub fn route_not_found(start: &str, goal: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            ProblemKind::RouteNotFound,
            format!("No route exists from '{start}' to '{goal}'"),
            request_id,
        )
    }

    pub fn insufficient_fuel(start: &str, goal: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            ProblemKind::InsufficientFuel,
            format!("Not enough fuel to travel from '{start}' to '{goal}'"),
            request_id,
        )
    }

    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(ProblemKind::Internal, detail, request_id)
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let mut response = (self.kind.status(), Json(&self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}

/// Map a routing library error onto the problem the client sees.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::NodeNotFound { name, suggestions } => {
            ProblemDetails::unknown_node(name, suggestions, request_id)
        }
        LibError::RouteNotFound { start, goal } => {
            ProblemDetails::route_not_found(start, goal, request_id)
        }
        LibError::InsufficientFuel { start, goal } => {
            ProblemDetails::insufficient_fuel(start, goal, request_id)
        }
        other if other.is_input_fault() => ProblemDetails::bad_request(other.to_string(), request_id),
        other => ProblemDetails::internal_error(other.to_string(), request_id),
    }
}
