//! Response envelopes for the route endpoints.
//!
//! Successful responses carry `"status": "success"` next to the flattened
//! payload. Fuel-infeasible requests use the `"status": "error"` envelope with
//! a plain message instead of problem details, which remain the format for
//! malformed input and lookup failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Message returned when no refuelling schedule reaches the destination.
pub const INSUFFICIENT_FUEL_MESSAGE: &str = "Not enough fuel to reach the destination.";

/// Envelope status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Wrapper for successful responses with content type metadata.
///
/// # Example
///
/// ```
/// use fuelroute_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct RouteResult {
///     path: Vec<String>,
///     distance: f64,
/// }
///
/// let response = ServiceResponse::new(RouteResult { path: vec!["A".into()], distance: 0.0 });
/// let json = serde_json::to_value(&response).unwrap();
/// assert_eq!(json["status"], "success");
/// assert_eq!(json["distance"], 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub status: ResponseStatus,

    #[serde(flatten)]
    pub data: T,

    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// `{"status": "error", "message": ...}` body with an explicit HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip)]
    pub http_status: u16,
}

impl ErrorResponse {
    pub fn new(http_status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            http_status: http_status.as_u16(),
        }
    }

    /// 400 response for routes no refuelling schedule can fly.
    pub fn insufficient_fuel() -> Self {
        Self::new(StatusCode::BAD_REQUEST, INSUFFICIENT_FUEL_MESSAGE)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        path: Vec<String>,
        stops: usize,
    }

    #[test]
    fn success_fields_are_flattened() {
        let response = ServiceResponse::new(TestData {
            path: vec!["A".to_string(), "B".to_string()],
            stops: 1,
        });
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["stops"], 1);
        assert_eq!(json["content_type"], "application/json");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn success_round_trips_from_wire() {
        let json = r#"{"status":"success","path":["A"],"stops":0,"content_type":"application/json"}"#;
        let response: ServiceResponse<TestData> = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, ResponseStatus::Success);
        assert_eq!(response.data.path, vec!["A"]);
    }

    #[test]
    fn insufficient_fuel_body() {
        let error = ErrorResponse::insufficient_fuel();
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(error.http_status, 400);
        assert_eq!(
            json,
            serde_json::json!({
                "status": "error",
                "message": "Not enough fuel to reach the destination."
            })
        );
    }

    #[test]
    fn error_response_uses_its_status_code() {
        let response = ErrorResponse::new(StatusCode::CONFLICT, "busy").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
