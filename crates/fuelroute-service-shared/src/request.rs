//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use fuelroute_lib::{AdjacencyMap, FuelParameters, FuelStock, RouteRequest as LibRequest};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations check every field and return a `ProblemDetails` for the
/// first invalid one.
pub trait Validate {
    /// The `request_id` populates the `instance` field of any returned problem.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Body of `POST /api/v1/route` and `POST /submit-nodes`.
///
/// The camelCase names used by the legacy endpoint (`startNode`, `endNode`)
/// are accepted as aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Adjacency map; falls back to the service's configured graph when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<AdjacencyMap>,

    #[serde(alias = "startNode")]
    pub from: String,

    #[serde(alias = "endNode")]
    pub to: String,

    /// Fuel obtainable at each node.
    #[serde(default, skip_serializing_if = "FuelStock::is_empty")]
    pub fuels: FuelStock,

    /// Tank capacity. Without it the route is planned with no fuel limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_capacity: Option<f64>,

    /// Fuel per unit distance; defaults to the service configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_efficiency: Option<f64>,
}

impl RouteRequest {
    /// Translate into a library request, filling in `default_efficiency`.
    pub fn to_lib_request(&self, default_efficiency: f64) -> LibRequest {
        let mut request = LibRequest::new(self.from.clone(), self.to.clone())
            .with_stock(self.fuels.clone());
        if let Some(capacity) = self.fuel_capacity {
            let efficiency = self.fuel_efficiency.unwrap_or(default_efficiency);
            request = request.with_fuel(FuelParameters::new(capacity, efficiency));
        }
        request
    }
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.from.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'from' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.to.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'to' field is required and cannot be empty",
                request_id,
            )));
        }

        if let Some(capacity) = self.fuel_capacity {
            if !capacity.is_finite() || capacity < 0.0 {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'fuel_capacity' field must be a non-negative number",
                    request_id,
                )));
            }
        }

        if let Some(efficiency) = self.fuel_efficiency {
            if !efficiency.is_finite() || efficiency <= 0.0 {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'fuel_efficiency' field must be a positive number",
                    request_id,
                )));
            }
        }

        if let Some((node, amount)) = self
            .fuels
            .iter()
            .find(|(_, amount)| !amount.is_finite() || *amount < 0.0)
        {
            return Err(Box::new(ProblemDetails::bad_request(
                format!("Fuel stock for '{node}' must be a non-negative number, got {amount}"),
                request_id,
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(from: &str, to: &str) -> RouteRequest {
        RouteRequest {
            from: from.to_string(),
            to: to.to_string(),
            ..RouteRequest::default()
        }
    }

    #[test]
    fn test_route_request_valid() {
        let req = RouteRequest {
            fuel_capacity: Some(10.0),
            fuel_efficiency: Some(1.0),
            ..request("Sol", "Deneb")
        };
        assert!(req.validate("test").is_ok());
    }

    #[test]
    fn test_route_request_empty_from() {
        let err = request("", "Deneb").validate("test").unwrap_err();
        assert!(err.detail.contains("'from'"));
    }

    #[test]
    fn test_route_request_blank_to() {
        let err = request("Sol", "   ").validate("test").unwrap_err();
        assert!(err.detail.contains("'to'"));
    }

    #[test]
    fn test_route_request_negative_capacity() {
        let req = RouteRequest {
            fuel_capacity: Some(-1.0),
            ..request("Sol", "Deneb")
        };
        let err = req.validate("req-cap").unwrap_err();
        assert!(err.detail.contains("'fuel_capacity'"));
        assert_eq!(err.instance, "req-cap");
    }

    #[test]
    fn test_route_request_zero_efficiency() {
        let req = RouteRequest {
            fuel_efficiency: Some(0.0),
            ..request("Sol", "Deneb")
        };
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.contains("'fuel_efficiency'"));
    }

    #[test]
    fn test_route_request_negative_stock() {
        let req = RouteRequest {
            fuels: FuelStock::new().with("Vega", -4.0),
            ..request("Sol", "Deneb")
        };
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.contains("Vega"));
    }

    #[test]
    fn test_legacy_field_names() {
        let json = r#"{
            "graph": {"A": {"B": 4}},
            "startNode": "A",
            "endNode": "B",
            "fuels": {"A": 2},
            "fuel_capacity": 4
        }"#;
        let req: RouteRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.from, "A");
        assert_eq!(req.to, "B");
        assert_eq!(req.fuels.get("A"), 2.0);
        assert_eq!(req.fuel_capacity, Some(4.0));
        assert!(req.graph.is_some());
    }

    #[test]
    fn test_deserialization_defaults() {
        let req: RouteRequest = serde_json::from_str(r#"{"from":"A","to":"B"}"#).unwrap();
        assert!(req.graph.is_none());
        assert!(req.fuels.is_empty());
        assert!(req.fuel_capacity.is_none());
        assert!(req.fuel_efficiency.is_none());
    }

    #[test]
    fn test_to_lib_request_uses_default_efficiency() {
        let req = RouteRequest {
            fuel_capacity: Some(8.0),
            ..request("A", "B")
        };
        let lib = req.to_lib_request(0.5);
        assert_eq!(lib.fuel, Some(FuelParameters::new(8.0, 0.5)));

        let explicit = RouteRequest {
            fuel_efficiency: Some(2.0),
            ..req
        };
        assert_eq!(
            explicit.to_lib_request(0.5).fuel,
            Some(FuelParameters::new(8.0, 2.0))
        );
    }

    #[test]
    fn test_to_lib_request_without_capacity_is_unconstrained() {
        let req = RouteRequest {
            fuel_efficiency: Some(1.0),
            ..request("A", "B")
        };
        assert!(req.to_lib_request(0.5).fuel.is_none());
    }
}
