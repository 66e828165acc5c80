//! Service configuration read from the environment.
//!
//! | Variable                 | Default | Meaning                                   |
//! |--------------------------|---------|-------------------------------------------|
//! | `SERVICE_PORT`           | `8080`  | TCP port to listen on                     |
//! | `FUEL_EFFICIENCY`        | `0.5`   | Fuel per unit distance when not supplied  |
//! | `FUELROUTE_GRAPH_PATH`   | unset   | Graph used when a request omits `graph`   |
//! | `SERVICE_NAME`           | `route` | Service label for logs and health checks  |

use std::path::PathBuf;

use fuelroute_lib::DEFAULT_FUEL_EFFICIENCY;
use thiserror::Error;

pub const DEFAULT_SERVICE_PORT: u16 = 8080;
pub const DEFAULT_SERVICE_NAME: &str = "route";

/// Errors raised while reading service configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Runtime configuration for the route service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub port: u16,
    /// Fuel consumed per unit distance when a request does not say.
    pub default_fuel_efficiency: f64,
    /// Graph file loaded at startup and used when a request carries none.
    pub graph_path: Option<PathBuf>,
    pub service_name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERVICE_PORT,
            default_fuel_efficiency: DEFAULT_FUEL_EFFICIENCY,
            graph_path: None,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its
    /// value. Unset and empty values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get("SERVICE_PORT") {
            config.port = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "SERVICE_PORT",
                    value,
                    reason: "expected a port number",
                })?;
        }

        if let Some(value) = get("FUEL_EFFICIENCY") {
            let efficiency: f64 = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "FUEL_EFFICIENCY",
                value: value.clone(),
                reason: "expected a number",
            })?;
            if !efficiency.is_finite() || efficiency <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    name: "FUEL_EFFICIENCY",
                    value,
                    reason: "must be finite and positive",
                });
            }
            config.default_fuel_efficiency = efficiency;
        }

        config.graph_path = get("FUELROUTE_GRAPH_PATH").map(PathBuf::from);

        if let Some(name) = get("SERVICE_NAME") {
            config.service_name = name;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_fuel_efficiency, 0.5);
        assert!(config.graph_path.is_none());
    }

    #[test]
    fn reads_all_variables() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("SERVICE_PORT", "9090"),
            ("FUEL_EFFICIENCY", "0.25"),
            ("FUELROUTE_GRAPH_PATH", "/data/graph.json"),
            ("SERVICE_NAME", "route-eu"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.default_fuel_efficiency, 0.25);
        assert_eq!(config.graph_path, Some(PathBuf::from("/data/graph.json")));
        assert_eq!(config.service_name, "route-eu");
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config =
            ServiceConfig::from_lookup(lookup(&[("SERVICE_PORT", ""), ("FUEL_EFFICIENCY", " ")]))
                .unwrap();
        assert_eq!(config.port, DEFAULT_SERVICE_PORT);
        assert_eq!(config.default_fuel_efficiency, DEFAULT_FUEL_EFFICIENCY);
    }

    #[test]
    fn rejects_bad_port() {
        let err = ServiceConfig::from_lookup(lookup(&[("SERVICE_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("SERVICE_PORT"));
    }

    #[test]
    fn rejects_non_positive_efficiency() {
        let err = ServiceConfig::from_lookup(lookup(&[("FUEL_EFFICIENCY", "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "FUEL_EFFICIENCY",
                ..
            }
        ));
    }
}
