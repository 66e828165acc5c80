use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the routing library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node name could not be found in the graph.
    #[error("unknown node: {name}{}", format_suggestions(.suggestions))]
    NodeNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when an edge weight is negative, NaN or infinite.
    #[error("invalid weight {weight} on edge {from} -> {to}; weights must be finite and non-negative")]
    InvalidEdgeWeight { from: String, to: String, weight: f64 },

    /// Raised when a fuel capacity or efficiency is out of range.
    #[error("invalid fuel parameter {name}: {message}")]
    InvalidFuelParameter { name: &'static str, message: String },

    /// Raised when a fuel stock entry is negative or non-finite.
    #[error("invalid fuel stock for node {node}: {message}")]
    InvalidFuelStock { node: String, message: String },

    /// Raised when a path refers to a node index the graph did not produce.
    #[error("node index {index} is not part of a graph with {node_count} nodes")]
    UnknownNodeIndex { index: usize, node_count: usize },

    /// Raised when no path exists between two nodes at all.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a path exists but cannot be flown with the available fuel.
    #[error("not enough fuel to travel from {start} to {goal}")]
    InsufficientFuel { start: String, goal: String },

    /// Raised when a graph or fuel stock file could not be parsed.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Wrapper for JSON errors outside of file loading.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error stems from bad caller input rather than a search outcome.
    ///
    /// Input faults are reported before any search runs.
    pub fn is_input_fault(&self) -> bool {
        !matches!(
            self,
            Error::RouteNotFound { .. } | Error::InsufficientFuel { .. } | Error::Io(_)
        )
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_not_found_without_suggestions() {
        let err = Error::NodeNotFound {
            name: "Zeta".to_string(),
            suggestions: vec![],
        };
        assert_eq!(err.to_string(), "unknown node: Zeta");
    }

    #[test]
    fn node_not_found_lists_suggestions() {
        let err = Error::NodeNotFound {
            name: "Alpah".to_string(),
            suggestions: vec!["Alpha".to_string(), "Aleph".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("Did you mean one of: 'Alpha', 'Aleph'?"));
    }

    #[test]
    fn outcome_errors_are_not_input_faults() {
        let unreachable = Error::RouteNotFound {
            start: "A".to_string(),
            goal: "B".to_string(),
        };
        let fuel = Error::InsufficientFuel {
            start: "A".to_string(),
            goal: "B".to_string(),
        };
        let bad = Error::InvalidFuelParameter {
            name: "fuel_efficiency",
            message: "must be positive".to_string(),
        };

        assert!(!unreachable.is_input_fault());
        assert!(!fuel.is_input_fault());
        assert!(bad.is_input_fault());
    }
}
