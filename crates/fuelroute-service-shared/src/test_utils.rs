//! Test utilities for handler testing.
//!
//! Provides the sector fixture as both a request body fragment and a
//! pre-loaded default graph.

use std::path::PathBuf;
use std::sync::OnceLock;

use fuelroute_lib::{load_graph, Graph};
use serde_json::Value;

use crate::config::ServiceConfig;
use crate::middleware::RequestId;
use crate::state::AppState;

/// Directory holding the JSON fixtures shared by every crate.
pub const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../docs/fixtures");

static SECTOR_GRAPH: OnceLock<Graph> = OnceLock::new();

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(FIXTURES_DIR).join(name)
}

/// Raw JSON of a fixture file, for embedding in request bodies.
///
/// # Panics
///
/// Panics if the fixture is missing or malformed, which is a test setup error.
pub fn fixture_json(name: &str) -> Value {
    let path = fixture_path(name);
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
}

/// State without a default graph; requests must carry their own.
pub fn test_state() -> AppState {
    AppState::from_components(ServiceConfig::default(), None)
}

/// State whose default graph is the sector fixture.
pub fn test_state_with_sector_graph() -> AppState {
    let graph = SECTOR_GRAPH
        .get_or_init(|| {
            load_graph(fixture_path("sector_graph.json"))
                .unwrap_or_else(|e| panic!("failed to load sector fixture: {e}"))
        })
        .clone();
    AppState::from_components(ServiceConfig::default(), Some(graph))
}

/// Node names in the sector fixture.
pub mod fixture_nodes {
    pub const SOL: &str = "Sol";
    pub const VEGA: &str = "Vega";
    pub const ALTAIR: &str = "Altair";
    pub const DENEB: &str = "Deneb";
    pub const POLARIS: &str = "Polaris";
    pub const KEPLER: &str = "Kepler";
}

pub fn test_request_id() -> String {
    format!("test-{}", RequestId::generate())
}
