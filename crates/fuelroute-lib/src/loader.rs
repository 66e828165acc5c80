//! Loading graphs and fuel stock from JSON files.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::fuel::FuelStock;
use crate::graph::{AdjacencyMap, Graph};

/// Load a graph from a JSON adjacency map (`{"A": {"B": 4.0}}`).
pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph> {
    let path = path.as_ref();
    let adjacency: AdjacencyMap = read_json(path)?;
    let graph = Graph::from_adjacency(&adjacency)?;
    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// Load fuel stock from a JSON object mapping node names to fuel amounts.
pub fn load_fuel_stock(path: impl AsRef<Path>) -> Result<FuelStock> {
    let path = path.as_ref();
    let stock: FuelStock = read_json(path)?;
    tracing::debug!(path = %path.display(), "fuel stock loaded");
    Ok(stock)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}
