//! Common test utilities and fixture helpers.
//!
//! This module provides shared test infrastructure for integration tests:
//! fixture paths, small in-memory graphs and `proptest` strategies for
//! generated graphs and fuel stock.

use std::path::PathBuf;

use proptest::prelude::*;

use fuelroute_lib::{load_fuel_stock, load_graph, AdjacencyMap, FuelStock, Graph};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// The two-hop `A -> B -> C` chain with 4-unit edges.
#[allow(dead_code)]
pub fn chain_graph() -> Graph {
    load_graph(fixtures_dir().join("chain_graph.json")).expect("chain fixture loads")
}

#[allow(dead_code)]
pub fn chain_stock() -> FuelStock {
    load_fuel_stock(fixtures_dir().join("chain_stock.json")).expect("chain stock loads")
}

/// A small star sector with two competing routes from Sol to Deneb.
#[allow(dead_code)]
pub fn sector_graph() -> Graph {
    load_graph(fixtures_dir().join("sector_graph.json")).expect("sector fixture loads")
}

#[allow(dead_code)]
pub fn sector_stock() -> FuelStock {
    load_fuel_stock(fixtures_dir().join("sector_stock.json")).expect("sector stock loads")
}

/// Build a graph from `(from, to, weight)` triples.
#[allow(dead_code)]
pub fn graph_from_edges(edges: &[(&str, &str, f64)]) -> Graph {
    let mut map = AdjacencyMap::new();
    for &(from, to, weight) in edges {
        map.entry(from.to_string())
            .or_default()
            .insert(to.to_string(), weight);
    }
    Graph::from_adjacency(&map).expect("valid test graph")
}

/// Name of the `index`-th generated node. Zero padding keeps name order
/// equal to index order.
#[allow(dead_code)]
pub fn generated_node(index: usize) -> String {
    format!("N{index:02}")
}

/// Directed graphs over `nodes` nodes with integer weights in `1..=9`; each
/// ordered pair carries an edge with probability `edge_probability`.
#[allow(dead_code)]
pub fn adjacency_strategy(nodes: usize, edge_probability: f64) -> impl Strategy<Value = AdjacencyMap> {
    prop::collection::vec(
        prop::option::weighted(edge_probability, 1_u32..=9),
        nodes * nodes,
    )
    .prop_map(move |cells| {
        let mut map = AdjacencyMap::new();
        for from in 0..nodes {
            let entry = map.entry(generated_node(from)).or_default();
            for to in (0..nodes).filter(|&to| to != from) {
                if let Some(weight) = cells[from * nodes + to] {
                    entry.insert(generated_node(to), f64::from(weight));
                }
            }
        }
        map
    })
}

/// Fuel stock on roughly half of the generated nodes, amounts in `0..10`.
#[allow(dead_code)]
pub fn stock_strategy(nodes: usize) -> impl Strategy<Value = FuelStock> {
    prop::collection::vec(prop::option::of(0_u32..10), nodes).prop_map(|amounts| {
        amounts
            .into_iter()
            .enumerate()
            .filter_map(|(node, amount)| amount.map(|a| (generated_node(node), f64::from(a))))
            .collect()
    })
}

#[allow(dead_code)]
pub fn build(map: &AdjacencyMap) -> Graph {
    Graph::from_adjacency(map).expect("generated graph is valid")
}
