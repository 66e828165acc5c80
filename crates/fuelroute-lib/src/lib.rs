//! Fuel-aware routing library entry points.
//!
//! This crate exposes the weighted routing graph, the plain shortest-path
//! search, the fuel-constrained search and the router that chooses between
//! them. Higher-level consumers (CLI, HTTP service) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod fuel;
pub mod graph;
pub mod loader;
pub mod path;
pub mod routing;

pub use error::{Error, Result};
pub use fuel::{
    find_fuel_route, project_fuel, FuelParameters, FuelRoute, FuelSearchOutcome, FuelStock,
    HopProjection, StockLevels, DEFAULT_FUEL_EFFICIENCY,
};
pub use graph::{AdjacencyMap, Edge, Graph, NodeIndex};
pub use loader::{load_fuel_stock, load_graph};
pub use path::{find_shortest_path, shortest_path_tree, PlainRoute, ShortestPathTree};
pub use routing::{plan_route, RouteOutcome, RoutePlan, RouteRequest, RouteStrategy};
