//! Route planning strategies.
//!
//! The router first asks a [`DirectPlanner`] for the plain shortest path and
//! only falls back to a [`RefuellingPlanner`] when that path cannot be flown
//! on one tank. Both implement [`RoutePlanner`] so the orchestrator treats
//! them uniformly.

use crate::fuel::{find_fuel_route, FuelParameters, FuelSearchOutcome, StockLevels};
use crate::graph::{Graph, NodeIndex};
use crate::path::find_shortest_path;

use super::RouteStrategy;

/// Path produced by a planner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPath {
    pub distance: f64,
    pub path: Vec<NodeIndex>,
    pub stops: usize,
}

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The strategy identifier for this planner.
    fn strategy(&self) -> RouteStrategy;

    /// Execute the search on the given graph.
    ///
    /// Returns `None` when the planner cannot reach `goal`.
    fn find_path(&self, graph: &Graph, start: NodeIndex, goal: NodeIndex) -> Option<PlannedPath>;
}

/// Plain Dijkstra planner that ignores fuel.
#[derive(Debug, Clone, Default)]
pub struct DirectPlanner;

impl RoutePlanner for DirectPlanner {
    fn strategy(&self) -> RouteStrategy {
        RouteStrategy::Direct
    }

    fn find_path(&self, graph: &Graph, start: NodeIndex, goal: NodeIndex) -> Option<PlannedPath> {
        let route = find_shortest_path(graph, start, goal);
        route.is_reachable().then(|| PlannedPath {
            distance: route.distance,
            path: route.path,
            stops: 0,
        })
    }
}

/// Fuel-constrained planner that may stop to refuel.
#[derive(Debug, Clone)]
pub struct RefuellingPlanner {
    params: FuelParameters,
    stock: StockLevels,
}

impl RefuellingPlanner {
    pub fn new(params: FuelParameters, stock: StockLevels) -> Self {
        Self { params, stock }
    }
}

impl RoutePlanner for RefuellingPlanner {
    fn strategy(&self) -> RouteStrategy {
        RouteStrategy::Refuelled
    }

    fn find_path(&self, graph: &Graph, start: NodeIndex, goal: NodeIndex) -> Option<PlannedPath> {
        match find_fuel_route(graph, &self.stock, start, goal, &self.params) {
            FuelSearchOutcome::Found(route) => Some(PlannedPath {
                distance: route.distance,
                path: route.path,
                stops: route.stops,
            }),
            FuelSearchOutcome::Infeasible => None,
        }
    }
}
