//! Route planning with fuel awareness.
//!
//! This module provides:
//! - [`RouteRequest`] - endpoints plus optional fuel parameters and stock
//! - [`RoutePlan`] - the planned route returned on success
//! - [`RouteOutcome`] - success, unreachable destination, or insufficient fuel
//! - [`plan_route`] - main entry point
//!
//! # Example
//!
//! ```
//! use fuelroute_lib::{plan_route, AdjacencyMap, FuelParameters, FuelStock, Graph, RouteRequest};
//!
//! let adjacency: AdjacencyMap =
//!     serde_json::from_str(r#"{"A": {"B": 4}, "B": {"C": 4}}"#).unwrap();
//! let graph = Graph::from_adjacency(&adjacency).unwrap();
//! let request = RouteRequest::new("A", "C")
//!     .with_fuel(FuelParameters::new(4.0, 1.0))
//!     .with_stock(FuelStock::new().with("A", 4.0).with("B", 4.0));
//!
//! let plan = plan_route(&graph, &request).unwrap().into_result().unwrap();
//! assert_eq!(plan.steps, vec!["A", "B", "C"]);
//! assert_eq!(plan.stops, 1);
//! ```

mod planner;

pub use planner::{DirectPlanner, PlannedPath, RefuellingPlanner, RoutePlanner};

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::fuel::{project_fuel, FuelParameters, FuelStock, HopProjection};
use crate::graph::Graph;

/// How a route was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStrategy {
    /// Plain shortest path, affordable on one tank (or no fuel limits given).
    Direct,
    /// Fuel-constrained search with refuelling stops.
    Refuelled,
}

impl fmt::Display for RouteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteStrategy::Direct => "direct",
            RouteStrategy::Refuelled => "refuelled",
        };
        f.write_str(value)
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    /// Fuel limits; `None` plans a plain shortest path.
    pub fuel: Option<FuelParameters>,
    pub fuel_stock: FuelStock,
}

impl RouteRequest {
    /// Request without fuel constraints.
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            fuel: None,
            fuel_stock: FuelStock::new(),
        }
    }

    pub fn with_fuel(mut self, fuel: FuelParameters) -> Self {
        self.fuel = Some(fuel);
        self
    }

    pub fn with_stock(mut self, stock: FuelStock) -> Self {
        self.fuel_stock = stock;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub start: String,
    pub goal: String,
    pub strategy: RouteStrategy,
    /// Ordered node names from start to goal.
    pub steps: Vec<String>,
    pub distance: f64,
    /// Unconstrained shortest distance between the same endpoints.
    pub plain_distance: f64,
    /// Refuelling stops taken.
    pub stops: usize,
    /// Per-hop fuel bookkeeping; empty when no fuel limits were given.
    pub hops: Vec<HopProjection>,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Extra distance flown compared to the unconstrained shortest path.
    pub fn detour(&self) -> f64 {
        self.distance - self.plain_distance
    }
}

/// Result of [`plan_route`].
///
/// Unreachable destinations and insufficient fuel are regular outcomes, not
/// errors; [`RouteOutcome::into_result`] converts them for `?` callers.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Routed(RoutePlan),
    /// No path exists in the graph at all.
    Unreachable { start: String, goal: String },
    /// A path exists but no refuelling schedule can fly it.
    InsufficientFuel { start: String, goal: String },
}

impl RouteOutcome {
    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            RouteOutcome::Routed(plan) => Some(plan),
            _ => None,
        }
    }

    /// Stops taken, or `-1` when no route was produced.
    pub fn stop_count(&self) -> i64 {
        match self {
            RouteOutcome::Routed(plan) => plan.stops as i64,
            _ => -1,
        }
    }

    /// Short label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            RouteOutcome::Routed(_) => "routed",
            RouteOutcome::Unreachable { .. } => "no_path",
            RouteOutcome::InsufficientFuel { .. } => "insufficient_fuel",
        }
    }

    pub fn into_result(self) -> Result<RoutePlan> {
        match self {
            RouteOutcome::Routed(plan) => Ok(plan),
            RouteOutcome::Unreachable { start, goal } => Err(Error::RouteNotFound { start, goal }),
            RouteOutcome::InsufficientFuel { start, goal } => {
                Err(Error::InsufficientFuel { start, goal })
            }
        }
    }
}

/// Compute a route, refuelling only when the plain path is unaffordable.
///
/// This is the main entry point for route planning. It:
/// 1. Resolves node names and validates fuel inputs (input faults are `Err`)
/// 2. Runs the plain shortest-path search
/// 3. Returns the plain path when no fuel limits apply or one tank covers it
/// 4. Otherwise runs the fuel-constrained search
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<RouteOutcome> {
    let start = graph.resolve(&request.start)?;
    let goal = graph.resolve(&request.goal)?;

    if let Some(params) = &request.fuel {
        params.validate()?;
    }
    let stock = request.fuel_stock.resolve(graph)?;

    let Some(direct) = DirectPlanner.find_path(graph, start, goal) else {
        tracing::debug!(start = %request.start, goal = %request.goal, "goal unreachable");
        return Ok(RouteOutcome::Unreachable {
            start: request.start.clone(),
            goal: request.goal.clone(),
        });
    };
    let plain_distance = direct.distance;

    let (strategy, planned) = match request.fuel {
        None => (RouteStrategy::Direct, direct),
        Some(params) if params.can_afford(plain_distance) => {
            tracing::debug!(
                distance = plain_distance,
                capacity = params.capacity,
                "plain route affordable on one tank"
            );
            (RouteStrategy::Direct, direct)
        }
        Some(params) => {
            tracing::debug!(
                distance = plain_distance,
                required = params.required_fuel(plain_distance),
                capacity = params.capacity,
                "plain route exceeds tank, searching with refuelling"
            );
            let planner = RefuellingPlanner::new(params, stock.clone());
            match planner.find_path(graph, start, goal) {
                Some(found) => (planner.strategy(), found),
                None => {
                    return Ok(RouteOutcome::InsufficientFuel {
                        start: request.start.clone(),
                        goal: request.goal.clone(),
                    })
                }
            }
        }
    };

    let hops = match &request.fuel {
        Some(params) => project_fuel(graph, &stock, params, &planned.path)?,
        None => Vec::new(),
    };

    Ok(RouteOutcome::Routed(RoutePlan {
        start: request.start.clone(),
        goal: request.goal.clone(),
        strategy,
        steps: graph.path_names(&planned.path),
        distance: planned.distance,
        plain_distance,
        stops: planned.stops,
        hops,
    }))
}
