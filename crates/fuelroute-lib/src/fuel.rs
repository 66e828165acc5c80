//! Fuel-constrained routing.
//!
//! This module provides:
//! - [`FuelParameters`] - tank capacity and consumption per unit distance
//! - [`FuelStock`] - fuel obtainable at each node, keyed by node name
//! - [`find_fuel_route`] - state-space search over `(node, fuel remaining)`
//! - [`project_fuel`] - per-hop replay of a path with the same refuelling rule
//!
//! # Expansion order
//!
//! States are expanded by fewest refuelling stops first, then most fuel left,
//! then shortest distance travelled. The first state that reaches the goal is
//! returned, so a route with fewer stops wins over a shorter route with more
//! stops.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeIndex};
use crate::path::FloatOrd;

/// Default fuel consumed per unit of distance.
pub const DEFAULT_FUEL_EFFICIENCY: f64 = 0.5;

/// Tank capacity and consumption rate of the traveller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelParameters {
    /// Maximum fuel the traveller can hold.
    pub capacity: f64,
    /// Fuel consumed per unit of distance.
    pub efficiency: f64,
}

impl FuelParameters {
    pub fn new(capacity: f64, efficiency: f64) -> Self {
        Self {
            capacity,
            efficiency,
        }
    }

    /// Validate the parameters before any search runs.
    pub fn validate(&self) -> Result<()> {
        if !self.capacity.is_finite() || self.capacity < 0.0 {
            return Err(Error::InvalidFuelParameter {
                name: "fuel_capacity",
                message: format!("must be finite and non-negative, got {}", self.capacity),
            });
        }

        if !self.efficiency.is_finite() || self.efficiency <= 0.0 {
            return Err(Error::InvalidFuelParameter {
                name: "fuel_efficiency",
                message: format!("must be finite and positive, got {}", self.efficiency),
            });
        }

        Ok(())
    }

    /// Fuel needed to cover `distance`.
    pub fn required_fuel(&self, distance: f64) -> f64 {
        distance * self.efficiency
    }

    /// Whether a full tank covers `distance` without refuelling.
    pub fn can_afford(&self, distance: f64) -> bool {
        self.capacity >= self.required_fuel(distance)
    }
}

/// Fuel obtainable at each node, keyed by node name.
///
/// Nodes without an entry (or with zero) offer no refuelling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuelStock(BTreeMap<String, f64>);

impl FuelStock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    pub fn with(mut self, node: impl Into<String>, amount: f64) -> Self {
        self.0.insert(node.into(), amount);
        self
    }

    pub fn insert(&mut self, node: impl Into<String>, amount: f64) {
        self.0.insert(node.into(), amount);
    }

    /// Fuel available at `node`, zero when absent.
    pub fn get(&self, node: &str) -> f64 {
        self.0.get(node).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(node, &amount)| (node.as_str(), amount))
    }

    /// Resolve names against `graph`.
    ///
    /// Entries for nodes outside the graph are ignored; negative or
    /// non-finite amounts are rejected.
    pub fn resolve(&self, graph: &Graph) -> Result<StockLevels> {
        let mut levels = vec![0.0; graph.node_count()];
        for (node, &amount) in &self.0 {
            if !amount.is_finite() || amount < 0.0 {
                return Err(Error::InvalidFuelStock {
                    node: node.clone(),
                    message: format!("must be finite and non-negative, got {amount}"),
                });
            }
            let Some(index) = graph.node_index(node) else {
                tracing::debug!(node = %node, "ignoring fuel stock for node outside the graph");
                continue;
            };
            levels[index] = amount;
        }
        Ok(StockLevels(levels))
    }
}

impl From<BTreeMap<String, f64>> for FuelStock {
    fn from(map: BTreeMap<String, f64>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, f64)> for FuelStock {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Fuel stock resolved to node indices of a specific graph.
#[derive(Debug, Clone, PartialEq)]
pub struct StockLevels(Vec<f64>);

impl StockLevels {
    /// No refuelling anywhere in a graph of `node_count` nodes.
    pub fn empty(node_count: usize) -> Self {
        Self(vec![0.0; node_count])
    }

    pub fn available(&self, node: NodeIndex) -> f64 {
        self.0.get(node).copied().unwrap_or(0.0)
    }
}

/// A route that satisfies the fuel constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelRoute {
    pub distance: f64,
    pub path: Vec<NodeIndex>,
    /// Number of refuelling events along the path.
    pub stops: usize,
}

/// Result of a fuel-constrained search.
#[derive(Debug, Clone, PartialEq)]
pub enum FuelSearchOutcome {
    Found(FuelRoute),
    /// The frontier was exhausted without reaching the goal.
    Infeasible,
}

impl FuelSearchOutcome {
    /// Stops taken, or `-1` when the search was infeasible.
    pub fn stop_count(&self) -> i64 {
        match self {
            FuelSearchOutcome::Found(route) => route.stops as i64,
            FuelSearchOutcome::Infeasible => -1,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FuelSearchOutcome::Found(_))
    }

    pub fn route(&self) -> Option<&FuelRoute> {
        match self {
            FuelSearchOutcome::Found(route) => Some(route),
            FuelSearchOutcome::Infeasible => None,
        }
    }

    pub fn into_route(self) -> Option<FuelRoute> {
        match self {
            FuelSearchOutcome::Found(route) => Some(route),
            FuelSearchOutcome::Infeasible => None,
        }
    }
}

#[derive(Debug, Clone)]
struct SearchState {
    stops: usize,
    fuel_left: f64,
    distance: f64,
    node: NodeIndex,
    path: Vec<NodeIndex>,
}

impl SearchState {
    fn advance(&self, next: NodeIndex, weight: f64, stops: usize, fuel_left: f64) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(next);
        Self {
            stops,
            fuel_left,
            distance: self.distance + weight,
            node: next,
            path,
        }
    }
}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchState {}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest element; the state to expand first
        // must compare greatest.
        other
            .stops
            .cmp(&self.stops)
            .then_with(|| FloatOrd(self.fuel_left).cmp(&FloatOrd(other.fuel_left)))
            .then_with(|| FloatOrd(other.distance).cmp(&FloatOrd(self.distance)))
            .then_with(|| other.node.cmp(&self.node))
            .then_with(|| other.path.cmp(&self.path))
    }
}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a route from `start` to `goal` that never runs out of fuel.
///
/// The traveller starts with a full tank. When fuel is short for an edge it
/// may refuel at the current node (if stock is available there), counting one
/// stop; the tank never exceeds `params.capacity`. Callers are expected to
/// validate `params` first.
pub fn find_fuel_route(
    graph: &Graph,
    stock: &StockLevels,
    start: NodeIndex,
    goal: NodeIndex,
    params: &FuelParameters,
) -> FuelSearchOutcome {
    let mut queue = BinaryHeap::new();
    let mut best: HashMap<NodeIndex, (usize, f64)> = HashMap::new();
    let mut expanded = 0usize;

    queue.push(SearchState {
        stops: 0,
        fuel_left: params.capacity,
        distance: 0.0,
        node: start,
        path: vec![start],
    });

    while let Some(state) = queue.pop() {
        if state.node == goal {
            tracing::debug!(
                expanded,
                stops = state.stops,
                distance = state.distance,
                "fuel search reached goal"
            );
            return FuelSearchOutcome::Found(FuelRoute {
                distance: state.distance,
                path: state.path,
                stops: state.stops,
            });
        }

        if let Some(&(best_stops, best_fuel)) = best.get(&state.node) {
            let dominated = best_stops < state.stops
                || (best_stops == state.stops && best_fuel >= state.fuel_left);
            if dominated {
                continue;
            }
        }
        best.insert(state.node, (state.stops, state.fuel_left));
        expanded += 1;

        for edge in graph.edges(state.node) {
            let required = params.required_fuel(edge.distance);

            if state.fuel_left >= required {
                queue.push(state.advance(
                    edge.target,
                    edge.distance,
                    state.stops,
                    state.fuel_left - required,
                ));
                continue;
            }

            let available = stock.available(state.node);
            if available > 0.0 {
                let refuelled = params.capacity.min(state.fuel_left + available);
                if refuelled >= required {
                    queue.push(state.advance(
                        edge.target,
                        edge.distance,
                        state.stops + 1,
                        refuelled - required,
                    ));
                }
            }
        }
    }

    tracing::debug!(expanded, "fuel search exhausted frontier");
    FuelSearchOutcome::Infeasible
}

/// Fuel bookkeeping for one hop of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopProjection {
    pub from: String,
    pub to: String,
    /// Edge distance of this hop.
    pub distance: f64,
    /// Distance travelled up to and including this hop.
    pub cumulative_distance: f64,
    /// Fuel consumed by this hop.
    pub fuel_cost: f64,
    /// Fuel in the tank on arrival at `from`.
    pub fuel_before: f64,
    /// Fuel taken on at `from` before departing; zero when no stop was made.
    pub refuelled: f64,
    /// Fuel in the tank on arrival at `to`.
    pub fuel_after: f64,
}

impl HopProjection {
    /// Whether a refuelling stop was made before this hop.
    pub fn is_refuel_stop(&self) -> bool {
        self.refuelled > 0.0
    }
}

/// Replay `path` from a full tank using the search's refuelling rule.
///
/// Refuelling happens only when the tank cannot cover the next hop, which is
/// exactly when [`find_fuel_route`] records a stop, so the projection of a
/// found route reports the same stop count.
///
/// Fails with [`Error::UnknownNodeIndex`] when `path` holds an index that
/// `graph` did not produce.
pub fn project_fuel(
    graph: &Graph,
    stock: &StockLevels,
    params: &FuelParameters,
    path: &[NodeIndex],
) -> Result<Vec<HopProjection>> {
    let node_count = graph.node_count();
    if let Some(&index) = path.iter().find(|&&index| index >= node_count) {
        return Err(Error::UnknownNodeIndex { index, node_count });
    }

    let mut fuel = params.capacity;
    let mut cumulative = 0.0;
    let mut hops = Vec::with_capacity(path.len().saturating_sub(1));

    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let distance = graph
            .edge_weight(from, to)
            .ok_or_else(|| Error::RouteNotFound {
                start: graph.node_name(from).to_string(),
                goal: graph.node_name(to).to_string(),
            })?;
        let fuel_cost = params.required_fuel(distance);
        let fuel_before = fuel;

        let mut refuelled = 0.0;
        if fuel < fuel_cost {
            let available = stock.available(from);
            let topped_up = params.capacity.min(fuel + available);
            if available <= 0.0 || topped_up < fuel_cost {
                return Err(Error::InsufficientFuel {
                    start: graph.node_name(from).to_string(),
                    goal: graph.node_name(to).to_string(),
                });
            }
            refuelled = topped_up - fuel;
            fuel = topped_up;
        }

        fuel -= fuel_cost;
        cumulative += distance;
        hops.push(HopProjection {
            from: graph.node_name(from).to_string(),
            to: graph.node_name(to).to_string(),
            distance,
            cumulative_distance: cumulative,
            fuel_cost,
            fuel_before,
            refuelled,
            fuel_after: fuel,
        });
    }

    Ok(hops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyMap;

    fn graph(edges: &[(&str, &str, f64)]) -> Graph {
        let mut map = AdjacencyMap::new();
        for &(from, to, weight) in edges {
            map.entry(from.to_string())
                .or_default()
                .insert(to.to_string(), weight);
        }
        Graph::from_adjacency(&map).unwrap()
    }

    fn search(
        g: &Graph,
        stock: &FuelStock,
        from: &str,
        to: &str,
        params: FuelParameters,
    ) -> FuelSearchOutcome {
        let levels = stock.resolve(g).unwrap();
        find_fuel_route(
            g,
            &levels,
            g.node_index(from).unwrap(),
            g.node_index(to).unwrap(),
            &params,
        )
    }

    #[test]
    fn no_stock_and_small_tank_is_infeasible() {
        let g = graph(&[("A", "B", 4.0), ("B", "C", 4.0)]);
        let outcome = search(&g, &FuelStock::new(), "A", "C", FuelParameters::new(1.0, 1.0));

        assert_eq!(outcome, FuelSearchOutcome::Infeasible);
        assert_eq!(outcome.stop_count(), -1);
        assert!(outcome.route().is_none());
    }

    #[test]
    fn refuels_once_midway() {
        let g = graph(&[("A", "B", 4.0), ("B", "C", 4.0)]);
        let stock = FuelStock::new().with("A", 4.0).with("B", 4.0);
        let outcome = search(&g, &stock, "A", "C", FuelParameters::new(4.0, 1.0));

        let route = outcome.route().expect("route found");
        assert_eq!(route.distance, 8.0);
        assert_eq!(route.stops, 1);
        assert_eq!(g.path_names(&route.path), vec!["A", "B", "C"]);
    }

    #[test]
    fn start_equals_goal_needs_no_fuel() {
        let g = graph(&[("A", "B", 4.0)]);
        let outcome = search(&g, &FuelStock::new(), "A", "A", FuelParameters::new(0.0, 1.0));

        let route = outcome.route().expect("route found");
        assert_eq!(route.distance, 0.0);
        assert_eq!(route.stops, 0);
        assert_eq!(route.path, vec![g.node_index("A").unwrap()]);
    }

    #[test]
    fn refuelling_is_capped_by_capacity() {
        // A tank of 5 never holds enough for the 6-unit edge, however much stock.
        let g = graph(&[("A", "B", 6.0)]);
        let stock = FuelStock::new().with("A", 100.0);
        let outcome = search(&g, &stock, "A", "B", FuelParameters::new(5.0, 1.0));

        assert_eq!(outcome, FuelSearchOutcome::Infeasible);
    }

    #[test]
    fn efficiency_scales_required_fuel() {
        let g = graph(&[("A", "B", 8.0)]);
        let outcome = search(&g, &FuelStock::new(), "A", "B", FuelParameters::new(4.0, 0.5));

        let route = outcome.route().expect("half efficiency halves fuel use");
        assert_eq!(route.stops, 0);
    }

    #[test]
    fn prefers_fewer_stops_over_shorter_distance() {
        // A->P->Q->D is 18 long but needs stops at P and Q; A->M->D is 20
        // long with a single stop at M.
        let g = graph(&[
            ("A", "P", 6.0),
            ("P", "Q", 6.0),
            ("Q", "D", 6.0),
            ("A", "M", 10.0),
            ("M", "D", 10.0),
        ]);
        let stock = FuelStock::new()
            .with("M", 10.0)
            .with("P", 10.0)
            .with("Q", 10.0);
        let outcome = search(&g, &stock, "A", "D", FuelParameters::new(10.0, 1.0));

        let route = outcome.route().expect("route found");
        assert_eq!(g.path_names(&route.path), vec!["A", "M", "D"]);
        assert_eq!(route.distance, 20.0);
        assert_eq!(route.stops, 1);
    }

    #[test]
    fn refuelling_requires_stock_at_current_node() {
        // Stock sits at the destination side only; it cannot help the first hop.
        let g = graph(&[("A", "B", 4.0)]);
        let stock = FuelStock::new().with("B", 10.0);
        let outcome = search(&g, &stock, "A", "B", FuelParameters::new(3.0, 1.0));

        assert_eq!(outcome, FuelSearchOutcome::Infeasible);
    }

    #[test]
    fn zero_stock_entry_offers_no_refuel() {
        let g = graph(&[("A", "B", 4.0)]);
        let stock = FuelStock::new().with("A", 0.0);
        let outcome = search(&g, &stock, "A", "B", FuelParameters::new(3.0, 1.0));

        assert_eq!(outcome, FuelSearchOutcome::Infeasible);
    }

    #[test]
    fn repeated_searches_are_identical() {
        let g = graph(&[
            ("A", "B", 2.0),
            ("A", "C", 2.0),
            ("B", "D", 2.0),
            ("C", "D", 2.0),
        ]);
        let stock = FuelStock::new().with("B", 2.0).with("C", 2.0);
        let params = FuelParameters::new(2.0, 1.0);

        let first = search(&g, &stock, "A", "D", params);
        let second = search(&g, &stock, "A", "D", params);
        assert_eq!(first, second);
        assert_eq!(
            g.path_names(&first.route().unwrap().path),
            vec!["A", "B", "D"]
        );
    }

    #[test]
    fn expansion_order_prefers_more_fuel_at_equal_stops() {
        let mut heap = BinaryHeap::new();
        let low = SearchState {
            stops: 0,
            fuel_left: 1.0,
            distance: 1.0,
            node: 0,
            path: vec![0],
        };
        let high = SearchState {
            fuel_left: 3.0,
            distance: 9.0,
            node: 1,
            path: vec![1],
            ..low.clone()
        };
        let stopped = SearchState {
            stops: 1,
            fuel_left: 10.0,
            distance: 0.0,
            node: 2,
            path: vec![2],
        };
        heap.push(low);
        heap.push(stopped);
        heap.push(high);

        assert_eq!(heap.pop().map(|s| s.node), Some(1));
        assert_eq!(heap.pop().map(|s| s.node), Some(0));
        assert_eq!(heap.pop().map(|s| s.node), Some(2));
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        assert!(FuelParameters::new(-1.0, 1.0).validate().is_err());
        assert!(FuelParameters::new(1.0, 0.0).validate().is_err());
        assert!(FuelParameters::new(1.0, -0.5).validate().is_err());
        assert!(FuelParameters::new(f64::NAN, 1.0).validate().is_err());
        assert!(FuelParameters::new(0.0, 0.5).validate().is_ok());
    }

    #[test]
    fn resolve_ignores_unknown_nodes() {
        let g = graph(&[("A", "B", 1.0)]);
        let levels = FuelStock::new()
            .with("A", 3.0)
            .with("Z", 1.0)
            .resolve(&g)
            .unwrap();

        assert_eq!(levels.available(g.node_index("A").unwrap()), 3.0);
        assert_eq!(levels.available(g.node_index("B").unwrap()), 0.0);
    }

    #[test]
    fn resolve_rejects_negative_stock() {
        let g = graph(&[("A", "B", 1.0)]);

        let negative = FuelStock::new().with("A", -2.0).resolve(&g).unwrap_err();
        assert!(matches!(negative, Error::InvalidFuelStock { .. }));
    }

    #[test]
    fn projection_rejects_foreign_indices() {
        let g = graph(&[("A", "B", 1.0)]);
        let levels = StockLevels::empty(g.node_count());
        let params = FuelParameters::new(4.0, 1.0);

        let err = project_fuel(&g, &levels, &params, &[0, 7]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownNodeIndex {
                index: 7,
                node_count: 2
            }
        ));
        assert!(err.is_input_fault());
    }

    #[test]
    fn projection_matches_search_stops() {
        let g = graph(&[("A", "B", 4.0), ("B", "C", 4.0)]);
        let stock = FuelStock::new().with("A", 4.0).with("B", 4.0);
        let params = FuelParameters::new(4.0, 1.0);
        let levels = stock.resolve(&g).unwrap();
        let route = search(&g, &stock, "A", "C", params).into_route().unwrap();

        let hops = project_fuel(&g, &levels, &params, &route.path).unwrap();
        assert_eq!(hops.len(), 2);
        assert!(!hops[0].is_refuel_stop());
        assert_eq!(hops[0].fuel_after, 0.0);
        assert!(hops[1].is_refuel_stop());
        assert_eq!(hops[1].refuelled, 4.0);
        assert_eq!(hops[1].cumulative_distance, 8.0);
        assert_eq!(
            hops.iter().filter(|hop| hop.is_refuel_stop()).count(),
            route.stops
        );
    }

    #[test]
    fn projection_fails_when_path_cannot_be_flown() {
        let g = graph(&[("A", "B", 4.0)]);
        let levels = StockLevels::empty(g.node_count());
        let params = FuelParameters::new(1.0, 1.0);

        let err = project_fuel(&g, &levels, &params, &[0, 1]).unwrap_err();
        assert!(matches!(err, Error::InsufficientFuel { .. }));
    }
}
