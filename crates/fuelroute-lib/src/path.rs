use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::graph::{Graph, NodeIndex};

/// Single-source shortest distances and predecessors produced by Dijkstra.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    start: NodeIndex,
    distances: Vec<f64>,
    parents: Vec<Option<NodeIndex>>,
}

impl ShortestPathTree {
    pub fn start(&self) -> NodeIndex {
        self.start
    }

    /// Shortest distance from the start, or `f64::INFINITY` when unreachable.
    pub fn distance_to(&self, node: NodeIndex) -> f64 {
        self.distances.get(node).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, node: NodeIndex) -> bool {
        self.distance_to(node).is_finite()
    }

    /// Walk predecessors back from `node`. Empty when `node` is unreachable.
    pub fn path_to(&self, node: NodeIndex) -> Vec<NodeIndex> {
        if !self.is_reachable(node) {
            return Vec::new();
        }
        reconstruct_path(&self.parents, self.start, node)
    }
}

/// Plain (fuel-agnostic) shortest path between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlainRoute {
    /// Total distance, `f64::INFINITY` when the goal is unreachable.
    pub distance: f64,
    /// Ordered node indices from start to goal; empty when unreachable.
    pub path: Vec<NodeIndex>,
}

impl PlainRoute {
    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Run Dijkstra's algorithm from `start` over every node of the graph.
///
/// Frontier entries with equal distance pop in ascending node order.
pub fn shortest_path_tree(graph: &Graph, start: NodeIndex) -> ShortestPathTree {
    let mut distances = vec![f64::INFINITY; graph.node_count()];
    let mut parents: Vec<Option<NodeIndex>> = vec![None; graph.node_count()];
    let mut queue = BinaryHeap::new();

    if let Some(slot) = distances.get_mut(start) {
        *slot = 0.0;
        queue.push(QueueEntry::new(start, 0.0));
    }

    while let Some(entry) = queue.pop() {
        let current_distance = distances[entry.node];
        // Stale entry: a shorter distance was already settled.
        if entry.cost.0 > current_distance {
            continue;
        }

        for edge in graph.edges(entry.node) {
            let next = edge.target;
            let next_cost = current_distance + edge.distance;
            if next_cost < distances[next] {
                distances[next] = next_cost;
                parents[next] = Some(entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    ShortestPathTree {
        start,
        distances,
        parents,
    }
}

/// Shortest path between `start` and `goal`, ignoring fuel.
pub fn find_shortest_path(graph: &Graph, start: NodeIndex, goal: NodeIndex) -> PlainRoute {
    let tree = shortest_path_tree(graph, start);
    PlainRoute {
        distance: tree.distance_to(goal),
        path: tree.path_to(goal),
    }
}

fn reconstruct_path(
    parents: &[Option<NodeIndex>],
    start: NodeIndex,
    goal: NodeIndex,
) -> Vec<NodeIndex> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatOrd(pub(crate) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeIndex,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeIndex, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
