use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Wire representation of a graph: node -> (neighbour -> distance).
///
/// Using ordered maps keeps node interning independent of hash seeds, which
/// in turn keeps search tie-breaks stable across runs.
pub type AdjacencyMap = BTreeMap<String, BTreeMap<String, f64>>;

/// Dense identifier for an interned node.
///
/// Indices are assigned in ascending node-name order, so comparing two
/// indices gives the same answer as comparing the names they stand for.
pub type NodeIndex = usize;

/// Minimum similarity score for a node name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Directed edge within the routing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeIndex,
    pub distance: f64,
}

#[derive(Debug)]
struct GraphInner {
    names: Vec<String>,
    index: HashMap<String, NodeIndex>,
    adjacency: Vec<Vec<Edge>>,
}

/// Immutable weighted graph shared by the searches.
///
/// Cloning is cheap: the adjacency lives behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Graph {
    inner: Arc<GraphInner>,
}

impl Graph {
    /// Build a graph from an adjacency map.
    ///
    /// Nodes that only appear as edge targets become nodes without outgoing
    /// edges. Every weight must be finite and non-negative.
    pub fn from_adjacency(adjacency: &AdjacencyMap) -> Result<Self> {
        let mut names: BTreeSet<&str> = BTreeSet::new();
        for (node, neighbours) in adjacency {
            names.insert(node.as_str());
            for (neighbour, &weight) in neighbours {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(Error::InvalidEdgeWeight {
                        from: node.clone(),
                        to: neighbour.clone(),
                        weight,
                    });
                }
                names.insert(neighbour.as_str());
            }
        }

        let names: Vec<String> = names.into_iter().map(str::to_string).collect();
        let index: HashMap<String, NodeIndex> = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        let mut edges = vec![Vec::new(); names.len()];
        for (node, neighbours) in adjacency {
            let from = index[node.as_str()];
            edges[from] = neighbours
                .iter()
                .map(|(neighbour, &distance)| Edge {
                    target: index[neighbour.as_str()],
                    distance,
                })
                .collect();
        }

        tracing::debug!(
            nodes = names.len(),
            edges = edges.iter().map(Vec::len).sum::<usize>(),
            "graph built"
        );

        Ok(Self {
            inner: Arc::new(GraphInner {
                names,
                index,
                adjacency: edges,
            }),
        })
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.inner.names.len()
    }

    /// Number of directed edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.inner.adjacency.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.index.contains_key(name)
    }

    /// Look up the interned index of a node name.
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.inner.index.get(name).copied()
    }

    /// Resolve a node name, failing with suggestions when it is absent.
    pub fn resolve(&self, name: &str) -> Result<NodeIndex> {
        self.node_index(name).ok_or_else(|| Error::NodeNotFound {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(name, 3),
        })
    }

    /// Name of an interned node.
    ///
    /// # Panics
    ///
    /// Panics if `index` was not produced by this graph.
    pub fn node_name(&self, index: NodeIndex) -> &str {
        &self.inner.names[index]
    }

    /// Iterate over node names in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.inner.names.iter().map(String::as_str)
    }

    /// Outgoing edges of an interned node.
    pub fn edges(&self, index: NodeIndex) -> &[Edge] {
        self.inner
            .adjacency
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Outgoing `(neighbour, distance)` pairs of a named node.
    pub fn neighbours(&self, name: &str) -> Result<Vec<(&str, f64)>> {
        let index = self.resolve(name)?;
        Ok(self
            .edges(index)
            .iter()
            .map(|edge| (self.node_name(edge.target), edge.distance))
            .collect())
    }

    /// Weight of the direct edge `from -> to`, if present.
    pub fn edge_weight(&self, from: NodeIndex, to: NodeIndex) -> Option<f64> {
        self.edges(from)
            .iter()
            .find(|edge| edge.target == to)
            .map(|edge| edge.distance)
    }

    /// Sum of edge weights along `path`, or `None` if a step is not an edge.
    pub fn path_distance(&self, path: &[NodeIndex]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.edge_weight(pair[0], pair[1]))
            .sum()
    }

    /// Translate a path of indices into node names.
    pub fn path_names(&self, path: &[NodeIndex]) -> Vec<String> {
        path.iter()
            .map(|&index| self.node_name(index).to_string())
            .collect()
    }

    /// Node names most similar to `name`, best first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .nodes()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate)
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            inner: Arc::new(GraphInner {
                names: Vec::new(),
                index: HashMap::new(),
                adjacency: Vec::new(),
            }),
        }
    }
}
