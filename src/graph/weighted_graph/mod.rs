//! Validated weighted edge-triplet graphs.
//!
//! A [`WeightedGraph`] is the input to every coarsening stage: a node count plus
//! an unordered list of `(row, col, weight)` triplets. The graph is read as
//! undirected, so callers normally supply both directions of every edge;
//! [`WeightedGraph::symmetrized`] fills in missing reverse edges.
//!
//! Construction validates every triplet once. Downstream stages rely on:
//! - every endpoint is `< node_count`
//! - every weight is finite and `>= 0.0`
//!
//! Duplicate `(row, col)` triplets are not merged. Each copy is indexed as its
//! own neighbor and each adds to the column degree, so a graph with duplicates
//! matches differently from one where they were summed into a single entry.
//! Merge them before construction if summed semantics are wanted.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoarsenError, Result};

/// One weighted triplet. Serialized as `[row, col, weight]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(usize, usize, f64)", into = "(usize, usize, f64)")]
pub struct Edge {
    /// Source node.
    pub row: usize,
    /// Target node.
    pub col: usize,
    /// Nonnegative edge weight.
    pub weight: f64,
}

impl Edge {
    /// Creates a triplet.
    #[inline]
    pub const fn new(row: usize, col: usize, weight: f64) -> Self {
        Self { row, col, weight }
    }

    /// Returns `true` if both endpoints are the same node.
    #[inline]
    pub const fn is_self_loop(&self) -> bool {
        self.row == self.col
    }
}

impl From<(usize, usize, f64)> for Edge {
    fn from((row, col, weight): (usize, usize, f64)) -> Self {
        Self { row, col, weight }
    }
}

impl From<Edge> for (usize, usize, f64) {
    fn from(edge: Edge) -> Self {
        (edge.row, edge.col, edge.weight)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGraph {
    num_nodes: usize,
    #[serde(default)]
    edges: Vec<Edge>,
}

/// A graph on nodes `0..node_count` given as weighted edge triplets.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `new` | \(O(m)\) | Validates every triplet |
/// | `has_positive_edge` | \(O(m)\) | Linear scan |
/// | `is_symmetric` | \(O(m)\) | Hash set of directed pairs |
/// | `symmetrized` | \(O(m)\) | Appends missing reverse edges |
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedGraph {
    #[serde(rename = "num_nodes")]
    node_count: usize,
    edges: Vec<Edge>,
}

impl<'de> Deserialize<'de> for WeightedGraph {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawGraph::deserialize(deserializer)?;
        Self::new(raw.num_nodes, raw.edges).map_err(serde::de::Error::custom)
    }
}

impl WeightedGraph {
    /// Builds a graph, validating every triplet.
    ///
    /// # Errors
    /// - [`CoarsenError::NodeOutOfBounds`] if an endpoint is `>= node_count`
    /// - [`CoarsenError::InvalidWeight`] if a weight is negative, NaN, or infinite
    pub fn new(node_count: usize, edges: Vec<Edge>) -> Result<Self> {
        for (i, e) in edges.iter().enumerate() {
            for node in [e.row, e.col] {
                if node >= node_count {
                    return Err(CoarsenError::NodeOutOfBounds {
                        edge: i,
                        node,
                        node_count,
                    });
                }
            }
            if !e.weight.is_finite() || e.weight < 0.0 {
                return Err(CoarsenError::InvalidWeight {
                    edge: i,
                    weight: e.weight,
                });
            }
        }
        Ok(Self { node_count, edges })
    }

    /// Builds a graph from `(row, col, weight)` tuples.
    ///
    /// # Errors
    /// Same as [`WeightedGraph::new`].
    pub fn from_triplets<I>(node_count: usize, triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        Self::new(node_count, triplets.into_iter().map(Edge::from).collect())
    }

    /// A graph with `node_count` isolated nodes.
    pub fn isolated(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
        }
    }

    /// Parses the `{"num_nodes": n, "edges": [[row, col, weight], ...]}` format.
    ///
    /// # Errors
    /// Returns [`CoarsenError::Serialization`] for malformed JSON, including
    /// triplets that fail validation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes to the same JSON format accepted by [`WeightedGraph::from_json_str`].
    ///
    /// # Errors
    /// Returns [`CoarsenError::Serialization`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of stored triplets (each direction counts once).
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// The triplets in input order.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Sum of all stored triplet weights.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Returns `true` if a triplet `u -> v` or `v -> u` with positive weight exists.
    pub fn has_positive_edge(&self, u: usize, v: usize) -> bool {
        self.edges.iter().any(|e| {
            e.weight > 0.0 && ((e.row == u && e.col == v) || (e.row == v && e.col == u))
        })
    }

    /// Returns `true` if every triplet `(u, v)` has a matching `(v, u)` with the same weight.
    pub fn is_symmetric(&self) -> bool {
        let directed: HashSet<(usize, usize, u64)> = self
            .edges
            .iter()
            .map(|e| (e.row, e.col, e.weight.to_bits()))
            .collect();
        self.edges
            .iter()
            .all(|e| directed.contains(&(e.col, e.row, e.weight.to_bits())))
    }

    /// Returns a copy with a reverse triplet appended for every edge that lacks one.
    ///
    /// Input order is kept; the added reverses follow it in the order their
    /// forward edges appeared. Self-loops are never duplicated.
    pub fn symmetrized(&self) -> Self {
        let present: HashSet<(usize, usize)> =
            self.edges.iter().map(|e| (e.row, e.col)).collect();
        let mut edges = self.edges.clone();
        let mut added = HashSet::new();
        for e in &self.edges {
            if e.is_self_loop() || present.contains(&(e.col, e.row)) {
                continue;
            }
            if added.insert((e.col, e.row)) {
                edges.push(Edge::new(e.col, e.row, e.weight));
            }
        }
        Self {
            node_count: self.node_count,
            edges,
        }
    }
}
