//! Weighted degree of every node.

use crate::graph::weighted_graph::WeightedGraph;

/// Returns the weighted degree of every node: `degree[i]` is the sum of the
/// weights of all triplets whose column is `i`.
///
/// For a symmetric graph this equals the row sum. Isolated nodes get exactly
/// `0.0`. Nothing here guards against a later `1.0 / degree`; the matching
/// engine checks for non-positive degrees itself.
pub fn weighted_degrees(graph: &WeightedGraph) -> Vec<f64> {
    let mut degree = vec![0.0; graph.node_count()];
    for e in graph.edges() {
        degree[e.col] += e.weight;
    }
    degree
}
