//! Collapsing a graph onto its clusters.

use std::collections::BTreeMap;

use crate::coarsen::cluster_map::ClusterMap;
use crate::error::{CoarsenError, Result};
use crate::graph::{Edge, WeightedGraph};

/// Builds the coarse graph whose nodes are the clusters of `cluster_map`.
///
/// Every fine triplet `(u, v, w)` adds `w` to the coarse triplet
/// `(cluster(u), cluster(v))`. Triplets inside one cluster are dropped unless
/// `keep_self_loops` is set, in which case they accumulate on the diagonal.
/// Output triplets are sorted by `(row, col)`. A symmetric input gives a
/// symmetric output as long as reverse triplets arrive in the same relative
/// order, since weights are summed in input order.
///
/// Sums saturate at [`f64::MAX`], so a valid fine graph always contracts to a
/// valid coarse graph even when heavy edges meet on one coarse pair.
///
/// # Errors
/// Returns [`CoarsenError::InvalidClusterMap`] if the map does not cover
/// exactly the nodes of `graph`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip_all,
        fields(nodes = graph.node_count(), clusters = cluster_map.cluster_count())
    )
)]
pub fn contract(
    graph: &WeightedGraph,
    cluster_map: &ClusterMap,
    keep_self_loops: bool,
) -> Result<WeightedGraph> {
    if cluster_map.len() != graph.node_count() {
        return Err(CoarsenError::invalid_cluster_map(format!(
            "{} entries for {} nodes",
            cluster_map.len(),
            graph.node_count()
        )));
    }

    let map = cluster_map.as_slice();
    let mut merged: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for e in graph.edges() {
        let (cu, cv) = (map[e.row], map[e.col]);
        if cu == cv && !keep_self_loops {
            continue;
        }
        let sum = merged.entry((cu, cv)).or_insert(0.0);
        *sum = (*sum + e.weight).min(f64::MAX);
    }

    let edges: Vec<Edge> = merged
        .into_iter()
        .map(|((row, col), weight)| Edge::new(row, col, weight))
        .collect();

    #[cfg(feature = "tracing")]
    tracing::trace!(coarse_edges = edges.len(), "contracted graph");

    WeightedGraph::new(cluster_map.cluster_count(), edges)
}
