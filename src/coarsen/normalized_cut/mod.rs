//! Greedy matching by localized normalized cut.
//!
//! One pass over the nodes in a caller-chosen order. Each unmarked node is
//! paired with the unmarked neighbor that maximizes
//!
//! ```text
//! score(u, v) = w(u, v) * (1 / degree(u) + 1 / degree(v))
//! ```
//!
//! or left alone if no neighbor scores above zero. Cluster ids are handed out
//! from a counter in visitation order. Decisions are never revisited.
//!
//! ### Invariants
//! - every node ends in exactly one cluster of size 1 or 2
//! - paired nodes share a positive-weight edge
//! - a marked node is never visited again nor chosen as a partner
//! - ties keep the first neighbor in stored row order (strict `>`)

use crate::coarsen::cluster_map::ClusterMap;
use crate::coarsen::order::VisitOrder;
use crate::error::Result;
use crate::graph::access::marked::MarkedSet;
use crate::graph::{weighted_degrees, RowIndex, WeightedGraph};

const UNASSIGNED: usize = usize::MAX;

/// Normalized-cut score of an edge of weight `weight` between nodes of the
/// given weighted degrees.
///
/// Returns `0.0` whenever either degree is not positive, so isolated or
/// zero-weight nodes can never be matched and `1 / 0` is never evaluated.
#[inline]
pub fn normalized_cut_score(weight: f64, degree_u: f64, degree_v: f64) -> f64 {
    if degree_u <= 0.0 || degree_v <= 0.0 {
        return 0.0;
    }
    weight * (degree_u.recip() + degree_v.recip())
}

/// One primary visit of the pass: the node that opened a cluster and the
/// partner it claimed, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRecord {
    /// The node whose visit opened the cluster.
    pub primary: usize,
    /// The best-scoring unmarked neighbor, if one scored above zero.
    pub partner: Option<usize>,
    /// Id of the cluster opened by this visit.
    pub cluster: usize,
}

/// Result of one matching pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Matching {
    cluster_map: ClusterMap,
    records: Vec<MatchRecord>,
    seed: Option<u64>,
}

impl Matching {
    /// The node → cluster assignment.
    #[inline]
    pub fn cluster_map(&self) -> &ClusterMap {
        &self.cluster_map
    }

    /// Consumes the matching, returning the assignment.
    pub fn into_cluster_map(self) -> ClusterMap {
        self.cluster_map
    }

    /// Primary visits in visitation order; `records()[c].cluster == c`.
    #[inline]
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// Number of clusters.
    #[inline]
    pub fn cluster_count(&self) -> usize {
        self.records.len()
    }

    /// Number of two-node clusters.
    pub fn pair_count(&self) -> usize {
        self.records.iter().filter(|r| r.partner.is_some()).count()
    }

    /// Number of one-node clusters.
    pub fn singleton_count(&self) -> usize {
        self.cluster_count() - self.pair_count()
    }

    /// Seed of the visit order, when it was seeded.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Indexed graph ready for matching passes.
///
/// Building this runs the indexer and degree calculator once; every
/// [`NormalizedCut::run`] then allocates its own marked set and cluster map,
/// so one instance can serve many orders.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `new` | \(O(n + m \log m)\) | Row index plus degree vector |
/// | `run` | \(O(n + m)\) | Single pass, no recursion |
#[derive(Debug, Clone)]
pub struct NormalizedCut {
    index: RowIndex,
    degree: Vec<f64>,
}

impl NormalizedCut {
    /// Indexes `graph` for matching.
    pub fn new(graph: &WeightedGraph) -> Self {
        Self {
            index: RowIndex::from_graph(graph),
            degree: weighted_degrees(graph),
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.index.node_count()
    }

    /// The row index built for this graph.
    #[inline]
    pub fn index(&self) -> &RowIndex {
        &self.index
    }

    /// The weighted degree vector built for this graph.
    #[inline]
    pub fn degrees(&self) -> &[f64] {
        &self.degree
    }

    /// Runs one greedy matching pass in the given order.
    ///
    /// # Errors
    /// Returns [`CoarsenError::InvalidPermutation`](crate::CoarsenError::InvalidPermutation)
    /// if an explicit order is not a permutation of the nodes. Nothing is
    /// allocated for the pass before the order is validated.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            skip_all,
            fields(nodes = self.node_count(), edges = self.index.edge_count())
        )
    )]
    pub fn run(&self, order: &VisitOrder) -> Result<Matching> {
        let n = self.node_count();
        let rid = order.resolve(n)?;

        let mut marked = MarkedSet::new(n);
        let mut map = vec![UNASSIGNED; n];
        let mut records = Vec::new();

        for &tid in &rid {
            if !marked.try_mark(tid) {
                continue;
            }

            let mut best_score = 0.0;
            let mut best = None;
            for (nid, weight) in self.index.neighbors(tid) {
                let score = if marked.is_marked(nid) {
                    0.0
                } else {
                    normalized_cut_score(weight, self.degree[tid], self.degree[nid])
                };
                if score > best_score {
                    best_score = score;
                    best = Some(nid);
                }
            }

            let cluster = records.len();
            map[tid] = cluster;
            if let Some(nid) = best {
                map[nid] = cluster;
                marked.try_mark(nid);
            }
            records.push(MatchRecord {
                primary: tid,
                partner: best,
                cluster,
            });
        }

        debug_assert_eq!(marked.marked_count(), marked.len());
        debug_assert!(map.iter().all(|&c| c != UNASSIGNED));

        let matching = Matching {
            cluster_map: ClusterMap::from_parts(map, records.len()),
            records,
            seed: order.seed(),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            clusters = matching.cluster_count(),
            pairs = matching.pair_count(),
            seed = ?matching.seed(),
            "matching pass complete"
        );

        Ok(matching)
    }
}

/// Coarsens `graph` into clusters of one or two nodes in a single greedy pass.
///
/// Equivalent to `NormalizedCut::new(graph).run(order)` without the pass
/// bookkeeping.
///
/// # Errors
/// Returns [`CoarsenError::InvalidPermutation`](crate::CoarsenError::InvalidPermutation)
/// for an explicit order that is not a permutation of the nodes.
pub fn normalized_cut(graph: &WeightedGraph, order: &VisitOrder) -> Result<ClusterMap> {
    NormalizedCut::new(graph)
        .run(order)
        .map(Matching::into_cluster_map)
}
