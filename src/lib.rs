//! # `normcut` - Greedy Normalized-Cut Graph Coarsening
//!
//! Partitions the nodes of a weighted graph into clusters of one or two nodes
//! in a single greedy pass, pairing each node with the neighbor that maximizes
//! a localized normalized-cut score. The resulting cluster map feeds pooling
//! stages and multilevel graph algorithms.
//!
//! ## Pipeline
//!
//! 1. **Indexing** ([`RowIndex`]): edge triplets are grouped by row with a
//!    stable sort, giving O(1) neighbor ranges whose column order matches the
//!    input.
//! 2. **Degrees** ([`weighted_degrees`]): the weighted degree of every node.
//! 3. **Matching** ([`NormalizedCut`]): nodes are visited in a [`VisitOrder`];
//!    each unmarked node claims its best unmarked neighbor, scored as
//!    `w * (1 / deg(u) + 1 / deg(v))`, and opens the next cluster id.
//!
//! ## Guarantees
//!
//! - Every node belongs to exactly one cluster, of size 1 or 2.
//! - Paired nodes share a positive-weight edge.
//! - Cluster ids are contiguous from 0 and assigned in visitation order.
//! - The same graph and the same order always produce the same clusters.
//!   Random orders are always seeded, and the seed is reported.
//!
//! ## Example
//!
//! ```rust
//! use normcut::{normalized_cut, VisitOrder, WeightedGraph};
//!
//! let graph = WeightedGraph::from_triplets(
//!     4,
//!     [(0, 1, 1.0), (1, 0, 1.0), (2, 3, 1.0), (3, 2, 1.0)],
//! )
//! .unwrap();
//!
//! let clusters = normalized_cut(&graph, &VisitOrder::Explicit(vec![0, 1, 2, 3])).unwrap();
//! assert_eq!(clusters.as_slice(), &[0, 0, 1, 1]);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod coarsen;
pub mod config;
pub mod error;
pub mod graph;

#[cfg(feature = "parallel")]
pub use coarsen::{coarsen_batch, hierarchy_batch};
pub use coarsen::{
    contract, normalized_cut, ClusterMap, Coarsener, Hierarchy, Level, MatchRecord, Matching,
    NormalizedCut, VisitOrder,
};
pub use config::CoarsenConfig;
pub use error::{CoarsenError, Result};
pub use graph::{weighted_degrees, Edge, RowIndex, WeightedGraph};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
