//! Graph coarsening by greedy normalized-cut matching.
//!
//! - [`normalized_cut`]: one matching pass, clusters of one or two nodes
//! - [`contract`]: collapse a graph onto its clusters
//! - [`Coarsener`]: repeated match-then-contract levels
//! - `batch` (feature `parallel`): independent graphs on the rayon pool

#[cfg(feature = "parallel")]
pub mod batch;
pub mod cluster_map;
pub mod contract;
pub mod multilevel;
pub mod normalized_cut;
pub mod order;

#[cfg(feature = "parallel")]
pub use batch::{coarsen_batch, hierarchy_batch};
pub use cluster_map::ClusterMap;
pub use contract::contract;
pub use multilevel::{seed_for_level, Coarsener, Hierarchy, Level};
pub use normalized_cut::{
    normalized_cut, normalized_cut_score, MatchRecord, Matching, NormalizedCut,
};
pub use order::{seeded_permutation, validate_permutation, VisitOrder};
