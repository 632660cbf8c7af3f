//! Graph input and sparse indexing.
//!
//! - [`WeightedGraph`]: validated `(row, col, weight)` triplets
//! - [`RowIndex`]: row-grouped CSR index with stable within-row order
//! - [`weighted_degrees`]: column-sum degree vector

pub(crate) mod access;
pub mod compressed;
pub mod degree;
pub mod weighted_graph;

pub use compressed::RowIndex;
pub use degree::weighted_degrees;
pub use weighted_graph::{Edge, WeightedGraph};
