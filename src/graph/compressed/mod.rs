//! Compressed sparse graph indexes.
//!
//! These structures are built once per coarsening call from a
//! [`WeightedGraph`](crate::graph::WeightedGraph) and discarded afterwards.

pub mod row_index;

pub use row_index::RowIndex;
