//! Error types for graph coarsening.
//!
//! Every fallible operation in the crate returns [`Result`]. Validation runs
//! before any per-call state is built, so an error never leaves a partially
//! written cluster map behind.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CoarsenError>;

/// Errors raised while validating input or coarsening a graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoarsenError {
    /// An edge endpoint does not name a node of the graph.
    #[error("edge {edge} references node {node}, but the graph has {node_count} nodes")]
    NodeOutOfBounds {
        /// Position of the offending edge in the input list.
        edge: usize,
        /// The out-of-range endpoint.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },

    /// An edge weight is negative, NaN, or infinite.
    #[error("edge {edge} has invalid weight {weight}; weights must be finite and nonnegative")]
    InvalidWeight {
        /// Position of the offending edge in the input list.
        edge: usize,
        /// The rejected weight.
        weight: f64,
    },

    /// The visit order is not a permutation of `0..n`.
    #[error("invalid permutation: {message}")]
    InvalidPermutation {
        /// What is wrong with the permutation.
        message: String,
    },

    /// A cluster map does not fit the graph or violates a matching invariant.
    #[error("invalid cluster map: {message}")]
    InvalidClusterMap {
        /// Which invariant failed.
        message: String,
    },

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {message}")]
    Serialization {
        /// Message from the underlying serializer.
        message: String,
    },
}

impl CoarsenError {
    /// Creates an invalid-permutation error.
    pub fn invalid_permutation(message: impl Into<String>) -> Self {
        Self::InvalidPermutation {
            message: message.into(),
        }
    }

    /// Creates an invalid-cluster-map error.
    pub fn invalid_cluster_map(message: impl Into<String>) -> Self {
        Self::InvalidClusterMap {
            message: message.into(),
        }
    }

    /// Creates an invalid-configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Returns `true` for errors caused by malformed caller input, as opposed to
    /// configuration or serialization problems.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::NodeOutOfBounds { .. }
                | Self::InvalidWeight { .. }
                | Self::InvalidPermutation { .. }
                | Self::InvalidClusterMap { .. }
        )
    }
}

impl From<serde_json::Error> for CoarsenError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
