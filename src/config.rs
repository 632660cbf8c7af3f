//! Coarsening configuration.
//!
//! Configuration is plain data with serde support so it can be loaded from a
//! JSON file (the CLI's `--config`) or built in code with the `with_*` methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoarsenError, Result};

/// Upper bound on `levels`. A level can at most halve the node count, so 64
/// levels reduce any graph to a single node.
pub const MAX_LEVELS: usize = 64;

/// Settings for [`Coarsener`](crate::Coarsener).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoarsenConfig {
    /// Base seed for the per-level visit orders. `None` draws one from entropy
    /// when coarsening starts; the drawn seed is reported on the hierarchy.
    pub seed: Option<u64>,
    /// Number of match-then-contract rounds.
    pub levels: usize,
    /// Keep intra-cluster weight as self-loops on the coarse graph.
    pub keep_self_loops: bool,
}

impl Default for CoarsenConfig {
    fn default() -> Self {
        Self {
            seed: None,
            levels: 1,
            keep_self_loops: false,
        }
    }
}

impl CoarsenConfig {
    /// Sets the base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of levels.
    #[must_use]
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// Sets whether intra-cluster weight survives contraction.
    #[must_use]
    pub fn with_self_loops(mut self, keep: bool) -> Self {
        self.keep_self_loops = keep;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    /// Returns [`CoarsenError::InvalidConfig`] if `levels` exceeds [`MAX_LEVELS`].
    pub fn validate(&self) -> Result<()> {
        if self.levels > MAX_LEVELS {
            return Err(CoarsenError::invalid_config(format!(
                "levels must be at most {MAX_LEVELS}, got {}",
                self.levels
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    /// Returns [`CoarsenError::Serialization`] for malformed JSON or unknown
    /// fields, and [`CoarsenError::InvalidConfig`] if validation fails.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`CoarsenError::Serialization`] if the file cannot be read or
    /// parsed, and [`CoarsenError::InvalidConfig`] if validation fails.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoarsenError::serialization(format!("reading {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }
}
