//! Node visitation orders for the matching pass.
//!
//! The greedy pass is order-sensitive, so the order is always an explicit
//! input. Random orders are derived from a seed the caller can see and replay;
//! [`VisitOrder::from_entropy`] only draws that seed.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CoarsenError, Result};

/// How the matching pass walks the nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitOrder {
    /// Nodes `0..n` in index order.
    #[default]
    Identity,
    /// A caller-supplied permutation of `0..n`.
    Explicit(Vec<usize>),
    /// A uniformly random permutation derived from this seed.
    Seeded(u64),
}

impl VisitOrder {
    /// A seeded order whose seed is drawn from the thread RNG.
    ///
    /// The result is still a [`VisitOrder::Seeded`], so the run can be
    /// reproduced from [`VisitOrder::seed`].
    pub fn from_entropy() -> Self {
        Self::Seeded(rand::thread_rng().gen())
    }

    /// The seed behind a [`VisitOrder::Seeded`] order.
    pub fn seed(&self) -> Option<u64> {
        match self {
            Self::Seeded(seed) => Some(*seed),
            _ => None,
        }
    }

    /// Materializes the order for a graph of `n` nodes.
    ///
    /// # Errors
    /// Returns [`CoarsenError::InvalidPermutation`] if an explicit order is not a
    /// permutation of `0..n`.
    pub fn resolve(&self, n: usize) -> Result<Vec<usize>> {
        match self {
            Self::Identity => Ok((0..n).collect()),
            Self::Explicit(rid) => {
                validate_permutation(rid, n)?;
                Ok(rid.clone())
            }
            Self::Seeded(seed) => Ok(seeded_permutation(n, *seed)),
        }
    }
}

impl From<Vec<usize>> for VisitOrder {
    fn from(rid: Vec<usize>) -> Self {
        Self::Explicit(rid)
    }
}

/// A uniformly random permutation of `0..n` (Fisher-Yates over `ChaCha8Rng`).
///
/// Identical `n` and `seed` always give the identical permutation.
pub fn seeded_permutation(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut rid: Vec<usize> = (0..n).collect();
    rid.shuffle(&mut rng);
    rid
}

/// Checks that `rid` holds every index of `0..n` exactly once.
///
/// # Errors
/// Returns [`CoarsenError::InvalidPermutation`] naming the first problem found:
/// wrong length, an out-of-range entry, or a duplicate.
pub fn validate_permutation(rid: &[usize], n: usize) -> Result<()> {
    if rid.len() != n {
        return Err(CoarsenError::invalid_permutation(format!(
            "expected {n} entries, got {}",
            rid.len()
        )));
    }
    let mut seen = vec![false; n];
    for (pos, &node) in rid.iter().enumerate() {
        if node >= n {
            return Err(CoarsenError::invalid_permutation(format!(
                "entry {node} at position {pos} is out of range for {n} nodes"
            )));
        }
        if std::mem::replace(&mut seen[node], true) {
            return Err(CoarsenError::invalid_permutation(format!(
                "entry {node} at position {pos} is a duplicate"
            )));
        }
    }
    Ok(())
}
