//! Repeated match-then-contract coarsening.
//!
//! Each level runs one normalized-cut matching pass on the current graph and
//! contracts it onto the clusters found. Per-level visit orders are seeded from
//! one base seed, so a whole hierarchy replays from [`Hierarchy::seed`].

use rand::Rng;

use crate::coarsen::cluster_map::ClusterMap;
use crate::coarsen::contract::contract;
use crate::coarsen::normalized_cut::NormalizedCut;
use crate::coarsen::order::VisitOrder;
use crate::config::CoarsenConfig;
use crate::error::Result;
use crate::graph::WeightedGraph;

/// Seed of the visit order used at `level`, derived from the base seed.
///
/// Level 0 uses the base seed unchanged.
#[inline]
pub fn seed_for_level(base: u64, level: usize) -> u64 {
    base.wrapping_add((level as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// One coarsening round.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    cluster_map: ClusterMap,
    graph: WeightedGraph,
}

impl Level {
    /// Assignment of the previous level's nodes to this level's nodes.
    #[inline]
    pub fn cluster_map(&self) -> &ClusterMap {
        &self.cluster_map
    }

    /// The contracted graph; its nodes are the clusters of [`Level::cluster_map`].
    #[inline]
    pub fn graph(&self) -> &WeightedGraph {
        &self.graph
    }
}

/// The levels produced by [`Coarsener::coarsen`], finest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    seed: u64,
    node_count: usize,
    levels: Vec<Level>,
}

impl Hierarchy {
    /// Base seed every level's order was derived from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Node count of the original graph.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Levels in the order they were built.
    #[inline]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// The last level, if any level merged something.
    pub fn coarsest(&self) -> Option<&Level> {
        self.levels.last()
    }

    /// Maps every original node to its cluster at the coarsest level.
    ///
    /// With no levels this is the identity map.
    ///
    /// # Errors
    /// Returns [`CoarsenError::InvalidClusterMap`](crate::CoarsenError::InvalidClusterMap)
    /// if consecutive levels do not chain; a hierarchy built by
    /// [`Coarsener::coarsen`] always chains.
    pub fn assignment(&self) -> Result<ClusterMap> {
        self.levels
            .iter()
            .try_fold(ClusterMap::identity(self.node_count), |acc, level| {
                acc.compose(&level.cluster_map)
            })
    }
}

/// Builds coarsening hierarchies from a [`CoarsenConfig`].
#[derive(Debug, Clone, Default)]
pub struct Coarsener {
    config: CoarsenConfig,
}

impl Coarsener {
    /// Creates a coarsener after validating `config`.
    ///
    /// # Errors
    /// Returns [`CoarsenError::InvalidConfig`](crate::CoarsenError::InvalidConfig)
    /// if the configuration is invalid.
    pub fn new(config: CoarsenConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &CoarsenConfig {
        &self.config
    }

    /// Coarsens `graph` for up to `config.levels` rounds.
    ///
    /// Stops early, without recording the round, once a matching pass pairs
    /// no nodes: every later round would see the same graph.
    ///
    /// # Errors
    /// Propagates contraction errors; none occur for a validated graph.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            skip_all,
            fields(nodes = graph.node_count(), levels = self.config.levels)
        )
    )]
    pub fn coarsen(&self, graph: &WeightedGraph) -> Result<Hierarchy> {
        let seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());

        let mut levels: Vec<Level> = Vec::with_capacity(self.config.levels);
        for level in 0..self.config.levels {
            let current = levels.last().map_or(graph, |l| &l.graph);
            let order = VisitOrder::Seeded(seed_for_level(seed, level));
            let matching = NormalizedCut::new(current).run(&order)?;

            if matching.pair_count() == 0 {
                #[cfg(feature = "tracing")]
                tracing::debug!(level, "no pairs matched, stopping");
                break;
            }

            let coarse = contract(current, matching.cluster_map(), self.config.keep_self_loops)?;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                level,
                from = current.node_count(),
                to = coarse.node_count(),
                "level coarsened"
            );

            levels.push(Level {
                cluster_map: matching.into_cluster_map(),
                graph: coarse,
            });
        }

        Ok(Hierarchy {
            seed,
            node_count: graph.node_count(),
            levels,
        })
    }
}
