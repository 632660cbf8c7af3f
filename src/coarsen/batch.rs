//! Parallel coarsening of independent graphs.
//!
//! Every job owns its own marked set and cluster map, so jobs share nothing
//! and run on the rayon global pool without coordination.

use rayon::prelude::*;

use crate::coarsen::cluster_map::ClusterMap;
use crate::coarsen::multilevel::{Coarsener, Hierarchy};
use crate::coarsen::normalized_cut::normalized_cut;
use crate::coarsen::order::VisitOrder;
use crate::error::Result;
use crate::graph::WeightedGraph;

/// Runs one matching pass per `(graph, order)` job in parallel.
///
/// Results are returned in job order; a failing job does not affect the others.
pub fn coarsen_batch(jobs: &[(WeightedGraph, VisitOrder)]) -> Vec<Result<ClusterMap>> {
    jobs.par_iter()
        .map(|(graph, order)| normalized_cut(graph, order))
        .collect()
}

/// Builds one hierarchy per graph in parallel with a shared [`Coarsener`].
///
/// With an unseeded configuration each graph draws its own seed.
pub fn hierarchy_batch(graphs: &[WeightedGraph], coarsener: &Coarsener) -> Vec<Result<Hierarchy>> {
    graphs
        .par_iter()
        .map(|graph| coarsener.coarsen(graph))
        .collect()
}
