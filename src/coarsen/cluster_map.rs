//! The node → cluster assignment produced by a matching pass.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoarsenError, Result};
use crate::graph::WeightedGraph;

/// Cluster id of every node, with ids forming the contiguous range `0..k`.
///
/// Serialized as a plain JSON array of ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub struct ClusterMap {
    map: Vec<usize>,
    cluster_count: usize,
}

impl ClusterMap {
    /// Wraps a raw assignment, checking that the ids are contiguous from 0.
    ///
    /// # Errors
    /// Returns [`CoarsenError::InvalidClusterMap`] if an id is `>= map.len()` or
    /// some id in `0..=max` is unused.
    pub fn from_vec(map: Vec<usize>) -> Result<Self> {
        // Contiguous ids from 0 never exceed `len - 1`.
        if let Some((node, &c)) = map.iter().enumerate().find(|&(_, &c)| c >= map.len()) {
            return Err(CoarsenError::invalid_cluster_map(format!(
                "node {node} has cluster id {c}, but there are only {} nodes",
                map.len()
            )));
        }
        let cluster_count = map.iter().max().map_or(0, |&m| m + 1);
        let mut used = vec![false; cluster_count];
        for &c in &map {
            used[c] = true;
        }
        if let Some(gap) = used.iter().position(|&u| !u) {
            return Err(CoarsenError::invalid_cluster_map(format!(
                "cluster id {gap} is unused but {cluster_count} ids are claimed"
            )));
        }
        Ok(Self { map, cluster_count })
    }

    /// The identity assignment: every node is its own cluster.
    pub fn identity(n: usize) -> Self {
        Self {
            map: (0..n).collect(),
            cluster_count: n,
        }
    }

    pub(crate) fn from_parts(map: Vec<usize>, cluster_count: usize) -> Self {
        debug_assert!(map.iter().all(|&c| c < cluster_count));
        Self { map, cluster_count }
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` for the assignment of an empty graph.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of clusters `k`.
    #[inline]
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Cluster of `node`, or `None` if out of range.
    #[inline]
    pub fn cluster_of(&self, node: usize) -> Option<usize> {
        self.map.get(node).copied()
    }

    /// The raw ids, indexed by node.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.map
    }

    /// Consumes the map, returning the raw ids.
    pub fn into_vec(self) -> Vec<usize> {
        self.map
    }

    /// Size of every cluster, indexed by cluster id.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.cluster_count];
        for &c in &self.map {
            sizes[c] += 1;
        }
        sizes
    }

    /// Members of every cluster in ascending node order, indexed by cluster id.
    pub fn members(&self) -> Vec<Vec<usize>> {
        let mut members = vec![Vec::new(); self.cluster_count];
        for (node, &c) in self.map.iter().enumerate() {
            members[c].push(node);
        }
        members
    }

    /// Two-node clusters as `(smaller, larger)` node pairs, ordered by cluster id.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.members()
            .into_iter()
            .filter_map(|m| match m.as_slice() {
                [a, b] => Some((*a, *b)),
                _ => None,
            })
            .collect()
    }

    /// Nodes that sit alone in their cluster, in ascending order.
    pub fn singletons(&self) -> Vec<usize> {
        let sizes = self.cluster_sizes();
        (0..self.len()).filter(|&n| sizes[self.map[n]] == 1).collect()
    }

    /// Maps every node through `self` and then through `coarser`.
    ///
    /// `coarser` must assign the clusters of `self`, i.e. have one entry per
    /// cluster of `self`.
    ///
    /// # Errors
    /// Returns [`CoarsenError::InvalidClusterMap`] on a length mismatch.
    pub fn compose(&self, coarser: &ClusterMap) -> Result<ClusterMap> {
        if coarser.len() != self.cluster_count {
            return Err(CoarsenError::invalid_cluster_map(format!(
                "cannot compose: {} clusters feed a map over {} nodes",
                self.cluster_count,
                coarser.len()
            )));
        }
        let map = self.map.iter().map(|&c| coarser.map[c]).collect();
        Ok(Self::from_parts(map, coarser.cluster_count))
    }

    /// Checks every matching invariant against the graph it was computed from:
    /// one entry per node, clusters of size 1 or 2, and a positive-weight edge
    /// joining the members of every pair.
    ///
    /// # Errors
    /// Returns [`CoarsenError::InvalidClusterMap`] naming the first violation.
    pub fn validate(&self, graph: &WeightedGraph) -> Result<()> {
        if self.len() != graph.node_count() {
            return Err(CoarsenError::invalid_cluster_map(format!(
                "{} entries for {} nodes",
                self.len(),
                graph.node_count()
            )));
        }

        let positive: HashSet<(usize, usize)> = graph
            .edges()
            .iter()
            .filter(|e| e.weight > 0.0)
            .map(|e| (e.row.min(e.col), e.row.max(e.col)))
            .collect();

        for (cluster, members) in self.members().iter().enumerate() {
            match members.as_slice() {
                [_] => {}
                [a, b] => {
                    if !positive.contains(&(*a, *b)) {
                        return Err(CoarsenError::invalid_cluster_map(format!(
                            "cluster {cluster} pairs nodes {a} and {b} without a positive edge"
                        )));
                    }
                }
                other => {
                    return Err(CoarsenError::invalid_cluster_map(format!(
                        "cluster {cluster} has {} members",
                        other.len()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Checks that ids were handed out in visitation order: walking `rid`, each
    /// cluster seen for the first time must carry the next unused id.
    ///
    /// # Errors
    /// Returns [`CoarsenError::InvalidClusterMap`] at the first out-of-order id,
    /// or [`CoarsenError::InvalidPermutation`] if `rid` does not fit.
    pub fn check_visit_order(&self, rid: &[usize]) -> Result<()> {
        crate::coarsen::order::validate_permutation(rid, self.len())?;
        let mut next = 0usize;
        for &node in rid {
            let c = self.map[node];
            if c == next {
                next += 1;
            } else if c > next {
                return Err(CoarsenError::invalid_cluster_map(format!(
                    "node {node} carries id {c} before id {next} was assigned"
                )));
            }
        }
        Ok(())
    }
}

impl From<ClusterMap> for Vec<usize> {
    fn from(map: ClusterMap) -> Self {
        map.map
    }
}

impl TryFrom<Vec<usize>> for ClusterMap {
    type Error = CoarsenError;

    fn try_from(map: Vec<usize>) -> Result<Self> {
        Self::from_vec(map)
    }
}

impl AsRef<[usize]> for ClusterMap {
    fn as_ref(&self) -> &[usize] {
        &self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path3() -> WeightedGraph {
        WeightedGraph::from_triplets(3, [(0, 1, 1.0), (1, 0, 1.0), (1, 2, 1.0), (2, 1, 1.0)])
            .unwrap()
    }

    #[test]
    fn test_from_vec_counts_clusters() {
        let m = ClusterMap::from_vec(vec![1, 0, 1, 2]).unwrap();
        assert_eq!(m.len(), 4);
        assert_eq!(m.cluster_count(), 3);
        assert_eq!(m.cluster_sizes(), vec![1, 2, 1]);
        assert_eq!(m.members(), vec![vec![1], vec![0, 2], vec![3]]);
        assert_eq!(m.pairs(), vec![(0, 2)]);
        assert_eq!(m.singletons(), vec![1, 3]);
        assert_eq!(m.cluster_of(2), Some(1));
        assert_eq!(m.cluster_of(4), None);
    }

    #[test]
    fn test_from_vec_rejects_gaps() {
        let err = ClusterMap::from_vec(vec![0, 2, 2]).unwrap_err();
        assert!(err.to_string().contains("cluster id 1 is unused"));
    }

    #[test]
    fn test_from_vec_rejects_ids_past_node_count() {
        let err = ClusterMap::from_vec(vec![usize::MAX]).unwrap_err();
        assert!(matches!(err, CoarsenError::InvalidClusterMap { .. }));

        let err = ClusterMap::from_vec(vec![0, 1_000_000_000_000]).unwrap_err();
        assert!(err.to_string().contains("only 2 nodes"));

        assert!(serde_json::from_str::<ClusterMap>("[18446744073709551615]").is_err());
        assert!(serde_json::from_str::<ClusterMap>("[1000000000000]").is_err());
    }

    #[test]
    fn test_empty() {
        let m = ClusterMap::from_vec(Vec::new()).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.cluster_count(), 0);
        assert!(m.pairs().is_empty());
        m.validate(&WeightedGraph::isolated(0)).unwrap();
    }

    #[test]
    fn test_validate_accepts_matching() {
        let m = ClusterMap::from_vec(vec![0, 0, 1]).unwrap();
        m.validate(&path3()).unwrap();
    }

    #[test]
    fn test_validate_rejects_unconnected_pair() {
        let m = ClusterMap::from_vec(vec![0, 1, 0]).unwrap();
        let err = m.validate(&path3()).unwrap_err();
        assert!(err.to_string().contains("without a positive edge"));
    }

    #[test]
    fn test_validate_rejects_zero_weight_pair() {
        let g = WeightedGraph::from_triplets(2, [(0, 1, 0.0), (1, 0, 0.0)]).unwrap();
        let m = ClusterMap::from_vec(vec![0, 0]).unwrap();
        assert!(m.validate(&g).is_err());
    }

    #[test]
    fn test_validate_rejects_triples_and_wrong_length() {
        let m = ClusterMap::from_vec(vec![0, 0, 0]).unwrap();
        assert!(m.validate(&path3()).unwrap_err().to_string().contains("3 members"));

        let m = ClusterMap::from_vec(vec![0, 1]).unwrap();
        assert!(m.validate(&path3()).unwrap_err().to_string().contains("2 entries"));
    }

    #[test]
    fn test_check_visit_order() {
        let m = ClusterMap::from_vec(vec![1, 0, 0]).unwrap();
        m.check_visit_order(&[1, 0, 2]).unwrap();
        m.check_visit_order(&[2, 1, 0]).unwrap();
        assert!(m.check_visit_order(&[0, 1, 2]).is_err());
        assert!(m.check_visit_order(&[0, 1]).is_err());
    }

    #[test]
    fn test_compose() {
        let fine = ClusterMap::from_vec(vec![0, 0, 1, 2, 2]).unwrap();
        let coarse = ClusterMap::from_vec(vec![0, 1, 1]).unwrap();
        let composed = fine.compose(&coarse).unwrap();
        assert_eq!(composed.as_slice(), &[0, 0, 1, 1, 1]);
        assert_eq!(composed.cluster_count(), 2);

        let err = fine.compose(&ClusterMap::identity(2)).unwrap_err();
        assert!(err.to_string().contains("cannot compose"));
    }

    #[test]
    fn test_serde_is_plain_array() {
        let m = ClusterMap::from_vec(vec![0, 0, 1]).unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "[0,0,1]");
        let back: ClusterMap = serde_json::from_str("[1,0]").unwrap();
        assert_eq!(back.cluster_count(), 2);
        assert!(serde_json::from_str::<ClusterMap>("[0,3]").is_err());
    }
}
