use std::collections::{BTreeMap, HashSet};

use normcut::{contract, ClusterMap, NormalizedCut, VisitOrder, WeightedGraph};
use petgraph::graph::{NodeIndex, UnGraph};
use proptest::prelude::*;

/// A symmetric graph without duplicate pairs plus a random visit order.
fn graph_and_order() -> impl Strategy<Value = (WeightedGraph, Vec<usize>)> {
    (1usize..40)
        .prop_flat_map(|n| {
            let weight = prop_oneof![1 => Just(0.0), 4 => 0.01f64..5.0];
            let edges = proptest::collection::vec((0..n, 0..n, weight), 0..3 * n);
            let order = Just((0..n).collect::<Vec<usize>>()).prop_shuffle();
            (Just(n), edges, order)
        })
        .prop_map(|(n, raw, order)| {
            let mut pairs = BTreeMap::new();
            for (u, v, w) in raw {
                pairs.entry((u.min(v), u.max(v))).or_insert(w);
            }
            let triplets: Vec<(usize, usize, f64)> = pairs
                .into_iter()
                .flat_map(|((u, v), w)| {
                    if u == v {
                        vec![(u, u, w)]
                    } else {
                        vec![(u, v, w), (v, u, w)]
                    }
                })
                .collect();
            (WeightedGraph::from_triplets(n, triplets).unwrap(), order)
        })
}

fn to_petgraph(graph: &WeightedGraph) -> UnGraph<(), f64> {
    let mut g = UnGraph::<(), f64>::with_capacity(graph.node_count(), graph.edge_count());
    for _ in 0..graph.node_count() {
        g.add_node(());
    }
    for e in graph.edges() {
        if e.row < e.col && e.weight > 0.0 {
            g.add_edge(NodeIndex::new(e.row), NodeIndex::new(e.col), e.weight);
        }
    }
    g
}

proptest! {
    #[test]
    fn test_clusters_are_total_contiguous_and_small((graph, rid) in graph_and_order()) {
        let map = NormalizedCut::new(&graph)
            .run(&VisitOrder::Explicit(rid.clone()))
            .unwrap()
            .into_cluster_map();

        prop_assert_eq!(map.len(), graph.node_count());
        let rebuilt = ClusterMap::from_vec(map.as_slice().to_vec()).unwrap();
        prop_assert_eq!(rebuilt.cluster_count(), map.cluster_count());

        let sizes = map.cluster_sizes();
        prop_assert!(sizes.iter().all(|&s| s == 1 || s == 2));
        prop_assert_eq!(sizes.iter().sum::<usize>(), graph.node_count());

        prop_assert!(map.validate(&graph).is_ok());
        prop_assert!(map.check_visit_order(&rid).is_ok());
    }

    #[test]
    fn test_pairs_are_positive_edges_in_petgraph((graph, rid) in graph_and_order()) {
        let pg = to_petgraph(&graph);
        let map = NormalizedCut::new(&graph)
            .run(&VisitOrder::Explicit(rid))
            .unwrap()
            .into_cluster_map();

        for (a, b) in map.pairs() {
            let edge = pg.find_edge(NodeIndex::new(a), NodeIndex::new(b));
            prop_assert!(edge.is_some(), "pair ({}, {}) has no edge", a, b);
            prop_assert!(pg[edge.unwrap()] > 0.0);
        }
    }

    #[test]
    fn test_matching_is_valid_and_maximal((graph, rid) in graph_and_order()) {
        let pg = to_petgraph(&graph);
        let matching = NormalizedCut::new(&graph)
            .run(&VisitOrder::Explicit(rid))
            .unwrap();
        let map = matching.cluster_map();

        let primaries: HashSet<usize> = matching.records().iter().map(|r| r.primary).collect();
        let mut partners = HashSet::new();
        for record in matching.records() {
            if let Some(p) = record.partner {
                prop_assert!(partners.insert(p), "node {} matched twice", p);
                prop_assert!(!primaries.contains(&p), "node {} is primary and partner", p);
            }
        }
        prop_assert_eq!(primaries.len() + partners.len(), graph.node_count());

        // A lone primary found every positive-weight neighbor already taken,
        // i.e. in a cluster opened before its own.
        for record in matching.records().iter().filter(|r| r.partner.is_none()) {
            let u = record.primary;
            for v in pg.neighbors(NodeIndex::new(u)) {
                let v = v.index();
                prop_assert!(map.cluster_of(v).unwrap() < record.cluster);
            }
        }
    }

    #[test]
    fn test_explicit_orders_are_deterministic((graph, rid) in graph_and_order()) {
        let engine = NormalizedCut::new(&graph);
        let order = VisitOrder::Explicit(rid);
        prop_assert_eq!(engine.run(&order).unwrap(), engine.run(&order).unwrap());
    }

    #[test]
    fn test_contraction_conserves_weight((graph, rid) in graph_and_order()) {
        let map = NormalizedCut::new(&graph)
            .run(&VisitOrder::Explicit(rid))
            .unwrap()
            .into_cluster_map();

        let with_loops = contract(&graph, &map, true).unwrap();
        prop_assert!((with_loops.total_weight() - graph.total_weight()).abs() < 1e-9);

        let without = contract(&graph, &map, false).unwrap();
        let intra: f64 = graph
            .edges()
            .iter()
            .filter(|e| map.cluster_of(e.row) == map.cluster_of(e.col))
            .map(|e| e.weight)
            .sum();
        prop_assert!((without.total_weight() + intra - graph.total_weight()).abs() < 1e-9);
        prop_assert!(without.is_symmetric());
    }
}
