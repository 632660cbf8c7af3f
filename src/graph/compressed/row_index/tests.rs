//! Tests for the row index.

use super::*;

fn graph(n: usize, triplets: &[(usize, usize, f64)]) -> WeightedGraph {
    WeightedGraph::from_triplets(n, triplets.iter().copied()).unwrap()
}

#[test]
fn test_rows_are_grouped() {
    // Unsorted input: 2->0, 0->1, 1->2, 0->2
    let g = graph(3, &[(2, 0, 1.0), (0, 1, 2.0), (1, 2, 3.0), (0, 2, 4.0)]);
    let idx = RowIndex::from_graph(&g);

    assert_eq!(idx.node_count(), 3);
    assert_eq!(idx.edge_count(), 4);
    assert_eq!(idx.offsets(), &[0, 2, 3, 4]);
    assert_eq!(idx.range(0), (0, 2));
    assert_eq!(idx.range(1), (2, 1));
    assert_eq!(idx.range(2), (3, 1));
}

#[test]
fn test_within_row_order_follows_input() {
    // Columns for row 0 arrive as 3, 1, 2 and must stay that way.
    let g = graph(4, &[(0, 3, 1.0), (1, 0, 1.0), (0, 1, 1.0), (0, 2, 1.0)]);
    let idx = RowIndex::from_graph(&g);

    let row0: Vec<usize> = idx.neighbors(0).map(|(c, _)| c).collect();
    assert_eq!(row0, vec![3, 1, 2]);
    let row1: Vec<(usize, f64)> = idx.neighbors(1).collect();
    assert_eq!(row1, vec![(0, 1.0)]);
}

#[test]
fn test_nodes_without_rows_get_empty_ranges() {
    // Node 1 and the trailing node 4 never appear as a row.
    let g = graph(5, &[(2, 0, 1.0), (0, 2, 1.0), (3, 0, 0.5)]);
    let idx = RowIndex::from_graph(&g);

    assert_eq!(idx.out_degree(1), 0);
    assert_eq!(idx.neighbors(1).count(), 0);
    assert_eq!(idx.out_degree(4), 0);
    assert_eq!(idx.range(4), (3, 0));
    assert_eq!(idx.offsets().len(), 6);
}

#[test]
fn test_empty_graph() {
    let idx = RowIndex::from_graph(&WeightedGraph::isolated(0));
    assert_eq!(idx.node_count(), 0);
    assert_eq!(idx.edge_count(), 0);
    assert_eq!(idx.offsets(), &[0]);
}

#[test]
fn test_weights_stay_parallel_to_cols() {
    let g = graph(3, &[(1, 2, 7.0), (0, 1, 5.0), (1, 0, 5.0), (2, 1, 7.0)]);
    let idx = RowIndex::from_graph(&g);
    assert_eq!(idx.cols(), &[1, 2, 0, 1]);
    assert_eq!(idx.weights(), &[5.0, 7.0, 5.0, 7.0]);
}

#[test]
fn test_duplicate_triplets_stay_separate_neighbors() {
    // Row 0 repeats (0, 1); both copies are indexed in input order.
    let g = graph(3, &[(0, 1, 1.0), (0, 2, 1.5), (0, 1, 1.0)]);
    let idx = RowIndex::from_graph(&g);
    assert_eq!(idx.out_degree(0), 3);
    let n0: Vec<_> = idx.neighbors(0).collect();
    assert_eq!(n0, vec![(1, 1.0), (2, 1.5), (1, 1.0)]);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_range_out_of_bounds_panics() {
    let idx = RowIndex::from_graph(&WeightedGraph::isolated(2));
    let _ = idx.range(2);
}
