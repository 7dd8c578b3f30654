//! Tests for the value graph, its generators and persistence.

use super::*;

fn diamond() -> ValueGraph {
    // 0 -> 1, 2 ; 1 -> 3 ; 2 -> 3
    ValueGraph::from_adjacency(&[vec![1, 2], vec![3], vec![3], vec![]], vec![4, 5, 6, 7])
        .unwrap()
}

#[test]
fn test_from_adjacency_layout() {
    let g = diamond();
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 4);
    assert_eq!(g.neighbors(0), &[1, 2]);
    assert_eq!(g.neighbors(3), &[] as &[usize]);
    assert_eq!(g.degree(0), 2);
    assert_eq!(g.value(2), 6);
    assert_eq!(g.to_adjacency(), vec![vec![1, 2], vec![3], vec![3], vec![]]);
}

#[test]
fn test_graph_view_matches_inherent_accessors() {
    let g = diamond();
    let view: &dyn GraphView = &g;
    assert_eq!(view.node_count(), 4);
    assert_eq!(view.value_of(1), 5);
    assert_eq!(view.neighbors_of(0), &[1, 2]);
}

#[test]
fn test_empty_graph() {
    let g = ValueGraph::from_adjacency(&[], Vec::new()).unwrap();
    assert_eq!(g.node_count(), 0);
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn test_out_of_bounds_edge_rejected() {
    let err = ValueGraph::from_adjacency(&[vec![1], vec![2]], vec![0, 0]).unwrap_err();
    assert!(matches!(
        err,
        GraphError::EdgeOutOfBounds {
            from: 1,
            to: 2,
            node_count: 2
        }
    ));
}

#[test]
fn test_value_count_mismatch_rejected() {
    let err = ValueGraph::from_adjacency(&[vec![], vec![]], vec![1]).unwrap_err();
    assert!(matches!(
        err,
        GraphError::ValueCountMismatch { values: 1, nodes: 2 }
    ));
}

#[test]
fn test_builder_undirected_edges() {
    let g = GraphBuilder::new(3)
        .add_undirected_edge(0, 1)
        .add_edge(1, 2)
        .set_value(2, 9)
        .build()
        .unwrap();
    assert_eq!(g.neighbors(0), &[1]);
    assert_eq!(g.neighbors(1), &[0, 2]);
    assert_eq!(g.values(), &[0, 0, 9]);
}

#[test]
fn test_builder_reports_bad_edge_at_build() {
    let mut b = GraphBuilder::new(2);
    b.add_edge(0, 5);
    assert!(matches!(b.build(), Err(GraphError::EdgeOutOfBounds { .. })));
}

#[test]
fn test_fast_rand_sequence() {
    let mut rng = FastRand::new(1234);
    let draws: Vec<u32> = (0..4).map(|_| rng.next_u15()).collect();
    assert_eq!(draws, vec![4068, 213, 12761, 8758]);
}

#[test]
fn test_fast_rand_below_stays_in_range() {
    let mut rng = FastRand::new(7);
    for bound in [1, 2, 3, 100, 40_000, 1 << 20] {
        for _ in 0..100 {
            assert!(rng.below(bound) < bound);
        }
    }
}

#[test]
fn test_generate_known_small_graph() {
    let g = ValueGraph::generate(4, 1234, 6, 35).unwrap();
    assert_eq!(g.to_adjacency(), vec![vec![2], vec![3], vec![3], vec![]]);
    assert_eq!(g.values(), &[5, 5, 1, 3]);
}

#[test]
fn test_generate_is_deterministic() {
    let a = ValueGraph::generate(200, 99, 6, 10).unwrap();
    let b = ValueGraph::generate(200, 99, 6, 10).unwrap();
    let c = ValueGraph::generate(200, 100, 6, 10).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_generate_edges_point_upward_and_values_in_range() {
    let g = ValueGraph::generate(150, 5, 4, 50).unwrap();
    for u in 0..g.node_count() {
        assert!(g.neighbors(u).iter().all(|&v| v > u));
        assert!((1..=4).contains(&g.value(u)));
    }
}

#[test]
fn test_generate_percent_extremes() {
    let empty = ValueGraph::generate(20, 1, 3, 0).unwrap();
    assert_eq!(empty.edge_count(), 0);

    let full = ValueGraph::generate(20, 1, 3, 100).unwrap();
    assert_eq!(full.edge_count(), 20 * 19 / 2);
}

#[test]
fn test_generate_rejects_non_positive_max_value() {
    assert!(matches!(
        ValueGraph::generate(3, 1, 0, 50),
        Err(GraphError::InvalidMaxValue { max_value: 0 })
    ));
}

#[test]
fn test_generate_sparse_exact_edge_count() {
    let g = ValueGraph::generate_sparse(100, 250, 1234, 6).unwrap();
    assert_eq!(g.edge_count(), 250);
    for u in 0..g.node_count() {
        let nbrs = g.neighbors(u);
        assert!(nbrs.windows(2).all(|w| w[0] < w[1]), "sorted and unique");
        assert!(nbrs.iter().all(|&v| v > u));
    }
}

#[test]
fn test_generate_sparse_too_many_edges() {
    assert!(matches!(
        ValueGraph::generate_sparse(4, 7, 1, 6),
        Err(GraphError::TooManyEdges { requested: 7, max: 6 })
    ));
    // Exactly the complete graph is fine.
    assert_eq!(ValueGraph::generate_sparse(4, 6, 1, 6).unwrap().edge_count(), 6);
}

#[test]
fn test_json_round_trip_preserves_graph() {
    let g = ValueGraph::generate(60, 3, 6, 20).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");

    g.save_json(&path).unwrap();
    assert_eq!(ValueGraph::load_json(&path).unwrap(), g);
}

#[test]
fn test_load_rejects_invalid_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"values":[1,2],"adjacency":[[1],[7]]}"#).unwrap();

    let err = ValueGraph::load_json(&path).unwrap_err();
    assert!(matches!(err, GraphError::Json(_)));
    assert!(err.to_string().contains("out of bounds"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ValueGraph::load_json(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, GraphError::Io(_)));
}

#[test]
fn test_write_dot() {
    let mut out = Vec::new();
    diamond().write_dot(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "digraph {\n  0 -> 1;\n  0 -> 2;\n  1 -> 3;\n  2 -> 3;\n}\n"
    );
}
