use proptest::prelude::*;
use strata::bfs::{sequential_bfs, sequential_levels, BfsConfig, ParallelBfs, Partitioning};
use strata::graph::{NodeValue, ValueGraph};

/// Arbitrary directed graph with values in `0..4`, plus a valid start node.
fn graph_and_start() -> impl Strategy<Value = (ValueGraph, usize)> {
    (1usize..48).prop_flat_map(|n| {
        (
            proptest::collection::vec((0..n, 0..n), 0..n * 3),
            proptest::collection::vec(0i16..4, n),
            0..n,
        )
            .prop_map(move |(edges, values, start)| {
                let mut adjacency = vec![Vec::new(); n];
                for (u, v) in edges {
                    adjacency[u].push(v);
                }
                let graph = ValueGraph::from_adjacency(&adjacency, values).unwrap();
                (graph, start)
            })
    })
}

fn partitioning() -> impl Strategy<Value = Partitioning> {
    prop_oneof![
        (1usize..16).prop_map(|chunk_size| Partitioning::Chunked { chunk_size }),
        Just(Partitioning::EvenSplit),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn parallel_matches_sequential(
        (graph, start) in graph_and_start(),
        search in 0 as NodeValue..4,
        workers in prop::sample::select(vec![1usize, 2, 4, 8]),
        policy in partitioning(),
    ) {
        let engine = ParallelBfs::new(
            BfsConfig::default().with_workers(workers).with_partitioning(policy),
        ).unwrap();
        let outcome = engine.run(&graph, start, search).unwrap();

        prop_assert_eq!(outcome.occurrences, sequential_bfs(&graph, start, search).unwrap());
        prop_assert!(outcome.rounds <= graph.node_count());
    }

    #[test]
    fn merged_frontiers_are_the_bfs_levels(
        (graph, start) in graph_and_start(),
        workers in 1usize..6,
        policy in partitioning(),
    ) {
        let engine = ParallelBfs::new(
            BfsConfig::default().with_workers(workers).with_partitioning(policy),
        ).unwrap();
        let mut observed = Vec::new();
        engine
            .run_observed(&graph, start, 0, |_, frontier| observed.push(frontier.to_vec()))
            .unwrap();

        let mut levels = sequential_levels(&graph, start).unwrap();
        levels.push(Vec::new());
        prop_assert_eq!(observed, levels);
    }
}
