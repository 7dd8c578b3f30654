//! Level-synchronous BFS scheduled by a rayon thread pool.
//!
//! Same rounds, visited flags and merge as the persistent-worker engine, but
//! each level is a rayon `par_chunks` fold/reduce and rayon decides which
//! thread takes which chunk.

use rayon::prelude::*;
use tracing::debug;

use super::config::{check_start, BfsConfig, Partitioning};
use super::{BfsError, BfsOutcome};
use crate::graph::access::visited::VisitedFlags;
use crate::graph::{GraphView, NodeId, NodeValue};

/// Runs the level-synchronous BFS on a dedicated rayon pool of
/// `config.workers` threads.
///
/// Chunked partitioning fixes rayon's chunk length; `EvenSplit` uses one
/// chunk per worker.
///
/// # Errors
/// Configuration errors from [`BfsConfig::validate`],
/// [`BfsError::StartOutOfBounds`], or [`BfsError::ThreadPool`].
pub fn rayon_bfs<G: GraphView + ?Sized>(
    graph: &G,
    start: NodeId,
    search: NodeValue,
    config: &BfsConfig,
) -> Result<BfsOutcome, BfsError> {
    config.validate()?;
    check_start(graph, start)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()
        .map_err(|e| BfsError::ThreadPool {
            detail: e.to_string(),
        })?;

    let visited = VisitedFlags::new(graph.node_count());
    visited.mark(start);

    let (occurrences, rounds) = pool.install(|| {
        let mut frontier = vec![start];
        let mut occurrences = 0usize;
        let mut rounds = 0usize;

        while !frontier.is_empty() {
            let grain = match config.partitioning {
                Partitioning::Chunked { chunk_size } => chunk_size,
                Partitioning::EvenSplit => frontier.len().div_ceil(config.workers),
            };

            let (matches, mut next) = frontier
                .par_chunks(grain)
                .fold(
                    || (0usize, Vec::new()),
                    |(mut matches, mut found), chunk| {
                        for &node in chunk {
                            if graph.value_of(node) == search {
                                matches += 1;
                            }
                            for &v in graph.neighbors_of(node) {
                                if visited.try_visit(v) {
                                    found.push(v);
                                }
                            }
                        }
                        (matches, found)
                    },
                )
                .reduce(
                    || (0usize, Vec::new()),
                    |(a, mut left), (b, mut right)| {
                        left.append(&mut right);
                        (a + b, left)
                    },
                );

            next.sort_unstable();
            next.dedup();
            occurrences += matches;
            rounds += 1;
            frontier = next;
        }

        (occurrences, rounds)
    });

    let outcome = BfsOutcome {
        occurrences,
        rounds,
        visited: visited.count(),
    };
    debug!(?outcome, workers = config.workers, "rayon bfs complete");
    Ok(outcome)
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;
    use crate::bfs::sequential_bfs;
    use crate::graph::ValueGraph;

    #[test]
    fn test_rayon_matches_sequential() {
        let g = ValueGraph::generate(300, 42, 6, 3).unwrap();
        let expected = sequential_bfs(&g, 0, 5).unwrap();
        for workers in [1, 2, 4] {
            for partitioning in [Partitioning::Chunked { chunk_size: 1 }, Partitioning::EvenSplit] {
                let config = BfsConfig::default()
                    .with_workers(workers)
                    .with_partitioning(partitioning);
                assert_eq!(rayon_bfs(&g, 0, 5, &config).unwrap().occurrences, expected);
            }
        }
    }

    #[test]
    fn test_rayon_rejects_zero_workers() {
        let g = ValueGraph::generate(3, 1, 6, 50).unwrap();
        let config = BfsConfig::default().with_workers(0);
        assert_eq!(
            rayon_bfs(&g, 0, 1, &config),
            Err(BfsError::InvalidWorkerCount { workers: 0 })
        );
    }
}
