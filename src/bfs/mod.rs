//! Breadth-first "count matching nodes" engines.
//!
//! - [`ParallelBfs`]: the level-synchronous engine on a fixed pool of
//!   persistent workers coordinated by a [`RoundBarrier`].
//! - [`sequential_bfs`]: the FIFO oracle.
//! - `rayon_bfs` (feature `parallel`): the same algorithm scheduled by rayon.
//!
//! All engines count the nodes reachable from `start` (including `start`)
//! whose value equals the searched value, and all agree on the answer for
//! every graph, start node and configuration.
//!
//! [`RoundBarrier`]: crate::concurrency::RoundBarrier

pub mod config;
pub mod engine;
pub mod error;
pub mod partition;
#[cfg(feature = "parallel")]
pub mod pool;
pub mod sequential;

pub use config::{BfsConfig, Partitioning, CHUNK_SIZE};
pub use engine::{run_parallel_bfs, ParallelBfs};
pub use error::BfsError;
pub use partition::{ChunkedRoundRobin, EvenSplit, Partitioner};
#[cfg(feature = "parallel")]
pub use pool::rayon_bfs;
pub use sequential::{sequential_bfs, sequential_levels};

/// Summary of one BFS run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BfsOutcome {
    /// Reachable nodes whose value matched.
    pub occurrences: usize,
    /// Number of expansion rounds (non-empty frontiers processed).
    pub rounds: usize,
    /// Number of nodes reached, including the start node.
    pub visited: usize,
}
