//! # `strata` - Level-Synchronous Parallel BFS
//!
//! Counts the nodes reachable from a start node whose payload equals a target
//! value, one BFS level at a time, on a fixed pool of persistent worker
//! threads.
//!
//! ## Architecture
//!
//! ```text
//! graph::GraphView  <- read-only, borrowed by every worker
//!        |
//! bfs::ParallelBfs  <- orchestrator: owns the frontier, merges, terminates
//!        |
//! concurrency::RoundBarrier  <- the only fence between rounds
//!        |
//! workers 0..W      <- static slice of the frontier, private buffers/counters
//! ```
//!
//! 1. **Round barrier** (`RoundBarrier`):
//!    - Two roles: `W` workers and one orchestrator
//!    - Generation counter, so it is safe to reuse for any number of rounds
//!    - Predicates re-checked under the lock; no lost or spurious wakeups
//!
//! 2. **Static partitioning** (`Partitioner`):
//!    - Each worker computes its own frontier ranges from `(len, worker, W)`
//!    - No shared counters on the hot path
//!
//! 3. **Visited markers**:
//!    - One `AtomicBool` per node, `Relaxed`, monotone `false -> true`
//!    - The merge (sort + dedup) is the authoritative duplicate filter
//!
//! 4. **Deterministic frontiers**:
//!    - Every merged frontier is sorted, so the frontier sequence does not
//!      depend on thread scheduling
//!
//! ## Guarantees
//!
//! - **Equivalence**: every engine returns the same count as
//!   [`bfs::sequential_bfs`] for any graph, start, worker count and
//!   partitioning.
//! - **Termination**: at most `node_count` non-empty rounds, because visited
//!   markers are never cleared.
//! - **Cleanup**: workers are scoped threads; they are shut down and joined on
//!   every exit path, including panics in the graph or in an observer.
//!
//! ## Example
//!
//! ```rust
//! use strata::bfs::{run_parallel_bfs, sequential_bfs};
//! use strata::graph::ValueGraph;
//!
//! let graph = ValueGraph::generate(500, 1234, 6, 5).unwrap();
//! let parallel = run_parallel_bfs(&graph, 0, 5, 4).unwrap();
//! assert_eq!(parallel, sequential_bfs(&graph, 0, 5).unwrap());
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod bfs;
pub mod concurrency;
pub mod graph;

pub use bfs::{run_parallel_bfs, sequential_bfs, BfsConfig, BfsError, BfsOutcome, ParallelBfs, Partitioning};
pub use concurrency::RoundBarrier;
pub use graph::{GraphBuilder, GraphError, GraphView, NodeId, NodeValue, ValueGraph};
