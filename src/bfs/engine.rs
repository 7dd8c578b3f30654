//! Level-synchronous parallel BFS on a fixed pool of persistent workers.
//!
//! ## Round protocol
//!
//! ```text
//! orchestrator                         workers 0..W
//! ------------                         ------------
//! frontier = [start]                   (spawned once, start immediately)
//!                                      expand own slice of frontier
//! wait_for_workers()  <--------------  worker_done_and_wait()
//! merge partials -> sorted frontier           (parked)
//! frontier empty? -> stop
//! release()  ------------------------>  expand own slice of frontier
//! ...
//! shutdown = true; release()  ------->  observe shutdown, exit
//! join, sum per-worker match counts
//! ```
//!
//! The barrier is the only ordering fence. While workers are parked the
//! orchestrator has the frontier and every partial buffer to itself; while
//! they run, it touches nothing shared.
//!
//! ## Shared state
//!
//! - `frontier`: written only by the orchestrator between rounds, read by all
//!   workers during a round. The `RwLock` is therefore never contended.
//! - `partials[w]`: worker `w`'s private discoveries for the current round,
//!   drained by the orchestrator during the merge. Cache-padded so workers
//!   never false-share.
//! - `visited`: one atomic flag per node, the only state written concurrently
//!   by several workers. See [`VisitedFlags`].
//! - Match counters never leave their worker until the final join.

use std::sync::{Mutex, PoisonError, RwLock};

use crossbeam_utils::CachePadded;
use tracing::{debug, debug_span, trace};

use super::config::{check_start, BfsConfig};
use super::partition::Partitioner;
use super::{BfsError, BfsOutcome};
use crate::concurrency::primitives::{AtomicBool, Ordering};
use crate::concurrency::sync::round_barrier::AbandonOnUnwind;
use crate::concurrency::sync::{Rendezvous, RoundBarrier};
use crate::graph::access::visited::VisitedFlags;
use crate::graph::{GraphView, NodeId, NodeValue};

/// The persistent-worker BFS engine.
///
/// A validated [`BfsConfig`]; every [`run`](Self::run) spawns its own worker
/// pool and barrier and tears both down before returning.
///
/// # Example
///
/// ```rust
/// use strata::bfs::{BfsConfig, ParallelBfs};
/// use strata::graph::GraphBuilder;
///
/// let graph = GraphBuilder::new(3)
///     .add_undirected_edge(0, 1)
///     .add_undirected_edge(1, 2)
///     .fill_values(7)
///     .build()
///     .unwrap();
///
/// let engine = ParallelBfs::new(BfsConfig::default().with_workers(2)).unwrap();
/// let outcome = engine.run(&graph, 0, 7).unwrap();
/// assert_eq!(outcome.occurrences, 3);
/// ```
#[derive(Debug, Clone)]
pub struct ParallelBfs {
    config: BfsConfig,
}

impl ParallelBfs {
    /// Creates an engine after validating `config`.
    ///
    /// # Errors
    /// See [`BfsConfig::validate`].
    pub fn new(config: BfsConfig) -> Result<Self, BfsError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine's configuration.
    pub fn config(&self) -> &BfsConfig {
        &self.config
    }

    /// Counts nodes reachable from `start` whose value equals `search`.
    ///
    /// # Errors
    /// [`BfsError::StartOutOfBounds`] if `start` is not a node of `graph`.
    ///
    /// # Panics
    /// Propagates a panic raised by `graph` inside a worker.
    pub fn run<G: GraphView + ?Sized>(
        &self,
        graph: &G,
        start: NodeId,
        search: NodeValue,
    ) -> Result<BfsOutcome, BfsError> {
        self.run_observed(graph, start, search, |_, _| {})
    }

    /// Like [`run`](Self::run), calling `observer(round, frontier)` from the
    /// orchestrator for the seed frontier (round 0) and after every merge,
    /// including the final empty frontier.
    ///
    /// # Errors
    /// [`BfsError::StartOutOfBounds`] if `start` is not a node of `graph`.
    ///
    /// # Panics
    /// Propagates a panic raised by `graph` inside a worker or by `observer`.
    /// Workers are shut down and joined on every exit path.
    pub fn run_observed<G, F>(
        &self,
        graph: &G,
        start: NodeId,
        search: NodeValue,
        mut observer: F,
    ) -> Result<BfsOutcome, BfsError>
    where
        G: GraphView + ?Sized,
        F: FnMut(usize, &[NodeId]),
    {
        check_start(graph, start)?;

        let workers = self.config.workers;
        let span = debug_span!(
            "parallel_bfs",
            workers,
            start,
            search,
            partitioning = ?self.config.partitioning
        );
        let _enter = span.enter();

        let shared = Shared::new(graph, &self.config.partitioning, search, workers, start);
        observer(0, &[start]);

        let (rounds, occurrences) = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let shared = &shared;
                    scope.spawn(move || shared.worker_loop(worker))
                })
                .collect();

            let rounds = {
                let _stop = StopOnDrop(&shared);
                shared.drive(&mut observer)
            };

            let mut occurrences = 0usize;
            for handle in handles {
                match handle.join() {
                    Ok(matches) => occurrences += matches,
                    Err(payload) => std::panic::resume_unwind(payload),
                }
            }
            (rounds, occurrences)
        });

        let outcome = BfsOutcome {
            occurrences,
            rounds,
            visited: shared.visited.count(),
        };
        debug!(?outcome, "parallel bfs complete");
        Ok(outcome)
    }
}

/// Convenience entry point: chunked partitioning with the default chunk size.
///
/// # Errors
/// [`BfsError::InvalidWorkerCount`] if `workers == 0`,
/// [`BfsError::StartOutOfBounds`] if `start` is not a node of `graph`.
pub fn run_parallel_bfs<G: GraphView + ?Sized>(
    graph: &G,
    start: NodeId,
    search: NodeValue,
    workers: usize,
) -> Result<usize, BfsError> {
    let config = BfsConfig::default().with_workers(workers);
    Ok(ParallelBfs::new(config)?.run(graph, start, search)?.occurrences)
}

/// State shared by the orchestrator and its workers for one run.
struct Shared<'a, G: ?Sized, P> {
    graph: &'a G,
    partitioner: &'a P,
    search: NodeValue,
    workers: usize,
    frontier: RwLock<Vec<NodeId>>,
    partials: Vec<CachePadded<Mutex<Vec<NodeId>>>>,
    visited: VisitedFlags,
    barrier: RoundBarrier,
    shutdown: AtomicBool,
}

impl<'a, G, P> Shared<'a, G, P>
where
    G: GraphView + ?Sized,
    P: Partitioner,
{
    fn new(graph: &'a G, partitioner: &'a P, search: NodeValue, workers: usize, start: NodeId) -> Self {
        let visited = VisitedFlags::new(graph.node_count());
        visited.mark(start);
        Self {
            graph,
            partitioner,
            search,
            workers,
            frontier: RwLock::new(vec![start]),
            partials: (0..workers)
                .map(|_| CachePadded::new(Mutex::new(Vec::new())))
                .collect(),
            visited,
            barrier: RoundBarrier::new(workers),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Orchestrator loop. Returns the number of completed rounds.
    fn drive<F: FnMut(usize, &[NodeId])>(&self, observer: &mut F) -> usize {
        let mut rounds = 0usize;
        loop {
            // Workers start on the seed frontier without a release.
            if rounds > 0 {
                self.barrier.release();
            }
            if self.barrier.wait_for_workers() == Rendezvous::Abandoned {
                return rounds;
            }
            rounds += 1;

            let mut frontier = self.frontier.write().unwrap_or_else(PoisonError::into_inner);
            self.merge_into(&mut frontier);
            trace!(round = rounds, frontier = frontier.len(), "merged frontier");
            observer(rounds, &frontier);

            if frontier.is_empty() {
                return rounds;
            }
        }
    }

    /// Replaces `frontier` with the sorted, deduplicated union of all partial
    /// buffers, leaving each buffer empty with its capacity intact.
    fn merge_into(&self, frontier: &mut Vec<NodeId>) {
        frontier.clear();
        for slot in &self.partials {
            let mut partial = slot.lock().unwrap_or_else(PoisonError::into_inner);
            frontier.append(&mut partial);
        }
        frontier.sort_unstable();
        frontier.dedup();
    }

    /// Worker body. Returns this worker's match count for the whole run.
    fn worker_loop(&self, worker: usize) -> usize {
        let _abandon = AbandonOnUnwind(&self.barrier);
        let mut matches = 0usize;
        let mut ranges = Vec::new();

        while !self.shutdown.load(Ordering::Acquire) {
            {
                let frontier = self.frontier.read().unwrap_or_else(PoisonError::into_inner);
                let mut discovered = self.partials[worker]
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);

                self.partitioner
                    .assign(frontier.len(), worker, self.workers, &mut ranges);
                for range in ranges.drain(..) {
                    for &node in &frontier[range] {
                        matches += self.expand(node, &mut discovered);
                    }
                }
            }

            if self.barrier.worker_done_and_wait() == Rendezvous::Abandoned {
                break;
            }
        }

        trace!(worker, matches, "worker exiting");
        matches
    }

    /// Visits one frontier node: returns 1 on a value match and pushes every
    /// neighbour this call marked first.
    #[inline]
    fn expand(&self, node: NodeId, discovered: &mut Vec<NodeId>) -> usize {
        for &next in self.graph.neighbors_of(node) {
            // Mark before publishing so a concurrent discoverer skips it.
            if self.visited.try_visit(next) {
                discovered.push(next);
            }
        }
        usize::from(self.graph.value_of(node) == self.search)
    }
}

/// Signals shutdown and wakes the parked workers when dropped, so the scope
/// can join them whether the orchestrator returns or unwinds.
struct StopOnDrop<'s, 'a, G: ?Sized, P>(&'s Shared<'a, G, P>);

impl<G: ?Sized, P> Drop for StopOnDrop<'_, '_, G, P> {
    fn drop(&mut self) {
        self.0.shutdown.store(true, Ordering::Release);
        self.0.barrier.release();
    }
}
