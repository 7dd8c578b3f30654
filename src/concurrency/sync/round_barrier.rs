//! `RoundBarrier`: a reusable two-role rendezvous for persistent worker pools.
//!
//! Unlike `std::sync::Barrier`, the parties are not symmetric: `parties`
//! workers arrive and park, and a single orchestrator (not counted in
//! `parties`) is woken once all of them have arrived. The orchestrator then
//! owns the shared state until it calls [`RoundBarrier::release`], which
//! starts the next round.
//!
//! ## Generation contract
//!
//! Every release advances a generation counter. A worker snapshots the
//! generation *before* announcing its arrival and only returns once the
//! counter differs from that snapshot. A release that happens before a worker
//! gets to block is therefore never lost, and a worker can never slip into
//! round `k + 1` on the wakeup meant for round `k`.
//!
//! Both wait loops re-check their predicate under the lock, so spurious
//! condvar wakeups and notifications that fire before the waiter blocks are
//! harmless.

use std::sync::PoisonError;

use crate::concurrency::primitives::{Condvar, Mutex, MutexGuard};

/// Result of blocking on a [`RoundBarrier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Rendezvous {
    /// The round completed normally (orchestrator) or the next round was
    /// released (worker).
    Proceed,
    /// A worker unwound without arriving; the round will never complete.
    Abandoned,
}

struct RoundState {
    /// Workers that still have to arrive in the current round.
    remaining: usize,
    generation: u64,
    /// Set by the last arriving worker, consumed by the orchestrator.
    workers_done: bool,
    abandoned: bool,
}

/// A reusable barrier between `parties` workers and one orchestrator.
///
/// Workers call [`worker_done_and_wait`](Self::worker_done_and_wait) at the
/// end of every round. The orchestrator calls
/// [`wait_for_workers`](Self::wait_for_workers) to learn that the round is
/// over and [`release`](Self::release) to start the next one. Calling the
/// operations from the wrong role is a programming error.
pub struct RoundBarrier {
    parties: usize,
    state: Mutex<RoundState>,
    workers_cv: Condvar,
    orchestrator_cv: Condvar,
}

impl RoundBarrier {
    /// Creates a barrier for `parties` workers.
    ///
    /// # Panics
    /// Panics if `parties == 0`.
    pub fn new(parties: usize) -> Self {
        assert!(parties > 0, "a round barrier needs at least one worker");
        Self {
            parties,
            state: Mutex::new(RoundState {
                remaining: parties,
                generation: 0,
                workers_done: false,
                abandoned: false,
            }),
            workers_cv: Condvar::new(),
            orchestrator_cv: Condvar::new(),
        }
    }

    /// Number of workers that must arrive each round.
    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Number of releases issued so far.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Number of workers that have arrived in the current round.
    pub fn arrived(&self) -> usize {
        self.parties - self.lock().remaining
    }

    /// Returns `true` once a worker has abandoned the barrier.
    pub fn is_abandoned(&self) -> bool {
        self.lock().abandoned
    }

    /// Orchestrator only: starts the next round.
    ///
    /// The generation advance is recorded even if no worker is blocked yet.
    ///
    /// # Panics
    /// Panics if called while workers are still inside a round, which means
    /// the orchestrator skipped [`wait_for_workers`](Self::wait_for_workers).
    pub fn release(&self) {
        let mut state = self.lock();
        assert!(
            state.abandoned || state.remaining == self.parties,
            "release() while {} of {} workers are still in the round",
            state.remaining,
            self.parties
        );
        state.generation = state.generation.wrapping_add(1);
        self.workers_cv.notify_all();
    }

    /// Worker only: announces the end of this worker's round and blocks
    /// until the orchestrator releases the next one.
    ///
    /// The last worker to arrive wakes the orchestrator exactly once and
    /// re-arms the arrival counter for the next round.
    pub fn worker_done_and_wait(&self) -> Rendezvous {
        let mut state = self.lock();
        if state.abandoned {
            return Rendezvous::Abandoned;
        }

        let generation = state.generation;
        debug_assert!(state.remaining > 0, "more arrivals than parties");
        state.remaining -= 1;
        if state.remaining == 0 {
            state.remaining = self.parties;
            state.workers_done = true;
            self.orchestrator_cv.notify_one();
        }

        while state.generation == generation && !state.abandoned {
            state = self
                .workers_cv
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        if state.generation == generation {
            Rendezvous::Abandoned
        } else {
            Rendezvous::Proceed
        }
    }

    /// Orchestrator only: blocks until every worker has arrived for the
    /// current round.
    ///
    /// On [`Rendezvous::Proceed`] all workers are parked and the shared round
    /// state may be touched freely until the next [`release`](Self::release).
    pub fn wait_for_workers(&self) -> Rendezvous {
        let mut state = self.lock();
        while !state.workers_done && !state.abandoned {
            state = self
                .orchestrator_cv
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        if state.workers_done {
            state.workers_done = false;
            Rendezvous::Proceed
        } else {
            Rendezvous::Abandoned
        }
    }

    /// Marks the barrier as permanently broken and wakes every waiter.
    ///
    /// Called by a worker that is unwinding and will never arrive again.
    pub fn abandon(&self) {
        let mut state = self.lock();
        state.abandoned = true;
        self.orchestrator_cv.notify_all();
        self.workers_cv.notify_all();
    }

    fn lock(&self) -> MutexGuard<'_, RoundState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for RoundBarrier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.lock();
        f.debug_struct("RoundBarrier")
            .field("parties", &self.parties)
            .field("remaining", &state.remaining)
            .field("generation", &state.generation)
            .field("abandoned", &state.abandoned)
            .finish()
    }
}

/// Abandons the barrier if dropped while the owning thread is panicking.
///
/// Workers hold one of these for their whole lifetime so a panic in the
/// middle of a round cannot leave the orchestrator blocked forever.
pub(crate) struct AbandonOnUnwind<'a>(pub(crate) &'a RoundBarrier);

impl Drop for AbandonOnUnwind<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.abandon();
        }
    }
}

#[cfg(loom)]
mod loom_tests {
    use super::*;
    use loom::sync::atomic::{AtomicUsize, Ordering};
    use loom::sync::Arc;
    use loom::thread;

    /// Two workers, two rounds: the orchestrator always sees the full round.
    #[test]
    fn two_workers_two_rounds() {
        loom::model(|| {
            let barrier = Arc::new(RoundBarrier::new(2));
            let work = Arc::new(AtomicUsize::new(0));

            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let barrier = barrier.clone();
                    let work = work.clone();
                    thread::spawn(move || {
                        for _ in 0..2 {
                            work.fetch_add(1, Ordering::Relaxed);
                            assert_eq!(barrier.worker_done_and_wait(), Rendezvous::Proceed);
                        }
                    })
                })
                .collect();

            assert_eq!(barrier.wait_for_workers(), Rendezvous::Proceed);
            assert_eq!(work.load(Ordering::Relaxed), 2);
            barrier.release();

            assert_eq!(barrier.wait_for_workers(), Rendezvous::Proceed);
            assert_eq!(work.load(Ordering::Relaxed), 4);
            barrier.release();

            for h in handles {
                h.join().unwrap();
            }
        });
    }

    /// A release issued before the worker blocks is not lost.
    #[test]
    fn early_release_is_observed() {
        loom::model(|| {
            let barrier = Arc::new(RoundBarrier::new(1));
            let b = barrier.clone();

            let h = thread::spawn(move || b.worker_done_and_wait());

            assert_eq!(barrier.wait_for_workers(), Rendezvous::Proceed);
            barrier.release();

            assert_eq!(h.join().unwrap(), Rendezvous::Proceed);
        });
    }

    /// Abandonment wakes the orchestrator even without a full round.
    #[test]
    fn abandon_wakes_orchestrator() {
        loom::model(|| {
            let barrier = Arc::new(RoundBarrier::new(2));
            let b1 = barrier.clone();
            let b2 = barrier.clone();

            let h1 = thread::spawn(move || b1.abandon());
            let h2 = thread::spawn(move || b2.worker_done_and_wait());

            assert_eq!(barrier.wait_for_workers(), Rendezvous::Abandoned);
            h1.join().unwrap();
            assert_eq!(h2.join().unwrap(), Rendezvous::Abandoned);
        });
    }
}
