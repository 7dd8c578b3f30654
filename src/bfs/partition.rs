//! Static frontier partitioning.
//!
//! Each worker derives its own index ranges from the frontier length, its
//! ordinal and the worker count alone. No shared counter is touched, so
//! splitting a frontier costs no synchronization at all.
//!
//! Contract for every [`Partitioner`]: for any `len` and `workers >= 1`, the
//! ranges assigned to workers `0..workers` are pairwise disjoint and their
//! union is exactly `0..len`.

use core::ops::Range;

use super::config::Partitioning;

/// A static frontier partitioning policy.
pub trait Partitioner: Send + Sync {
    /// Appends to `out` the frontier index ranges owned by `worker` (of
    /// `workers`) for a frontier of `len` nodes.
    ///
    /// `out` is a reusable scratch buffer; implementations only push.
    fn assign(&self, len: usize, worker: usize, workers: usize, out: &mut Vec<Range<usize>>);
}

/// Fixed-size chunks dealt round-robin over the workers.
///
/// Worker `t` takes chunks `t, t + W, t + 2W, ...` among the
/// `len / chunk_size` full chunks; the `len % chunk_size` tail goes entirely
/// to worker 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkedRoundRobin {
    chunk_size: usize,
}

impl ChunkedRoundRobin {
    /// # Panics
    /// Panics if `chunk_size == 0`.
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size != 0, "chunk_size must be > 0");
        Self { chunk_size }
    }

    /// Frontier indices per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Partitioner for ChunkedRoundRobin {
    fn assign(&self, len: usize, worker: usize, workers: usize, out: &mut Vec<Range<usize>>) {
        debug_assert!(worker < workers);
        let size = self.chunk_size;
        let full_chunks = len / size;

        let mut chunk = worker;
        while chunk < full_chunks {
            let start = chunk * size;
            out.push(start..start + size);
            chunk += workers;
        }

        let tail = full_chunks * size;
        if worker == 0 && tail < len {
            out.push(tail..len);
        }
    }
}

/// One contiguous slice of `len / workers` indices per worker, recomputed
/// every round; the last worker absorbs the remainder.
///
/// With fewer nodes than workers, each of the first `len` workers gets a
/// single index and the rest get nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvenSplit;

impl Partitioner for EvenSplit {
    fn assign(&self, len: usize, worker: usize, workers: usize, out: &mut Vec<Range<usize>>) {
        debug_assert!(worker < workers);
        let base = len / workers;
        if base == 0 {
            if worker < len {
                out.push(worker..worker + 1);
            }
            return;
        }

        let start = worker * base;
        let end = if worker + 1 == workers {
            len
        } else {
            start + base
        };
        out.push(start..end);
    }
}

impl Partitioner for Partitioning {
    #[inline]
    fn assign(&self, len: usize, worker: usize, workers: usize, out: &mut Vec<Range<usize>>) {
        match *self {
            Partitioning::Chunked { chunk_size } => {
                ChunkedRoundRobin::new(chunk_size).assign(len, worker, workers, out);
            }
            Partitioning::EvenSplit => EvenSplit.assign(len, worker, workers, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(p: &impl Partitioner, len: usize, worker: usize, workers: usize) -> Vec<Range<usize>> {
        let mut out = Vec::new();
        p.assign(len, worker, workers, &mut out);
        out
    }

    #[test]
    fn test_chunked_round_robin_with_tail() {
        // len 11, chunk 2 -> five full chunks, tail [10, 11) to worker 0.
        let p = ChunkedRoundRobin::new(2);
        assert_eq!(ranges(&p, 11, 0, 3), vec![0..2, 6..8, 10..11]);
        assert_eq!(ranges(&p, 11, 1, 3), vec![2..4, 8..10]);
        assert_eq!(ranges(&p, 11, 2, 3), vec![4..6]);
    }

    #[test]
    fn test_chunked_short_frontier_goes_to_worker_zero() {
        let p = ChunkedRoundRobin::new(4);
        assert_eq!(ranges(&p, 3, 0, 2), vec![0..3]);
        assert!(ranges(&p, 3, 1, 2).is_empty());
    }

    #[test]
    fn test_chunked_empty_frontier() {
        let p = ChunkedRoundRobin::new(2);
        for w in 0..4 {
            assert!(ranges(&p, 0, w, 4).is_empty());
        }
    }

    #[test]
    #[should_panic(expected = "chunk_size must be > 0")]
    fn test_chunked_zero_chunk_panics() {
        let _ = ChunkedRoundRobin::new(0);
    }

    #[test]
    fn test_even_split_remainder_to_last() {
        assert_eq!(ranges(&EvenSplit, 10, 0, 3), vec![0..3]);
        assert_eq!(ranges(&EvenSplit, 10, 1, 3), vec![3..6]);
        assert_eq!(ranges(&EvenSplit, 10, 2, 3), vec![6..10]);
    }

    #[test]
    fn test_even_split_fewer_nodes_than_workers() {
        assert_eq!(ranges(&EvenSplit, 2, 0, 4), vec![0..1]);
        assert_eq!(ranges(&EvenSplit, 2, 1, 4), vec![1..2]);
        assert!(ranges(&EvenSplit, 2, 2, 4).is_empty());
        assert!(ranges(&EvenSplit, 2, 3, 4).is_empty());
    }

    #[test]
    fn test_partitioning_enum_delegates() {
        let chunked = Partitioning::Chunked { chunk_size: 3 };
        assert_eq!(ranges(&chunked, 7, 0, 2), vec![0..3, 6..7]);
        assert_eq!(ranges(&chunked, 7, 1, 2), vec![3..6]);
        assert_eq!(ranges(&Partitioning::EvenSplit, 7, 1, 2), vec![3..7]);
    }
}
