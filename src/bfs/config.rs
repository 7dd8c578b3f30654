//! Engine configuration, defaults and validation.

use serde::{Deserialize, Serialize};

use super::BfsError;
use crate::graph::{GraphView, NodeId, NodeValue};

/// Frontier indices per chunk for chunked partitioning.
pub const CHUNK_SIZE: usize = 2;
/// Default start node of the CLI.
pub const DEFAULT_START_NODE: NodeId = 0;
/// Default searched value of the CLI.
pub const DEFAULT_SEARCH_VALUE: NodeValue = 5;
/// Default maximum node value of generated graphs.
pub const DEFAULT_MAX_VALUE: NodeValue = 6;
/// Default generator seed.
pub const DEFAULT_SEED: u32 = 1234;
/// Default edge probability (percent) of generated graphs.
pub const DEFAULT_PERCENT: u32 = 35;

/// How a frontier is split between workers each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Partitioning {
    /// Fixed-size chunks dealt round-robin; the tail goes to worker 0.
    Chunked {
        /// Frontier indices per chunk; must be non-zero.
        chunk_size: usize,
    },
    /// One contiguous, roughly equal slice per worker; the last worker takes
    /// the remainder.
    EvenSplit,
}

impl Default for Partitioning {
    fn default() -> Self {
        Self::Chunked {
            chunk_size: CHUNK_SIZE,
        }
    }
}

/// Configuration of the persistent-worker engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BfsConfig {
    /// Number of persistent worker threads.
    pub workers: usize,
    /// Frontier partitioning policy.
    pub partitioning: Partitioning,
}

impl Default for BfsConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
            partitioning: Partitioning::default(),
        }
    }
}

impl BfsConfig {
    /// Sets the number of workers.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the partitioning policy.
    #[must_use]
    pub fn with_partitioning(mut self, partitioning: Partitioning) -> Self {
        self.partitioning = partitioning;
        self
    }

    /// Shorthand for chunked partitioning with `chunk_size`.
    #[must_use]
    pub fn with_chunk_size(self, chunk_size: usize) -> Self {
        self.with_partitioning(Partitioning::Chunked { chunk_size })
    }

    /// Checks the configuration on its own.
    ///
    /// # Errors
    /// [`BfsError::InvalidWorkerCount`] or [`BfsError::InvalidChunkSize`].
    pub fn validate(&self) -> Result<(), BfsError> {
        if self.workers == 0 {
            return Err(BfsError::InvalidWorkerCount {
                workers: self.workers,
            });
        }
        if let Partitioning::Chunked { chunk_size: 0 } = self.partitioning {
            return Err(BfsError::InvalidChunkSize { chunk_size: 0 });
        }
        Ok(())
    }
}

/// Checks that `start` names a node of `graph`.
///
/// # Errors
/// [`BfsError::StartOutOfBounds`], which includes every start on an empty graph.
pub fn check_start<G: GraphView + ?Sized>(graph: &G, start: NodeId) -> Result<(), BfsError> {
    let node_count = graph.node_count();
    if start >= node_count {
        return Err(BfsError::StartOutOfBounds { start, node_count });
    }
    Ok(())
}
