//! Errors reported by the BFS engines before any work starts.

use std::fmt;

use crate::graph::NodeId;

/// Configuration and precondition failures.
///
/// The engines validate everything up front; once threads are spawned a run
/// either completes with a count or propagates a panic from the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BfsError {
    /// The worker count must be at least 1.
    InvalidWorkerCount { workers: usize },
    /// The chunk size of chunked partitioning must be at least 1.
    InvalidChunkSize { chunk_size: usize },
    /// The start node is not a node of the graph.
    StartOutOfBounds { start: NodeId, node_count: usize },
    /// The rayon thread pool could not be built.
    ThreadPool { detail: String },
}

impl fmt::Display for BfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWorkerCount { workers } => {
                write!(f, "worker count must be at least 1 (got {workers})")
            }
            Self::InvalidChunkSize { chunk_size } => {
                write!(f, "chunk size must be at least 1 (got {chunk_size})")
            }
            Self::StartOutOfBounds { start, node_count } => {
                write!(f, "start node {start} is out of bounds for n={node_count}")
            }
            Self::ThreadPool { detail } => write!(f, "failed to build thread pool: {detail}"),
        }
    }
}

impl std::error::Error for BfsError {}
