//! Errors from graph construction, generation and persistence.

use std::fmt;
use std::io;

use super::NodeId;

/// Errors raised while building, generating, loading or saving a graph.
///
/// Construction errors are detected eagerly so that every [`ValueGraph`]
/// satisfies the [`GraphView`] bounds contract.
///
/// [`ValueGraph`]: super::ValueGraph
/// [`GraphView`]: super::GraphView
#[derive(Debug)]
#[non_exhaustive]
pub enum GraphError {
    /// An edge points past the last node.
    EdgeOutOfBounds {
        from: NodeId,
        to: NodeId,
        node_count: usize,
    },
    /// The value vector and the adjacency list disagree on the node count.
    ValueCountMismatch { values: usize, nodes: usize },
    /// The generator's maximum value must be at least 1.
    InvalidMaxValue { max_value: i16 },
    /// More distinct undirected edges were requested than the graph can hold.
    TooManyEdges { requested: usize, max: usize },
    /// I/O error while reading or writing a graph file.
    Io(io::Error),
    /// Malformed or invalid JSON graph record.
    Json(serde_json::Error),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EdgeOutOfBounds {
                from,
                to,
                node_count,
            } => write!(f, "edge {from}->{to} is out of bounds for n={node_count}"),
            Self::ValueCountMismatch { values, nodes } => {
                write!(f, "{values} values given for {nodes} nodes")
            }
            Self::InvalidMaxValue { max_value } => {
                write!(f, "max value must be at least 1 (got {max_value})")
            }
            Self::TooManyEdges { requested, max } => {
                write!(f, "{requested} edges requested but at most {max} are possible")
            }
            Self::Io(err) => write!(f, "graph I/O error: {err}"),
            Self::Json(err) => write!(f, "invalid graph record: {err}"),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for GraphError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
