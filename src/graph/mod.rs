//! Read-only graph views consumed by the traversal engines.
//!
//! The engines only need three things from a graph: its size, a small integer
//! payload per node, and each node's ordered neighbour list. [`GraphView`]
//! captures exactly that; [`ValueGraph`] is the owned CSR implementation used
//! by the CLI, tests and benches.

pub(crate) mod access;
pub mod error;
pub mod value_graph;

pub use error::GraphError;
pub use value_graph::{FastRand, GraphBuilder, ValueGraph};

/// Node identifier: an index in `0..node_count()`.
pub type NodeId = usize;

/// Payload stored on every node.
pub type NodeValue = i16;

/// Immutable graph access required by the BFS engines.
///
/// Implementations are shared by reference across worker threads for the
/// whole run, hence the `Sync` bound. Every id returned by
/// [`neighbors_of`](Self::neighbors_of) must be `< node_count()`.
pub trait GraphView: Sync {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Payload of `node`.
    fn value_of(&self, node: NodeId) -> NodeValue;

    /// Ordered outgoing neighbours of `node`.
    fn neighbors_of(&self, node: NodeId) -> &[NodeId];
}

impl<G: GraphView + ?Sized> GraphView for &G {
    #[inline]
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    #[inline]
    fn value_of(&self, node: NodeId) -> NodeValue {
        (**self).value_of(node)
    }

    #[inline]
    fn neighbors_of(&self, node: NodeId) -> &[NodeId] {
        (**self).neighbors_of(node)
    }
}
