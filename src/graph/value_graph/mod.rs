//! A compact CSR (compressed sparse row) graph with one small integer per node.
//!
//! Memory layout:
//! - `offsets`: `Vec<usize>` of length `n + 1` (row offsets)
//! - `edges`: contiguous neighbour ids for each row, in insertion order
//! - `values`: `Vec<NodeValue>` of length `n`
//!
//! Every constructor validates edge bounds, so the [`GraphView`] contract
//! (all neighbour ids `< node_count()`) holds for any `ValueGraph` value.

mod generate;
mod io;

pub use generate::FastRand;

use serde::{Deserialize, Serialize};

use super::{GraphError, GraphView, NodeId, NodeValue};

/// A CSR graph carrying a payload per node.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_adjacency` | \(O(n + m)\) | Builds CSR from adjacency list |
/// | `neighbors` | \(O(1)\) | Returns a slice of outgoing neighbours |
/// | `degree` | \(O(1)\) | Returns out-degree |
/// | `value` | \(O(1)\) | |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GraphRecord", into = "GraphRecord")]
pub struct ValueGraph {
    offsets: Vec<usize>,
    edges: Vec<NodeId>,
    values: Vec<NodeValue>,
}

/// On-disk shape of a [`ValueGraph`].
#[derive(Serialize, Deserialize)]
struct GraphRecord {
    values: Vec<NodeValue>,
    adjacency: Vec<Vec<NodeId>>,
}

impl ValueGraph {
    /// Builds a CSR graph from an adjacency list and per-node values.
    ///
    /// # Errors
    /// - [`GraphError::ValueCountMismatch`] if `values.len() != adjacency.len()`
    /// - [`GraphError::EdgeOutOfBounds`] if any edge targets a node `>= n`
    pub fn from_adjacency(
        adjacency: &[Vec<NodeId>],
        values: Vec<NodeValue>,
    ) -> Result<Self, GraphError> {
        let n = adjacency.len();
        if values.len() != n {
            return Err(GraphError::ValueCountMismatch {
                values: values.len(),
                nodes: n,
            });
        }

        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0);

        let mut total_edges = 0usize;
        for nbrs in adjacency {
            total_edges = total_edges.saturating_add(nbrs.len());
            offsets.push(total_edges);
        }

        let mut edges = Vec::with_capacity(total_edges);
        for (u, nbrs) in adjacency.iter().enumerate() {
            for &v in nbrs {
                if v >= n {
                    return Err(GraphError::EdgeOutOfBounds {
                        from: u,
                        to: v,
                        node_count: n,
                    });
                }
                edges.push(v);
            }
        }

        Ok(Self {
            offsets,
            edges,
            values,
        })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        // `offsets` is length `n + 1` by construction.
        self.offsets.len() - 1
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Outgoing neighbours of `node`.
    ///
    /// # Panics
    /// Panics if `node >= node_count()`.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.edges[self.offsets[node]..self.offsets[node + 1]]
    }

    /// Out-degree of `node`.
    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    /// Payload of `node`.
    #[inline]
    pub fn value(&self, node: NodeId) -> NodeValue {
        self.values[node]
    }

    /// All payloads, indexed by node id.
    pub fn values(&self) -> &[NodeValue] {
        &self.values
    }

    /// Reconstructs the adjacency list.
    pub fn to_adjacency(&self) -> Vec<Vec<NodeId>> {
        (0..self.node_count())
            .map(|u| self.neighbors(u).to_vec())
            .collect()
    }
}

impl GraphView for ValueGraph {
    #[inline]
    fn node_count(&self) -> usize {
        ValueGraph::node_count(self)
    }

    #[inline]
    fn value_of(&self, node: NodeId) -> NodeValue {
        self.value(node)
    }

    #[inline]
    fn neighbors_of(&self, node: NodeId) -> &[NodeId] {
        self.neighbors(node)
    }
}

impl TryFrom<GraphRecord> for ValueGraph {
    type Error = GraphError;

    fn try_from(record: GraphRecord) -> Result<Self, Self::Error> {
        Self::from_adjacency(&record.adjacency, record.values)
    }
}

impl From<ValueGraph> for GraphRecord {
    fn from(graph: ValueGraph) -> Self {
        let adjacency = graph.to_adjacency();
        Self {
            values: graph.values,
            adjacency,
        }
    }
}

/// Incremental builder for small hand-written graphs.
///
/// Nodes start with value `0` and no edges. Bounds are checked once, in
/// [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    adjacency: Vec<Vec<NodeId>>,
    values: Vec<NodeValue>,
}

impl GraphBuilder {
    /// Creates a builder for `node_count` isolated nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            values: vec![0; node_count],
        }
    }

    /// Appends the directed edge `from -> to`.
    ///
    /// # Panics
    /// Panics if `from` is out of bounds.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> &mut Self {
        self.adjacency[from].push(to);
        self
    }

    /// Appends `a -> b` and `b -> a`.
    ///
    /// # Panics
    /// Panics if either endpoint is out of bounds.
    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId) -> &mut Self {
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        self
    }

    /// Sets the payload of `node`.
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    pub fn set_value(&mut self, node: NodeId, value: NodeValue) -> &mut Self {
        self.values[node] = value;
        self
    }

    /// Sets every payload to `value`.
    pub fn fill_values(&mut self, value: NodeValue) -> &mut Self {
        self.values.fill(value);
        self
    }

    /// Freezes the builder into a [`ValueGraph`].
    ///
    /// # Errors
    /// [`GraphError::EdgeOutOfBounds`] if an edge targets a missing node.
    pub fn build(&self) -> Result<ValueGraph, GraphError> {
        ValueGraph::from_adjacency(&self.adjacency, self.values.clone())
    }
}

#[cfg(test)]
mod tests;
