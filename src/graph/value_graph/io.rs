//! JSON persistence and DOT rendering.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use super::ValueGraph;
use crate::graph::GraphError;

impl ValueGraph {
    /// Writes the graph to `path` as a `{ "values": [..], "adjacency": [[..], ..] }` record.
    ///
    /// # Errors
    /// Returns [`GraphError::Io`] or [`GraphError::Json`] on failure.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), GraphError> {
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut out, self)?;
        out.flush()?;
        Ok(())
    }

    /// Reads a graph written by [`save_json`](Self::save_json).
    ///
    /// The record goes through the same validation as
    /// [`from_adjacency`](Self::from_adjacency).
    ///
    /// # Errors
    /// Returns [`GraphError::Io`] if the file cannot be read and
    /// [`GraphError::Json`] if it is malformed or describes an invalid graph.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Renders the graph in Graphviz DOT syntax, one `u -> v;` line per edge.
    ///
    /// # Errors
    /// Propagates errors from `out`.
    pub fn write_dot<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "digraph {{")?;
        for u in 0..self.node_count() {
            for v in self.neighbors(u) {
                writeln!(out, "  {u} -> {v};")?;
            }
        }
        writeln!(out, "}}")
    }
}
