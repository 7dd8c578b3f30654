//! Deterministic random graph generators.
//!
//! The random source is an explicit [`FastRand`] value threaded through each
//! call; generators never touch shared or global state, so two calls with the
//! same arguments always produce the same graph.

use std::collections::BTreeSet;

use super::ValueGraph;
use crate::graph::{GraphError, NodeId, NodeValue};

/// A 32-bit linear congruential generator yielding 15-bit outputs.
///
/// `state = 214013 * state + 2531011 (mod 2^32)`, output `(state >> 16) & 0x7FFF`.
/// Small, fast and reproducible across platforms; not suitable for anything
/// that needs statistical quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastRand {
    state: u32,
}

impl FastRand {
    /// Largest value returned by [`next_u15`](Self::next_u15).
    pub const MAX: u32 = 0x7FFF;

    /// Seeds a new generator.
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advances the generator and returns a value in `0..=0x7FFF`.
    #[inline]
    pub fn next_u15(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(214_013).wrapping_add(2_531_011);
        (self.state >> 16) & Self::MAX
    }

    /// Returns a value in `0..bound` built from two 15-bit draws.
    ///
    /// # Panics
    /// Panics if `bound == 0`.
    #[inline]
    pub fn below(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be > 0");
        let hi = self.next_u15() as usize;
        let lo = self.next_u15() as usize;
        ((hi << 15) | lo) % bound
    }

    fn value(&mut self, max_value: NodeValue) -> NodeValue {
        // `max_value >= 1` is checked by the callers, so the result is in `1..=max_value`.
        let v = self.next_u15() % u32::from(max_value.unsigned_abs());
        NodeValue::try_from(v + 1).unwrap_or(max_value)
    }
}

fn check_max_value(max_value: NodeValue) -> Result<(), GraphError> {
    if max_value < 1 {
        return Err(GraphError::InvalidMaxValue { max_value });
    }
    Ok(())
}

impl ValueGraph {
    /// Generates a graph where each upward edge `i -> j` (`i < j`) exists
    /// with probability `percent / 100`, and every node gets a value in
    /// `1..=max_value`.
    ///
    /// Draw order per node `i`: one draw per candidate `j > i`, then one draw
    /// for the value of `i`. The resulting adjacency lists are sorted.
    ///
    /// **Time complexity**: \(O(n^2)\)
    ///
    /// # Errors
    /// [`GraphError::InvalidMaxValue`] if `max_value < 1`.
    pub fn generate(
        node_count: usize,
        seed: u32,
        max_value: NodeValue,
        percent: u32,
    ) -> Result<Self, GraphError> {
        check_max_value(max_value)?;
        let mut rng = FastRand::new(seed);

        let mut adjacency = vec![Vec::new(); node_count];
        let mut values = Vec::with_capacity(node_count);
        for (i, nbrs) in adjacency.iter_mut().enumerate() {
            for j in (i + 1)..node_count {
                if rng.next_u15() % 100 < percent {
                    nbrs.push(j);
                }
            }
            values.push(rng.value(max_value));
        }

        Self::from_adjacency(&adjacency, values)
    }

    /// Generates a graph with exactly `edge_count` distinct upward edges
    /// `i -> j` (`i < j`) chosen uniformly, then assigns values in
    /// `1..=max_value` in node order.
    ///
    /// # Errors
    /// - [`GraphError::InvalidMaxValue`] if `max_value < 1`
    /// - [`GraphError::TooManyEdges`] if `edge_count > n * (n - 1) / 2`
    pub fn generate_sparse(
        node_count: usize,
        edge_count: usize,
        seed: u32,
        max_value: NodeValue,
    ) -> Result<Self, GraphError> {
        check_max_value(max_value)?;
        let max = node_count.saturating_mul(node_count.saturating_sub(1)) / 2;
        if edge_count > max {
            return Err(GraphError::TooManyEdges {
                requested: edge_count,
                max,
            });
        }

        let mut rng = FastRand::new(seed);
        let mut rows: Vec<BTreeSet<NodeId>> = vec![BTreeSet::new(); node_count];
        let mut placed = 0usize;
        while placed < edge_count {
            let a = rng.below(node_count);
            let b = rng.below(node_count);
            if a == b {
                continue;
            }
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            if rows[lo].insert(hi) {
                placed += 1;
            }
        }

        let adjacency: Vec<Vec<NodeId>> = rows
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect();
        let values = (0..node_count).map(|_| rng.value(max_value)).collect();

        Self::from_adjacency(&adjacency, values)
    }
}
