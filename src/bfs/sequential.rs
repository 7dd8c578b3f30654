//! Single-threaded FIFO BFS, used as the correctness oracle.

use std::collections::VecDeque;

use super::config::check_start;
use super::BfsError;
use crate::graph::{GraphView, NodeId, NodeValue};

/// Counts nodes reachable from `start` whose value equals `search`, using a
/// plain queue.
///
/// **Time complexity**: \(O(n + m)\)
///
/// # Errors
/// [`BfsError::StartOutOfBounds`] if `start` is not a node of `graph`.
pub fn sequential_bfs<G: GraphView + ?Sized>(
    graph: &G,
    start: NodeId,
    search: NodeValue,
) -> Result<usize, BfsError> {
    check_start(graph, start)?;

    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::with_capacity(64);
    let mut occurrences = 0usize;

    visited[start] = true;
    queue.push_back(start);

    while let Some(u) = queue.pop_front() {
        if graph.value_of(u) == search {
            occurrences += 1;
        }
        for &v in graph.neighbors_of(u) {
            if !visited[v] {
                visited[v] = true;
                queue.push_back(v);
            }
        }
    }

    Ok(occurrences)
}

/// Returns the BFS levels reachable from `start`, each sorted ascending.
///
/// Level 0 is `[start]`; the empty terminal level is not included. This is
/// the frontier sequence the level-synchronous engines must reproduce.
///
/// # Errors
/// [`BfsError::StartOutOfBounds`] if `start` is not a node of `graph`.
pub fn sequential_levels<G: GraphView + ?Sized>(
    graph: &G,
    start: NodeId,
) -> Result<Vec<Vec<NodeId>>, BfsError> {
    check_start(graph, start)?;

    let mut visited = vec![false; graph.node_count()];
    visited[start] = true;
    let mut levels = Vec::new();
    let mut level = vec![start];

    while !level.is_empty() {
        let mut next = Vec::new();
        for &u in &level {
            for &v in graph.neighbors_of(u) {
                if !visited[v] {
                    visited[v] = true;
                    next.push(v);
                }
            }
        }
        next.sort_unstable();
        levels.push(std::mem::replace(&mut level, next));
    }

    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn test_sequential_counts_reachable_matches() {
        let g = GraphBuilder::new(5)
            .add_edge(0, 1)
            .add_edge(1, 2)
            .add_edge(3, 4)
            .set_value(0, 1)
            .set_value(2, 1)
            .set_value(4, 1)
            .build()
            .unwrap();
        assert_eq!(sequential_bfs(&g, 0, 1), Ok(2));
        assert_eq!(sequential_bfs(&g, 3, 1), Ok(1));
        assert_eq!(sequential_bfs(&g, 0, 0), Ok(1));
    }

    #[test]
    fn test_sequential_levels() {
        let g = GraphBuilder::new(5)
            .add_undirected_edge(0, 2)
            .add_undirected_edge(0, 1)
            .add_undirected_edge(1, 3)
            .add_undirected_edge(2, 4)
            .build()
            .unwrap();
        assert_eq!(
            sequential_levels(&g, 0),
            Ok(vec![vec![0], vec![1, 2], vec![3, 4]])
        );
    }

    #[test]
    fn test_sequential_rejects_bad_start() {
        let g = GraphBuilder::new(2).build().unwrap();
        assert_eq!(
            sequential_bfs(&g, 2, 0),
            Err(BfsError::StartOutOfBounds {
                start: 2,
                node_count: 2
            })
        );
    }
}
