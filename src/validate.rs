//! Structural checks run before coloring: no self-loops, every edge recorded
//! at both endpoints.

use crate::graph::{Graph, GraphError};
use std::collections::HashSet;

// ============================================================================
// Public API
// ============================================================================

/// Returns `true` iff some vertex appears in its own neighbor sequence.
pub fn contains_loop(graph: &Graph) -> bool {
    (0..graph.vertex_count()).any(|v| graph.neighbors(v).any(|w| w == v))
}

/// Returns `true` iff every directed edge `(a, b)` has its reciprocal `(b, a)`.
///
/// Isolated vertices are trivially consistent.
///
/// # Panics
/// Panics if the graph contains a self-loop; callers must rule that out first.
pub fn is_symmetric(graph: &Graph) -> bool {
    assert!(
        !contains_loop(graph),
        "symmetry check requires a loop-free graph"
    );
    let directed = directed_edges(graph);
    directed.iter().all(|&(a, b)| directed.contains(&(b, a)))
}

/// Checks both invariants and reports the first violation found.
///
/// Vertices are scanned in index order, so the reported vertex or edge is the
/// lowest-indexed offender.
///
/// # Errors
/// [`GraphError::SelfLoop`] or [`GraphError::MissingReciprocal`].
pub fn check_graph(graph: &Graph) -> Result<(), GraphError> {
    if let Some(vertex) = (0..graph.vertex_count()).find(|&v| graph.neighbors(v).any(|w| w == v)) {
        return Err(GraphError::SelfLoop { vertex });
    }

    let directed = directed_edges(graph);
    for from in 0..graph.vertex_count() {
        for to in graph.neighbors(from) {
            if !directed.contains(&(to, from)) {
                return Err(GraphError::MissingReciprocal { from, to });
            }
        }
    }
    Ok(())
}

// ============================================================================
// Internal
// ============================================================================

fn directed_edges(graph: &Graph) -> HashSet<(usize, usize)> {
    (0..graph.vertex_count())
        .flat_map(|v| graph.neighbors(v).map(move |w| (v, w)))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: usize) -> Graph {
        let mut g = Graph::with_vertices(n);
        for v in 1..n {
            g.add_edge(v - 1, v);
        }
        g
    }

    #[test]
    fn empty_graph_is_valid() {
        let g = Graph::with_vertices(0);
        assert!(!contains_loop(&g));
        assert!(is_symmetric(&g));
        assert!(check_graph(&g).is_ok());
    }

    #[test]
    fn isolated_vertices_are_symmetric() {
        let g = Graph::with_vertices(7);
        assert!(is_symmetric(&g));
    }

    #[test]
    fn path_graph_is_symmetric() {
        let g = path(5);
        assert!(!contains_loop(&g));
        assert!(is_symmetric(&g));
        assert!(check_graph(&g).is_ok());
    }

    #[test]
    fn self_loop_is_detected() {
        let mut g = path(3);
        g.add_edge_directed(1, 1);
        assert!(contains_loop(&g));
        assert_eq!(check_graph(&g), Err(GraphError::SelfLoop { vertex: 1 }));
    }

    #[test]
    fn one_sided_edge_breaks_symmetry() {
        let mut g = path(4);
        g.add_edge_directed(3, 0);
        assert!(!is_symmetric(&g));
        assert_eq!(
            check_graph(&g),
            Err(GraphError::MissingReciprocal { from: 3, to: 0 })
        );
    }

    #[test]
    #[should_panic(expected = "loop-free")]
    fn symmetry_check_rejects_loops() {
        let mut g = Graph::with_vertices(2);
        g.add_edge_directed(0, 0);
        let _ = is_symmetric(&g);
    }
}
