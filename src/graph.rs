//! Adjacency store: one owned neighbor sequence per vertex.

use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while building or checking a graph.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GraphError {
    /// Storage for the neighbor sequences could not be reserved.
    #[error("failed to allocate adjacency storage for {vertices} vertices")]
    Allocation {
        /// Number of vertices requested.
        vertices: usize,
    },
    /// Grid side length must be at least 1.
    #[error("grid size must be at least 1, got {size}")]
    InvalidSize {
        /// Requested side length.
        size: usize,
    },
    /// Edge probability outside `[0, 1]`.
    #[error("edge probability must be in [0, 1], got {probability}")]
    InvalidProbability {
        /// Requested probability.
        probability: f64,
    },
    /// A vertex lists itself as a neighbor.
    #[error("self-loop detected at vertex {vertex}")]
    SelfLoop {
        /// The vertex with a self-loop.
        vertex: usize,
    },
    /// `to` is in `from`'s neighbors, but not the other way around.
    #[error("edge ({from}, {to}) has no reciprocal ({to}, {from})")]
    MissingReciprocal {
        /// Source of the one-sided edge.
        from: usize,
        /// Target of the one-sided edge.
        to: usize,
    },
}

// ============================================================================
// Graph
// ============================================================================

/// An undirected graph on vertices `0..vertex_count`, stored as adjacency lists.
///
/// Neighbors are appended and reported most-recent-first. The structure itself
/// does not enforce symmetry; [`Graph::add_edge`] inserts both directions and
/// [`crate::validate`] checks the relation before coloring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Allocates `vertex_count` empty neighbor sequences.
    ///
    /// # Errors
    /// Returns [`GraphError::Allocation`] if the outer storage cannot be reserved.
    /// No partially built graph is ever handed back.
    pub fn try_with_vertices(vertex_count: usize) -> Result<Self, GraphError> {
        let mut adjacency = Vec::new();
        adjacency
            .try_reserve_exact(vertex_count)
            .map_err(|_| GraphError::Allocation {
                vertices: vertex_count,
            })?;
        adjacency.resize_with(vertex_count, Vec::new);
        Ok(Self { adjacency })
    }

    /// Infallible variant of [`Graph::try_with_vertices`].
    ///
    /// # Panics
    /// Panics if the allocation fails.
    pub fn with_vertices(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns `true` if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Records `to` as a neighbor of `from` (one direction only).
    ///
    /// # Panics
    /// Panics if `from` is out of range.
    #[inline]
    pub fn add_edge_directed(&mut self, from: usize, to: usize) {
        debug_assert!(to < self.vertex_count(), "neighbor {to} out of range");
        self.adjacency[from].push(to);
    }

    /// Adds the undirected edge `{a, b}` to both endpoints.
    ///
    /// # Panics
    /// Panics if either endpoint is out of range.
    pub fn add_edge(&mut self, a: usize, b: usize) {
        self.add_edge_directed(a, b);
        self.add_edge_directed(b, a);
    }

    /// Iterates over the neighbors of `v`, most recently added first.
    pub fn neighbors(&self, v: usize) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.adjacency[v].iter().rev().copied()
    }

    /// Number of neighbor entries of `v`.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    /// Returns whether `b` appears among the neighbors of `a`.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].contains(&b)
    }

    /// Iterates over undirected edges once each, as `(a, b)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.vertex_count()).flat_map(move |a| {
            self.neighbors(a).filter(move |&b| a < b).map(move |b| (a, b))
        })
    }

    /// Number of undirected edges, counted with the `a < b` convention.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Releases every neighbor sequence and resets the vertex count to zero.
    pub fn clear(&mut self) {
        self.adjacency = Vec::new();
    }
}

// ============================================================================
// Tests
// ============================================================================
