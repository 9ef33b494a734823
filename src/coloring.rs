//! Connected-component coloring by iterative depth-first traversal.
//!
//! Colors are positive and handed out in discovery order: the component of
//! vertex 0 gets color 1, the component of the lowest-indexed vertex outside it
//! gets color 2, and so on. Numeric labels depend on the scan order; only the
//! partition into components is a stable property of the graph.

use crate::graph::Graph;
use crate::validate::is_symmetric;

/// Colors every connected component of `graph` and writes the assignment into
/// `colors`. Returns the number of colors used, i.e. the number of components.
///
/// # Panics
/// Panics if `colors.len() != graph.vertex_count()` or if the graph is not
/// symmetric (a self-loop also panics, inside the symmetry check).
pub fn color_components(graph: &Graph, colors: &mut [usize]) -> usize {
    assert_eq!(
        colors.len(),
        graph.vertex_count(),
        "color storage must have one slot per vertex"
    );
    assert!(is_symmetric(graph), "coloring requires a symmetric graph");

    let n = graph.vertex_count();
    let mut visited = vec![false; n];
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut color = 0;

    for start in 0..n {
        if visited[start] {
            continue;
        }
        color += 1;
        stack.clear();
        stack.push(start);
        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            colors[v] = color;
            // Already-visited neighbors are filtered on pop.
            stack.extend(graph.neighbors(v));
        }
    }
    color
}

/// An owned component coloring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coloring {
    colors: Vec<usize>,
    components: usize,
}

impl Coloring {
    /// Colors `graph`; see [`color_components`].
    ///
    /// # Panics
    /// Panics if the graph is not symmetric.
    pub fn compute(graph: &Graph) -> Self {
        let mut colors = vec![0; graph.vertex_count()];
        let components = color_components(graph, &mut colors);
        Self { colors, components }
    }

    /// Number of components (also the largest color).
    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Color of each vertex, indexed by vertex id.
    #[inline]
    pub fn colors(&self) -> &[usize] {
        &self.colors
    }

    /// Color of vertex `v`.
    #[inline]
    pub fn color_of(&self, v: usize) -> usize {
        self.colors[v]
    }

    /// Number of vertices carrying each color; entry `c - 1` is the size of color `c`.
    pub fn component_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.components];
        for &c in &self.colors {
            sizes[c - 1] += 1;
        }
        sizes
    }
}

// ============================================================================
// Tests
// ============================================================================
