//! Graphviz export of a colored grid graph.
//!
//! Output uses the `fdp` layout with the 12-color `paired12` scheme. Vertices are
//! placed at their grid coordinates; with `pin` set, `fdp` keeps them there.

use crate::graph::Graph;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Number of colors in the `paired12` scheme.
pub const PALETTE_SIZE: usize = 12;

/// Folds a component color `1..` onto the palette range `1..=12`.
#[inline]
pub fn palette_index(color: usize) -> usize {
    (color.saturating_sub(1) % PALETTE_SIZE) + 1
}

/// Writes `graph` with its component `colors` as a Graphviz `graph`.
///
/// Vertex `id` is drawn at `(id % side, id / side)` where `side` is the integer
/// square root of the vertex count. Each undirected edge is written once, from its
/// lower endpoint, in that endpoint's color.
///
/// # Errors
/// Returns an error if writing fails.
///
/// # Panics
/// Panics if `colors` is shorter than the vertex count.
pub fn write_graphviz<W: Write>(
    mut w: W,
    graph: &Graph,
    colors: &[usize],
    pin: bool,
) -> io::Result<()> {
    let n = graph.vertex_count();
    assert!(colors.len() >= n, "one color per vertex is required");
    let side = n.isqrt().max(1);

    writeln!(w, "graph G {{")?;
    writeln!(w, "layout = fdp;")?;
    writeln!(w, "node [shape=point, width=.4, colorscheme=paired12];")?;
    writeln!(w, "edge [width=.4, colorscheme=paired12, penwidth=4];")?;

    for v in 0..n {
        writeln!(
            w,
            "{v} [pos=\"{},{}\", pin={pin}, color={}];",
            v % side,
            v / side,
            palette_index(colors[v])
        )?;
    }

    let mut edges: Vec<(usize, usize)> = graph.edges().collect();
    edges.sort_unstable();
    for (a, b) in edges {
        writeln!(w, "{a} -- {b} [color={}];", palette_index(colors[a]))?;
    }

    writeln!(w, "}}")?;
    w.flush()
}

/// Creates `path` and writes the diagram into it; see [`write_graphviz`].
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn save_graphviz(
    path: impl AsRef<Path>,
    graph: &Graph,
    colors: &[usize],
    pin: bool,
) -> io::Result<()> {
    let file = File::create(path)?;
    write_graphviz(BufWriter::new(file), graph, colors, pin)
}

// ============================================================================
// Tests
// ============================================================================
