//! Random grid graphs: a `size x size` lattice whose candidate edges are kept
//! independently with a fixed probability.
//!
//! Vertices are numbered row-major, `id = row * size + col`. Each cell looks
//! only at its forward neighbors (right, down, and optionally down-right), so
//! every unordered pair is considered exactly once.

use crate::graph::{Graph, GraphError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

// ============================================================================
// Configuration
// ============================================================================

/// Parameters of one grid graph draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    /// Side length of the grid (`size >= 1`).
    pub size: usize,
    /// Probability that each candidate edge is kept.
    pub edge_probability: f64,
    /// Also consider the down-right diagonal of every cell.
    pub include_diagonal: bool,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            size: 10,
            edge_probability: 0.5,
            include_diagonal: false,
        }
    }
}

impl GridSpec {
    /// Parameters for a `size x size` grid.
    pub fn new(size: usize, edge_probability: f64, include_diagonal: bool) -> Self {
        Self {
            size,
            edge_probability,
            include_diagonal,
        }
    }

    /// Number of vertices the grid will have, or `None` if `size * size`
    /// overflows `usize`.
    #[inline]
    pub fn checked_vertex_count(&self) -> Option<usize> {
        self.size.checked_mul(self.size)
    }

    /// Number of vertices the grid will have, saturating at `usize::MAX`.
    ///
    /// Exact for every spec that passes [`GridSpec::validate`].
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.size.saturating_mul(self.size)
    }

    /// Checks the size and probability ranges.
    ///
    /// # Errors
    /// [`GraphError::InvalidSize`] for `size == 0`, [`GraphError::Allocation`] when
    /// `size * size` does not fit in `usize`, [`GraphError::InvalidProbability`]
    /// for probabilities outside `[0, 1]` (NaN included).
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.size == 0 {
            return Err(GraphError::InvalidSize { size: self.size });
        }
        if self.checked_vertex_count().is_none() {
            return Err(GraphError::Allocation {
                vertices: usize::MAX,
            });
        }
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(GraphError::InvalidProbability {
                probability: self.edge_probability,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Indexing
// ============================================================================

/// Row-major vertex id of cell `(row, col)`.
#[inline(always)]
pub const fn vertex_id(row: usize, col: usize, size: usize) -> usize {
    row * size + col
}

/// Inverse of [`vertex_id`]: returns `(row, col)`.
#[inline(always)]
pub const fn grid_position(id: usize, size: usize) -> (usize, usize) {
    (id / size, id % size)
}

// ============================================================================
// Generation
// ============================================================================

/// Draws a random grid graph.
///
/// For each candidate edge one uniform value in `[0, 1)` is drawn and the edge is
/// kept iff the value is below `edge_probability`, so `0.0` never keeps an edge and
/// `1.0` always does. Draw order per cell is right, down, down-right.
///
/// # Errors
/// Returns an error if the parameters are invalid or the adjacency storage cannot be
/// allocated.
pub fn generate_grid<R: Rng + ?Sized>(rng: &mut R, spec: &GridSpec) -> Result<Graph, GraphError> {
    spec.validate()?;
    let size = spec.size;
    let p = spec.edge_probability;
    let mut graph = Graph::try_with_vertices(spec.vertex_count())?;

    for i in 0..size {
        for j in 0..size {
            let here = vertex_id(i, j, size);
            if j + 1 < size && rng.random::<f64>() < p {
                graph.add_edge(here, vertex_id(i, j + 1, size));
            }
            if i + 1 < size && rng.random::<f64>() < p {
                graph.add_edge(here, vertex_id(i + 1, j, size));
            }
            if spec.include_diagonal && i + 1 < size && j + 1 < size && rng.random::<f64>() < p {
                graph.add_edge(here, vertex_id(i + 1, j + 1, size));
            }
        }
    }

    debug!(
        size,
        p,
        diagonal = spec.include_diagonal,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        candidates = candidate_edge_count(size, spec.include_diagonal),
        "generated grid graph"
    );
    Ok(graph)
}

/// Number of candidate edges a grid of this shape offers.
pub fn candidate_edge_count(size: usize, include_diagonal: bool) -> usize {
    if size == 0 {
        return 0;
    }
    let axis = 2 * size * (size - 1);
    if include_diagonal {
        axis + (size - 1) * (size - 1)
    } else {
        axis
    }
}

// ============================================================================
// Seeding
// ============================================================================

/// Wall-clock seconds since the Unix epoch.
///
/// This is coarse on purpose: two calls in the same second return the same seed.
/// It is not a source of cryptographic randomness.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Base seed for step `step` of a multi-step run seeded with `base_seed`.
///
/// Steps get mixed seeds, so [`trial_rng`] streams of different steps do not
/// overlap the way `base + step` offsets would.
pub fn step_seed(base_seed: u64, step: u64) -> u64 {
    splitmix64(base_seed ^ splitmix64(step))
}

/// Independent, reproducible RNG for trial `trial` of a run seeded with `base_seed`.
pub fn trial_rng(base_seed: u64, trial: u64) -> SmallRng {
    SmallRng::seed_from_u64(splitmix64(base_seed ^ trial))
}

/// SplitMix64 mixer for deriving per-trial seeds from a base seed.
#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{contains_loop, is_symmetric};
    use rand_xorshift::XorShiftRng;
    use std::collections::HashSet;

    fn sorted_edges(g: &Graph) -> Vec<(usize, usize)> {
        let mut edges: Vec<_> = g.edges().collect();
        edges.sort_unstable();
        edges
    }

    #[test]
    fn full_two_by_two_grid() {
        let mut rng = XorShiftRng::seed_from_u64(1);
        let g = generate_grid(&mut rng, &GridSpec::new(2, 1.0, false)).unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(sorted_edges(&g), vec![(0, 1), (0, 2), (1, 3), (2, 3)]);
        for (a, b) in sorted_edges(&g) {
            assert!(g.has_edge(a, b) && g.has_edge(b, a));
        }
    }

    #[test]
    fn zero_probability_has_no_edges() {
        let mut rng = XorShiftRng::seed_from_u64(2);
        let g = generate_grid(&mut rng, &GridSpec::new(2, 0.0, true)).unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn diagonal_adds_down_right_edges_only() {
        let mut rng = XorShiftRng::seed_from_u64(3);
        let g = generate_grid(&mut rng, &GridSpec::new(3, 1.0, true)).unwrap();
        assert_eq!(g.edge_count(), candidate_edge_count(3, true));
        assert!(g.has_edge(0, 4));
        assert!(g.has_edge(4, 8));
        assert!(!g.has_edge(2, 4), "anti-diagonal must not be generated");
    }

    #[test]
    fn full_grid_matches_candidate_count() {
        let mut rng = XorShiftRng::seed_from_u64(4);
        for size in 1..6 {
            let g = generate_grid(&mut rng, &GridSpec::new(size, 1.0, false)).unwrap();
            assert_eq!(g.edge_count(), candidate_edge_count(size, false));
        }
    }

    #[test]
    fn random_grids_are_loop_free_and_symmetric() {
        let mut rng = XorShiftRng::seed_from_u64(0xC0FFEE);
        for _ in 0..200 {
            let size = rng.random_range(1..8);
            let p = rng.random::<f64>();
            let diagonal = rng.random_bool(0.5);
            let g = generate_grid(&mut rng, &GridSpec::new(size, p, diagonal)).unwrap();
            assert!(!contains_loop(&g));
            assert!(is_symmetric(&g));
        }
    }

    #[test]
    fn edges_only_join_grid_neighbors() {
        let mut rng = XorShiftRng::seed_from_u64(5);
        let size = 6;
        let g = generate_grid(&mut rng, &GridSpec::new(size, 0.6, true)).unwrap();
        for (a, b) in g.edges() {
            let (ra, ca) = grid_position(a, size);
            let (rb, cb) = grid_position(b, size);
            let step = (rb as isize - ra as isize, cb as isize - ca as isize);
            assert!(
                matches!(step, (0, 1) | (1, 0) | (1, 1)),
                "unexpected edge ({a}, {b})"
            );
        }
    }

    #[test]
    fn same_seed_same_graph() {
        let spec = GridSpec::new(7, 0.45, true);
        let a = generate_grid(&mut trial_rng(99, 3), &spec).unwrap();
        let b = generate_grid(&mut trial_rng(99, 3), &spec).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn trial_rngs_differ() {
        let mut r0 = trial_rng(42, 0);
        let mut r1 = trial_rng(42, 1);
        assert_ne!(r0.random::<u64>(), r1.random::<u64>());
    }

    #[test]
    fn invalid_specs_are_rejected() {
        let mut rng = XorShiftRng::seed_from_u64(6);
        assert_eq!(
            generate_grid(&mut rng, &GridSpec::new(0, 0.5, false)).unwrap_err(),
            GraphError::InvalidSize { size: 0 }
        );
        assert!(matches!(
            generate_grid(&mut rng, &GridSpec::new(3, 1.5, false)),
            Err(GraphError::InvalidProbability { .. })
        ));
        assert!(GridSpec::new(3, f64::NAN, false).validate().is_err());
    }

    #[test]
    fn oversized_grid_is_an_allocation_error() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        let spec = GridSpec::new(1 << 32, 0.5, false);
        assert_eq!(spec.checked_vertex_count(), None);
        assert_eq!(spec.vertex_count(), usize::MAX);
        assert_eq!(
            generate_grid(&mut rng, &spec).unwrap_err(),
            GraphError::Allocation {
                vertices: usize::MAX
            }
        );
    }

    #[test]
    fn consecutive_steps_share_no_trial_stream() {
        let first_draws = |step: u64| -> Vec<u64> {
            let seed = step_seed(0xFEED, step);
            (0..100).map(|t| trial_rng(seed, t).random::<u64>()).collect()
        };
        let step4: HashSet<u64> = first_draws(4).into_iter().collect();
        let step5 = first_draws(5);
        assert_eq!(step4.len(), 100);
        assert_eq!(step5.iter().filter(|d| step4.contains(d)).count(), 0);
    }

    #[test]
    fn step_seeds_differ_per_step() {
        let seeds: HashSet<u64> = (0..1000).map(|i| step_seed(42, i)).collect();
        assert_eq!(seeds.len(), 1000);
    }

    #[test]
    fn vertex_id_round_trips() {
        assert_eq!(vertex_id(2, 3, 5), 13);
        assert_eq!(grid_position(13, 5), (2, 3));
    }
}
