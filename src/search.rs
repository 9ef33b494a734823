//! Monte Carlo estimates over random grids: mean component count for a fixed
//! edge probability, and a bisection over the probability to hit a target count.

use crate::coloring::color_components;
use crate::graph::GraphError;
use crate::grid::{clock_seed, generate_grid, step_seed, trial_rng, GridSpec};
use thiserror::Error;
use tracing::{debug, info, warn};

// ============================================================================
// Configuration
// ============================================================================

/// Sampling and bisection parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Trials used for a standalone mean estimate.
    pub average_trials: usize,
    /// Trials used at each bisection step.
    pub search_trials: usize,
    /// Accepted distance between the sampled mean and the target.
    pub tolerance: f64,
    /// Bisection steps before giving up.
    pub max_iterations: usize,
    /// Optional deterministic base seed; the wall clock is used otherwise.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            average_trials: 1000,
            search_trials: 100,
            tolerance: 1e-4,
            max_iterations: 200,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Base seed for this run.
    pub fn base_seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

/// Errors from the statistical estimators.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SearchError {
    /// The grid parameters were rejected.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// A mean over zero trials was requested.
    #[error("at least one trial is required")]
    NoTrials,
    /// No grid of this size can have `target` components.
    #[error("target of {target} components is outside [1, {max}] for this grid")]
    UnreachableTarget {
        /// Requested component count.
        target: usize,
        /// Vertex count of the grid.
        max: usize,
    },
    /// The bisection ran out of iterations.
    #[error(
        "did not converge after {iterations} iterations (last p = {probability}, mean = {mean})"
    )]
    NotConverged {
        /// Iterations performed.
        iterations: usize,
        /// Last probability tried.
        probability: f64,
        /// Mean component count at that probability.
        mean: f64,
    },
}

/// Result of [`optimal_probability`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbabilityEstimate {
    /// Edge probability whose sampled mean matched the target.
    pub probability: f64,
    /// Sampled mean component count at `probability`.
    pub mean_components: f64,
    /// Bisection steps taken (the initial midpoint counts as the first).
    pub iterations: usize,
}

// ============================================================================
// Public API
// ============================================================================

/// Mean number of connected components over `trials` random grids.
///
/// Trial `t` draws its graph from [`trial_rng`]`(base_seed, t)`, so trials are
/// independent and the whole estimate is reproducible from `base_seed`.
///
/// # Errors
/// [`SearchError::NoTrials`] for `trials == 0`, or the grid error if the
/// parameters are invalid.
pub fn expected_components(
    size: usize,
    probability: f64,
    diagonal: bool,
    trials: usize,
    base_seed: u64,
) -> Result<f64, SearchError> {
    if trials == 0 {
        return Err(SearchError::NoTrials);
    }
    let spec = GridSpec::new(size, probability, diagonal);
    spec.validate()?;

    let vertices = spec.vertex_count();
    let mut colors: Vec<usize> = Vec::new();
    colors
        .try_reserve_exact(vertices)
        .map_err(|_| GraphError::Allocation { vertices })?;
    colors.resize(vertices, 0);
    let mut total = 0usize;
    for trial in 0..trials {
        let mut rng = trial_rng(base_seed, trial as u64);
        let graph = generate_grid(&mut rng, &spec)?;
        total += color_components(&graph, &mut colors);
    }
    Ok(total as f64 / trials as f64)
}

/// Bisects the edge probability until the mean component count of a
/// `size x size` grid is within `cfg.tolerance` of `target`.
///
/// Starts at `0.5` on `[0, 1]`. A mean below the target means too many edges, so
/// the upper bound moves down; otherwise the lower bound moves up. Each step
/// samples `cfg.search_trials` grids seeded from [`step_seed`].
///
/// # Errors
/// [`SearchError::UnreachableTarget`] if `target` is outside `[1, size * size]`,
/// [`SearchError::NotConverged`] if `cfg.max_iterations` steps are not enough.
pub fn optimal_probability(
    size: usize,
    target: usize,
    diagonal: bool,
    cfg: &SearchConfig,
) -> Result<ProbabilityEstimate, SearchError> {
    let spec = GridSpec::new(size, 0.5, diagonal);
    spec.validate()?;
    let max = spec.vertex_count();
    if target == 0 || target > max {
        return Err(SearchError::UnreachableTarget { target, max });
    }
    if cfg.search_trials == 0 {
        return Err(SearchError::NoTrials);
    }

    let base_seed = cfg.base_seed();
    let goal = target as f64;
    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    let mut p = 0.5f64;
    let mut mean = f64::NAN;

    for iteration in 1..=cfg.max_iterations {
        let seed = step_seed(base_seed, iteration as u64);
        mean = expected_components(size, p, diagonal, cfg.search_trials, seed)?;
        debug!(iteration, p, mean, lo, hi, "bisection step");

        if (mean - goal).abs() <= cfg.tolerance {
            info!(size, target, diagonal, p, mean, iteration, "search converged");
            return Ok(ProbabilityEstimate {
                probability: p,
                mean_components: mean,
                iterations: iteration,
            });
        }

        if mean < goal {
            hi = p;
            p = (p + lo) / 2.0;
        } else {
            lo = p;
            p = (p + hi) / 2.0;
        }
    }

    warn!(size, target, diagonal, p, mean, "search did not converge");
    Err(SearchError::NotConverged {
        iterations: cfg.max_iterations,
        probability: p,
        mean,
    })
}

// ============================================================================
// Tests
// ============================================================================
