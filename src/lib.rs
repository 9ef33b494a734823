//! # Grid Percolation Toolkit
//!
//! Random grid graphs, connected-component coloring, and Monte Carlo estimates
//! built on top of them.
//!
//! This crate provides:
//! - An adjacency-list graph store with fallible allocation.
//! - A `size x size` grid generator whose candidate edges (right, down, and
//!   optionally down-right) are kept independently with probability `p`.
//! - Loop and symmetry checks, run before coloring.
//! - Iterative depth-first component coloring.
//! - Mean component counts by sampling, and a bisection over `p` that hits a
//!   target component count.
//!
//! ## Quick Start
//!
//! ```
//! use gridcolor::coloring::Coloring;
//! use gridcolor::grid::{generate_grid, trial_rng, GridSpec};
//!
//! // A fully wired 2x2 grid is a single 4-cycle.
//! let mut rng = trial_rng(42, 0);
//! let graph = generate_grid(&mut rng, &GridSpec::new(2, 1.0, false)).unwrap();
//! assert_eq!(graph.vertex_count(), 4);
//! assert_eq!(graph.edge_count(), 4);
//!
//! let coloring = Coloring::compute(&graph);
//! assert_eq!(coloring.components(), 1);
//! ```
//!
//! ## Sampling
//!
//! ```
//! use gridcolor::search::expected_components;
//!
//! // No edges: every vertex is its own component.
//! let mean = expected_components(4, 0.0, false, 10, 7).unwrap();
//! assert_eq!(mean, 16.0);
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: Adjacency store and graph errors.
//! - [`grid`]: Random grid generation and seeding.
//! - [`validate`]: Self-loop and symmetry checks.
//! - [`coloring`]: Connected-component coloring.
//! - [`search`]: Monte Carlo mean and probability bisection.
//! - [`dot`]: Graphviz export.
//!
//! ## Randomness
//!
//! Every generator takes its RNG explicitly. Runs without an explicit seed use
//! [`grid::clock_seed`], which only changes once per second.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::inline_always)]
#![allow(clippy::needless_range_loop)] // Often clearer for grid indexing
#![allow(clippy::multiple_crate_versions)] // Cargo.lock management is external

pub mod coloring;
pub mod dot;
pub mod graph;
pub mod grid;
pub mod search;
pub mod validate;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::coloring::{color_components, Coloring};
    pub use crate::dot::{save_graphviz, write_graphviz};
    pub use crate::graph::{Graph, GraphError};
    pub use crate::grid::{clock_seed, generate_grid, step_seed, trial_rng, GridSpec};
    pub use crate::search::{
        expected_components, optimal_probability, ProbabilityEstimate, SearchConfig, SearchError,
    };
    pub use crate::validate::{check_graph, contains_loop, is_symmetric};
}
