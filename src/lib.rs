#![warn(missing_docs)]
//! This crate fills crossword grids from a word list by treating the grid as a constraint
//! satisfaction problem: node and arc consistency, then backtracking search with inference.

/// The `crossword` module loads grid structures and word lists and renders filled grids.
pub mod crossword;

/// The `csp` module implements the constraint model, propagation and search.
pub mod csp;

/// The `error` module defines the error type shared by the crate.
pub mod error;

pub use crossword::Crossword;
pub use csp::assignment::Solution;
pub use csp::backtracking::Backtracking;
pub use csp::solver::{DefaultConfig, DynamicConfig, SolutionStats, Solver, SolverConfig};
pub use error::{CrosswordError, Result};
