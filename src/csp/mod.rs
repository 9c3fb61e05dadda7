#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The crossword as a constraint satisfaction problem.
//!
//! Variables are slots, values are words, and every crossing is a binary constraint requiring the
//! two slots to agree on the shared letter. All words in a fill must also be distinct.

/// Partial assignments and finished solutions.
pub mod assignment;
/// Backtracking search.
pub mod backtracking;
/// Node and arc consistency.
pub mod consistency;
/// Per-variable domains with snapshot and restore.
pub mod domain;
/// Slots, crossings and arcs.
pub mod model;
/// Strategy configuration and statistics.
pub mod solver;
/// Value-ordering heuristics.
pub mod value_ordering;
/// Slot positions and directions.
pub mod variable;
/// Variable-selection heuristics.
pub mod variable_selection;
/// The interned word list.
pub mod word;
