//! Error types for building and loading crossword puzzles.
//!
//! Only construction can fail. A wiped-out domain during propagation or an exhausted search is
//! ordinary control flow and surfaces as `None` from
//! [`Backtracking::solve`](crate::csp::backtracking::Backtracking::solve).

use crate::csp::variable::Variable;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for crossword operations.
#[derive(Debug, Error)]
pub enum CrosswordError {
    /// A slot was declared with a length of zero.
    #[error("slot starting at ({row}, {col}) has non-positive length")]
    InvalidSlotLength {
        /// Row of the slot's first cell.
        row: usize,
        /// Column of the slot's first cell.
        col: usize,
    },

    /// The same slot was declared twice.
    #[error("slot {0} is declared more than once")]
    DuplicateSlot(Variable),

    /// Two slots share more than one cell, so their crossing is not a single letter.
    #[error("slots {first} and {second} share {shared} cells")]
    AmbiguousOverlap {
        /// The slot declared first.
        first: Variable,
        /// The slot declared second.
        second: Variable,
        /// Number of cells the two slots have in common.
        shared: usize,
    },

    /// A structure or word file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The rendered grid could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A returned solution broke one of the puzzle's constraints.
    #[error("solution failed verification")]
    Unverified,
}

/// Result type alias for crossword operations.
pub type Result<T> = std::result::Result<T, CrosswordError>;
