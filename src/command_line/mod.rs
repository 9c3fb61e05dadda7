//! Command-line front end for the `crossword` binary.

/// Argument parsing, solving and reporting.
pub mod cli;
