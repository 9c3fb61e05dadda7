//! # crossword
//!
//! `crossword` fills a crossword grid from a word list. The grid is read from a structure file
//! where `_` marks an open cell and any other character a blocked one; the word list holds one
//! word per line and is upper-cased on load.
//!
//! ## Usage
//!
//! ```sh
//! # Fill a grid
//! crossword structure.txt words.txt
//!
//! # Same, choosing strategies and writing the grid to a file
//! crossword solve --structure structure.txt --words words.txt --output filled.txt \
//!     --variable-selection mrv --value-ordering lcv --worklist stack
//!
//! # Fill every .txt structure in a directory
//! crossword dir --path puzzles --words words.txt
//!
//! # Shell completions
//! crossword completions zsh
//! ```
//!
//! ### Common options
//!
//! -   `-d, --debug`: debug logging on stderr (`RUST_LOG` overrides it).
//! -   `--verify <BOOL>`: check the fill against every constraint (default: `true`).
//! -   `--stats <BOOL>`: print problem and search statistics (default: `true`).
//! -   `--variable-selection <mrv|fixed|random>` (default: `mrv`).
//! -   `--value-ordering <lcv|domain|random>` (default: `lcv`).
//! -   `--worklist <queue|stack>`: AC-3 worklist discipline (default: `queue`).
//! -   `--seed <N>`: seed for the random strategies (default: `0`).
//! -   `--timeout <SECS>`: abandon the search after this long.
//!
//! The process exits with failure when no fill exists, the search times out, or an input cannot
//! be read.

use crate::command_line::cli::{Cli, init_tracing, run};
use clap::Parser;
use std::process::ExitCode;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory statistics.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.options().is_some_and(|o| o.debug));

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
