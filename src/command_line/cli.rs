#![allow(clippy::cast_precision_loss)]

use crossword_solver::crossword::Crossword;
use crossword_solver::crossword::structure::Structure;
use crossword_solver::csp::assignment::Solution;
use crossword_solver::csp::backtracking::Backtracking;
use crossword_solver::csp::consistency::WorklistType;
use crossword_solver::csp::model::ConstraintModel;
use crossword_solver::csp::solver::{DynamicConfig, SolutionStats, Solver};
use crossword_solver::csp::value_ordering::ValueOrderingType;
use crossword_solver::csp::variable_selection::VariableSelectionType;
use crossword_solver::csp::word::WordList;
use crossword_solver::error::{CrosswordError, Result};
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

const MIB: f64 = 1024.0 * 1024.0;

/// Defines the command-line interface for the crossword filler.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "crossword",
    version,
    about = "Fills crossword grids from a word list",
    args_conflicts_with_subcommands = true
)]
pub(crate) struct Cli {
    /// Structure file to fill when no subcommand is given. `_` marks an open cell.
    #[arg(requires = "words")]
    pub structure: Option<PathBuf>,

    /// Word file, one word per line.
    pub words: Option<PathBuf>,

    /// Specifies the subcommand to execute.
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Fill a single structure.
    Solve {
        /// Path to the structure file.
        #[arg(long)]
        structure: PathBuf,

        /// Path to the word file.
        #[arg(long)]
        words: PathBuf,

        /// Also write the filled grid to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Fill every `.txt` structure under a directory with the same word list.
    Dir {
        /// Directory to search.
        #[arg(long)]
        path: PathBuf,

        /// Path to the word file.
        #[arg(long)]
        words: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug logging. `RUST_LOG` overrides it.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check the fill against every constraint before printing it.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) stats: bool,

    #[arg(long, default_value_t = VariableSelectionType::Mrv)]
    pub(crate) variable_selection: VariableSelectionType,

    #[arg(long, default_value_t = ValueOrderingType::Lcv)]
    pub(crate) value_ordering: ValueOrderingType,

    #[arg(long, default_value_t = WorklistType::Queue)]
    pub(crate) worklist: WorklistType,

    /// Seed for the random strategies.
    #[arg(long, default_value_t = 0)]
    pub(crate) seed: u64,

    /// Give up after this many seconds.
    #[arg(long, value_parser = parse_timeout)]
    pub(crate) timeout: Option<Duration>,
}

fn parse_timeout(s: &str) -> std::result::Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|e| format!("{e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{e}"))
}

impl Cli {
    /// The options in effect, wherever they were given.
    pub(crate) fn options(&self) -> Option<&CommonOptions> {
        match &self.command {
            Some(Commands::Solve { common, .. } | Commands::Dir { common, .. }) => Some(common),
            Some(Commands::Completions { .. }) => None,
            None => Some(&self.common),
        }
    }
}

/// Installs the stderr log subscriber. `--debug` lowers the default level from `warn` to
/// `debug`; a `RUST_LOG` directive takes precedence.
pub(crate) fn init_tracing(debug: bool) {
    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}

/// Dispatches the parsed command line.
///
/// # Errors
///
/// Any load, write or verification failure.
pub(crate) fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Some(Commands::Solve {
            structure,
            words,
            output,
            common,
        }) => solve_crossword(&structure, &words, output.as_deref(), &common).map(exit_code),
        Some(Commands::Dir {
            path,
            words,
            common,
        }) => solve_dir(&path, &words, &common).map(exit_code),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "crossword", &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }
        None => match (cli.structure, cli.words) {
            (Some(structure), Some(words)) => {
                solve_crossword(&structure, &words, None, &cli.common).map(exit_code)
            }
            _ => {
                eprintln!("No command provided. Use --help for more information.");
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

fn exit_code(solved: bool) -> ExitCode {
    if solved {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Builds a solver with the strategies picked on the command line.
pub(crate) fn get_solver(
    common: &CommonOptions,
    model: ConstraintModel,
    words: WordList,
) -> Backtracking<DynamicConfig> {
    let solver = Backtracking::<DynamicConfig>::from_parts(
        model,
        words,
        common.variable_selection.to_impl(common.seed),
        common.value_ordering.to_impl(common.seed),
        common.worklist.to_impl(),
    );

    match common.timeout {
        Some(timeout) => solver.with_deadline(Instant::now() + timeout),
        None => solver,
    }
}

/// Loads, fills and reports a single structure. Returns whether a fill was found.
///
/// # Errors
///
/// If either file cannot be read, the output cannot be written, or the fill fails verification.
pub(crate) fn solve_crossword(
    structure: &Path,
    words: &Path,
    output: Option<&Path>,
    common: &CommonOptions,
) -> Result<bool> {
    let time = Instant::now();
    let crossword = Crossword::from_files(structure, words)?;
    let parse_time = time.elapsed();

    solve_and_report(&crossword, structure, output, parse_time, common)
}

/// Fills every `.txt` file under `path` except the word file itself. Returns whether every
/// structure was filled.
///
/// # Errors
///
/// If `path` is not a directory, or any structure fails as in [`solve_crossword`].
pub(crate) fn solve_dir(path: &Path, words: &Path, common: &CommonOptions) -> Result<bool> {
    if !path.is_dir() {
        return Err(CrosswordError::Read {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        });
    }

    let word_list = WordList::from_file(words)?;
    let mut all_solved = true;

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        let file_path = entry.path();
        if !entry.file_type().is_file() || file_path.extension().is_none_or(|ext| ext != "txt") {
            continue;
        }
        if file_path == words {
            continue;
        }

        let time = Instant::now();
        let structure = match Structure::from_file(file_path) {
            Ok(structure) => structure,
            Err(e) => {
                warn!("skipping {}: {e}", file_path.display());
                continue;
            }
        };
        let crossword = Crossword::new(structure, word_list.clone());
        let parse_time = time.elapsed();

        all_solved &= solve_and_report(&crossword, file_path, None, parse_time, common)?;
    }

    Ok(all_solved)
}

/// Solves a loaded crossword, then verifies, prints stats and the grid, and writes `output`.
///
/// Returns whether a fill was found.
///
/// # Errors
///
/// If the model cannot be built, the fill fails verification, or `output` cannot be written.
pub(crate) fn solve_and_report(
    crossword: &Crossword,
    label: &Path,
    output: Option<&Path>,
    parse_time: Duration,
    common: &CommonOptions,
) -> Result<bool> {
    println!("Solving: {}", label.display());
    let model = crossword.model()?;
    info!(slots = model.len(), "built constraint model");

    let _ = epoch::advance();
    let time = Instant::now();
    let mut solver = get_solver(common, model.clone(), crossword.words().clone());
    let solution = solver.solve();
    let elapsed = time.elapsed();

    if common.verify {
        verify_solution(&model, solution.as_ref())?;
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &model,
            crossword.words(),
            &solver.stats(),
            memory_usage(),
        );
    }

    let Some(solution) = solution else {
        if solver.stats().timed_out {
            println!("\nTIMED OUT");
        } else {
            println!("\nNO SOLUTION");
        }
        return Ok(false);
    };

    let grid = crossword.render(&solution);
    println!("\n{grid}");
    if let Some(path) = output {
        grid.save(path)?;
        println!("Grid written to: {}", path.display());
    }
    Ok(true)
}

/// Checks a fill against the model and prints the verdict.
///
/// # Errors
///
/// [`CrosswordError::Unverified`] if the fill breaks a constraint.
pub(crate) fn verify_solution(model: &ConstraintModel, solution: Option<&Solution>) -> Result<()> {
    if let Some(solution) = solution {
        let ok = solution.verify(model);
        println!("Verified: {ok:?}");
        if !ok {
            return Err(CrosswordError::Unverified);
        }
    }
    Ok(())
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    Some((allocated as f64 / MIB, resident as f64 / MIB))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    model: &ConstraintModel,
    words: &WordList,
    s: &SolutionStats,
    memory: Option<(f64, f64)>,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let crossings = model.ids().map(|v| model.degree(v)).sum::<usize>() / 2;

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Slots", model.len());
    stat_line("Crossings", crossings);
    stat_line("Words", words.len());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line_with_rate("Inferences", s.inferences, elapsed_secs);
    stat_line_with_rate("Revisions", s.revisions, elapsed_secs);
    stat_line_with_rate("Removals", s.removals, elapsed_secs);
    stat_line("Max depth", s.max_depth);
    if let Some((allocated, resident)) = memory {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
