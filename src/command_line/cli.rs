#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Argument parsing and command dispatch for the solver binary.
//!
//! The surface mirrors the puzzle formats in [`crate::sudoku`]: a bare path
//! solves one puzzle file, `solve` adds an optional raw output file, `batch`
//! walks a directory for `.sdk` files, and `completions` emits shell
//! completion scripts.

use crate::cover::model::Model;
use crate::cover::search::Engine;
use crate::cover::solver::{Outcome, SearchStats, Solver};
use crate::sudoku::solver::parse_puzzle_file;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use walkdir::WalkDir;

/// Defines the command-line interface for the solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku-cover", version, about = "An exact-cover Sudoku solver")]
pub struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `solve`, `batch`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a single puzzle file (given as the positional path).
    Solve {
        /// Write the solved grid (9 lines of 9 digits) to this file.
        /// Nothing is written when the puzzle is infeasible.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sdk` puzzle file under a directory.
    Batch {
        /// Directory to walk for puzzle files.
        #[arg(long)]
        dir: PathBuf,

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
#[derive(Args, Debug, Default, Clone)]
pub struct CommonOptions {
    /// Enable verification of a found solution against the constraint model.
    #[arg(short, long, default_value_t = true)]
    pub verify: bool,

    /// Enable printing of problem and search statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub stats: bool,

    /// Print the satisfying assignment (true variable indices) when found.
    #[arg(short, long, default_value_t = false)]
    pub print_model: bool,

    /// Abort the search after this many decisions and report it distinctly.
    #[arg(long)]
    pub node_limit: Option<usize>,
}

/// How one solve attempt ended, for exit-code purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SolveStatus {
    Solved,
    Infeasible,
    Aborted,
}

impl SolveStatus {
    fn exit_code(self) -> ExitCode {
        match self {
            Self::Solved | Self::Infeasible => ExitCode::SUCCESS,
            Self::Aborted => ExitCode::from(2),
        }
    }
}

/// Parses arguments and runs the selected command.
///
/// # Errors
///
/// Returns any I/O error from reading puzzle files or writing solutions.
pub fn run() -> io::Result<ExitCode> {
    let cli = Cli::parse();

    // A bare path without a subcommand solves that puzzle file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            return solve_one(&path, None, &cli.common).map(SolveStatus::exit_code);
        }
    }

    match cli.command {
        Some(Commands::Solve { output, common }) => {
            let Some(path) = cli.path else {
                eprintln!("No puzzle path provided. Use --help for more information.");
                return Ok(ExitCode::FAILURE);
            };
            solve_one(&path, output.as_deref(), &common).map(SolveStatus::exit_code)
        }

        Some(Commands::Batch { dir, common }) => batch(&dir, &common),

        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }

        None => {
            eprintln!("No command provided. Use --help for more information.");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Solves one puzzle file, printing the result and optionally writing the
/// raw solved grid to `output`.
fn solve_one(
    path: &Path,
    output: Option<&Path>,
    common: &CommonOptions,
) -> io::Result<SolveStatus> {
    let parse_start = Instant::now();
    let puzzle = parse_puzzle_file(path)?;
    let parse_time = parse_start.elapsed();

    println!("Solving: {}", path.display());
    println!("{puzzle}");

    let mut engine = Engine::new(puzzle.to_model());
    if let Some(limit) = common.node_limit {
        engine = engine.with_node_limit(limit);
    }

    epoch::advance().unwrap();
    let solve_start = Instant::now();
    let outcome = engine.solve();
    let solve_time = solve_start.elapsed();

    if common.stats {
        print_stats(parse_time, solve_time, engine.model(), &engine.stats());
    }

    match outcome {
        Outcome::Satisfiable(solution) => {
            if common.verify {
                let ok = engine.model().verify(&solution);
                println!("Verified: {ok}");
                assert!(ok, "solution failed verification");
            }

            if common.print_model {
                println!("Model: {solution}");
            }

            let grid = puzzle.decode(&solution);
            println!("Solution:\n{grid}");

            if let Some(out) = output {
                std::fs::write(out, grid.to_raw_string())?;
                println!("Solution written to: {}", out.display());
            }

            Ok(SolveStatus::Solved)
        }
        Outcome::Infeasible => {
            println!("No solution found.");
            Ok(SolveStatus::Infeasible)
        }
        Outcome::Aborted => {
            println!("Search aborted: node limit reached.");
            Ok(SolveStatus::Aborted)
        }
    }
}

/// Solves every `.sdk` file under `dir`. Solves are independent, so a
/// failing or infeasible puzzle never stops the walk.
fn batch(dir: &Path, common: &CommonOptions) -> io::Result<ExitCode> {
    let mut worst = SolveStatus::Solved;
    let mut count = 0usize;

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(io::Error::other)?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "sdk")
        {
            count += 1;
            let status = solve_one(entry.path(), None, common)?;
            worst = worst.max(status);
            println!();
        }
    }

    println!("Solved {count} puzzle file(s) under {}", dir.display());
    Ok(worst.exit_code())
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Prints a summary of problem and search statistics, including memory
/// counters read from jemalloc.
fn print_stats(parse_time: Duration, solve_time: Duration, model: &Model, s: &SearchStats) {
    // Advance the epoch so the counters reflect the solving phase.
    epoch::advance().unwrap();
    let allocated = stats::allocated::mib().unwrap().read().unwrap();
    let resident = stats::resident::mib().unwrap().read().unwrap();
    #[allow(clippy::cast_precision_loss)]
    let allocated_mib = allocated as f64 / (1024.0 * 1024.0);
    #[allow(clippy::cast_precision_loss)]
    let resident_mib = resident as f64 / (1024.0 * 1024.0);

    println!("\n====================[ Problem Statistics ]=====================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", model.num_vars());
    stat_line("Constraints", model.len());
    stat_line("Forced (givens)", model.forced().count());

    println!("=====================[ Search Statistics ]=====================");
    stat_line("Decisions", s.decisions);
    stat_line("Propagations", s.propagations);
    stat_line("Conflicts", s.conflicts);
    stat_line("Max depth", s.max_depth);
    stat_line("Memory usage (MiB)", format!("{allocated_mib:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident_mib:.2}"));
    stat_line("Solve time (s)", format!("{:.3}", solve_time.as_secs_f64()));
    println!("===============================================================");
}
