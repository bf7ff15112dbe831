//! Binary entry point for the `sudoku-cover` solver.
//!
//! All real work happens in [`sudoku_cover::command_line::cli`]; this file
//! only installs the allocator and translates errors into an exit code.

use std::process::ExitCode;
use sudoku_cover::command_line::cli;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// statistics printed by the CLI.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
