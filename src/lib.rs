#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This crate solves Sudoku puzzles by encoding them as exactly-one (exact
//! cover) constraint models and searching the models with a propagating
//! backtracking engine.
//!
//! Data flows Encoder → Engine → Decoder in a single synchronous call chain:
//! [`sudoku::solver::Puzzle::to_model`] builds the constraint model,
//! [`cover::search::Engine`] finds a satisfying assignment or proves there is
//! none, and [`sudoku::solver::Puzzle::decode`] maps the assignment back to a
//! 9x9 grid. Each solve owns its model and state outright, so independent
//! solves can run in parallel without coordination.

/// The `command_line` module implements the binary's CLI.
pub mod command_line;

/// The `cover` module implements the generic exactly-one constraint engine.
pub mod cover;

/// The `sudoku` module encodes Sudoku puzzles and decodes their solutions.
pub mod sudoku;
