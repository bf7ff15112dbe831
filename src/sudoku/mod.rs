#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides functionality for solving Sudoku puzzles.

/// The `grid` module holds the 9x9 grid type and its text formats.
pub mod grid;

/// The `solver` module encodes puzzles as cover models and decodes solutions.
pub mod solver;
