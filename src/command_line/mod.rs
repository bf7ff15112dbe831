#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Command-line surface of the solver binary.

/// The `cli` module defines argument parsing and command dispatch.
pub mod cli;
