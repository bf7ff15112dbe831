#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod constraint;
pub mod model;
pub mod propagation;
pub mod search;
pub mod solver;
