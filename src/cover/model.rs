#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The constraint model: a fixed universe of boolean decision variables plus
//! a set of exactly-one constraints over them.
//!
//! A [`Model`] is immutable after construction. Encoders build one fresh per
//! solve, the engine reads it through shared references, and it is discarded
//! after decoding.

use crate::cover::assignment::Solution;
use crate::cover::constraint::{Constraint, Variable};
use smallvec::SmallVec;

/// An exactly-one constraint model over a dense variable universe.
///
/// Alongside the constraint list, the model holds per-variable occurrence
/// lists mapping each variable to the constraints that contain it, so the
/// engine can propagate an assignment without scanning every constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    num_vars: usize,
    constraints: Vec<Constraint>,
    occurrences: Vec<SmallVec<[u32; 4]>>,
}

impl Model {
    /// Builds a model from a universe size and the member sets of its
    /// constraints.
    ///
    /// # Panics
    ///
    /// Panics if a constraint references a variable outside the universe, or
    /// if the constraint count overflows a `u32` index.
    #[must_use]
    pub fn new(num_vars: usize, sets: impl IntoIterator<Item = Vec<Variable>>) -> Self {
        let constraints: Vec<Constraint> = sets.into_iter().map(Constraint::from).collect();

        let mut occurrences = vec![SmallVec::new(); num_vars];
        for (i, constraint) in constraints.iter().enumerate() {
            let index = u32::try_from(i).expect("constraint index overflowed u32");
            for &var in constraint {
                assert!(
                    (var as usize) < num_vars,
                    "constraint {i} references variable {var} outside universe of {num_vars}"
                );
                occurrences[var as usize].push(index);
            }
        }

        Self {
            num_vars,
            constraints,
            occurrences,
        }
    }

    /// Size of the variable universe.
    #[must_use]
    pub const fn num_vars(&self) -> usize {
        self.num_vars
    }

    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }

    /// Indices of the constraints containing `var`.
    #[must_use]
    pub fn occurrences(&self, var: Variable) -> &[u32] {
        &self.occurrences[var as usize]
    }

    /// Variables forced true by singleton constraints.
    pub fn forced(&self) -> impl Iterator<Item = Variable> + '_ {
        self.constraints
            .iter()
            .filter(|c| c.is_singleton())
            .map(|c| c[0])
    }

    /// Checks that `solution` satisfies every constraint exactly.
    #[must_use]
    pub fn verify(&self, solution: &Solution) -> bool {
        self.constraints
            .iter()
            .all(|c| c.iter().filter(|&&v| solution.contains(v)).count() == 1)
    }
}
