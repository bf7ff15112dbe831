#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::cover::constraint::Variable;
use core::fmt;
use core::ops::{Index, IndexMut};

/// The state of one decision variable during search.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

impl VarState {
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::Assigned(true))
    }

    #[must_use]
    pub const fn is_false(&self) -> bool {
        matches!(self, Self::Assigned(false))
    }
}

/// A partial 0/1 assignment over a dense variable universe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(Vec<VarState>);

impl Assignment {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![VarState::Unassigned; num_vars])
    }

    pub fn set(&mut self, var: Variable, value: bool) {
        self.0[var as usize] = VarState::Assigned(value);
    }

    #[must_use]
    pub fn value(&self, var: Variable) -> Option<bool> {
        match self.0.get(var as usize) {
            Some(VarState::Assigned(b)) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the set of true variables, in ascending index order.
    #[must_use]
    pub fn solution(&self) -> Solution {
        Solution(
            self.0
                .iter()
                .enumerate()
                .filter_map(|(i, s)| match s {
                    #[allow(clippy::cast_possible_truncation)]
                    VarState::Assigned(true) => Some(i as Variable),
                    _ => None,
                })
                .collect(),
        )
    }
}

impl Index<usize> for Assignment {
    type Output = VarState;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Assignment {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

/// A satisfying assignment, represented as the sorted set of true variables.
///
/// The variables left out of a [`Solution`] are exactly those assigned false;
/// the engine never leaves a variable unassigned in a satisfiable outcome
/// when every variable occurs in some constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution(Vec<Variable>);

impl Solution {
    #[must_use]
    pub fn contains(&self, var: Variable) -> bool {
        self.0.binary_search(&var).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Variable>> for Solution {
    fn from(mut vars: Vec<Variable>) -> Self {
        vars.sort_unstable();
        Self(vars)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for var in &self.0 {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{var}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_value() {
        let mut assignment = Assignment::new(4);
        assert_eq!(assignment.value(2), None);
        assignment.set(2, true);
        assignment.set(3, false);
        assert_eq!(assignment.value(2), Some(true));
        assert_eq!(assignment.value(3), Some(false));
        assert!(assignment[2].is_true());
        assert!(assignment[3].is_false());
        assert!(!assignment[0].is_assigned());
    }

    #[test]
    fn test_solution_extraction() {
        let mut assignment = Assignment::new(5);
        assignment.set(4, true);
        assignment.set(1, true);
        assignment.set(2, false);
        let solution = assignment.solution();
        assert_eq!(solution.len(), 2);
        assert!(solution.contains(1));
        assert!(solution.contains(4));
        assert!(!solution.contains(2));
    }

    #[test]
    fn test_solution_from_unsorted() {
        let solution = Solution::from(vec![9, 3, 7]);
        assert!(solution.contains(3));
        assert!(solution.contains(9));
        assert_eq!(solution.to_string(), "3 7 9");
    }
}
