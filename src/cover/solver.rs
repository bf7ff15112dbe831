#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::cover::assignment::Solution;
use crate::cover::model::Model;

/// The terminal result of a solve.
///
/// `Infeasible` is a normal outcome, not an error: an over-constrained or
/// contradictory model simply has no satisfying assignment. `Aborted` is kept
/// distinct so that hitting a configured search cap is never mistaken for a
/// proof of infeasibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A satisfying assignment was found.
    Satisfiable(Solution),
    /// The search space was exhausted without finding an assignment.
    Infeasible,
    /// The search hit its node limit before reaching either conclusion.
    Aborted,
}

impl Outcome {
    #[must_use]
    pub const fn is_satisfiable(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    #[must_use]
    pub const fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Satisfiable(solution) => Some(solution),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_solution(self) -> Option<Solution> {
        match self {
            Self::Satisfiable(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Counters describing one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Branching choices made.
    pub decisions: usize,
    /// Variable assignments applied by propagation (decisions included).
    pub propagations: usize,
    /// Contradictions encountered.
    pub conflicts: usize,
    /// Deepest point of the search tree reached.
    pub max_depth: usize,
}

/// A complete, sound decision procedure for exactly-one constraint models.
pub trait Solver {
    fn new(model: Model) -> Self;
    fn solve(&mut self) -> Outcome;
    fn stats(&self) -> SearchStats;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let sat = Outcome::Satisfiable(Solution::from(vec![1, 2]));
        assert!(sat.is_satisfiable());
        assert!(sat.solution().is_some());
        assert!(sat.into_solution().is_some());

        assert!(!Outcome::Infeasible.is_satisfiable());
        assert_eq!(Outcome::Infeasible.into_solution(), None);
        assert_eq!(Outcome::Aborted.into_solution(), None);
        assert_ne!(Outcome::Infeasible, Outcome::Aborted);
    }
}
