#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The backtracking search engine for exactly-one constraint models.
//!
//! The engine alternates two phases:
//!
//! 1. **Propagation.** Forced assignments are drained from a queue. Assigning
//!    a variable true satisfies every constraint containing it and forces all
//!    of their other members false; assigning a variable false shrinks the
//!    candidate set of its constraints, and a constraint left with a single
//!    open candidate forces that candidate true. A constraint with no open
//!    candidates, or a variable forced to disagree with its existing value,
//!    is a conflict.
//! 2. **Branching.** When propagation reaches a fixpoint with constraints
//!    still unsatisfied, the engine picks the unsatisfied constraint with the
//!    fewest open candidates and tries each candidate as true on a cloned
//!    search state, recursing. Exhausting every candidate proves the current
//!    state infeasible.
//!
//! The procedure is complete and sound: every satisfying assignment is
//! reachable through some branch, and a returned assignment has satisfied
//! every constraint exactly.

use crate::cover::assignment::Assignment;
use crate::cover::constraint::Variable;
use crate::cover::model::Model;
use crate::cover::propagation::PropagationQueue;
use crate::cover::solver::{Outcome, SearchStats, Solver};
use bit_vec::BitVec;

/// The mutable state of one branch of the search.
///
/// Cloned at each branching point; the model itself is shared and read-only.
#[derive(Debug, Clone)]
struct SearchState {
    assignment: Assignment,
    /// One bit per constraint: set once a member has been assigned true.
    satisfied: BitVec,
    /// Per-constraint count of members not yet assigned false.
    open: Vec<u32>,
}

impl SearchState {
    fn new(model: &Model) -> Self {
        Self {
            assignment: Assignment::new(model.num_vars()),
            satisfied: BitVec::from_elem(model.len(), false),
            open: model
                .iter()
                .map(|c| u32::try_from(c.len()).expect("constraint width overflowed u32"))
                .collect(),
        }
    }

    fn is_satisfied(&self, constraint: usize) -> bool {
        self.satisfied.get(constraint) == Some(true)
    }
}

/// A backtracking exact-cover solver with most-constrained-first branching.
#[derive(Debug, Clone)]
pub struct Engine {
    model: Model,
    stats: SearchStats,
    node_limit: Option<usize>,
}

impl Solver for Engine {
    fn new(model: Model) -> Self {
        Self {
            model,
            stats: SearchStats::default(),
            node_limit: None,
        }
    }

    /// Runs the search to one of its three terminal outcomes.
    ///
    /// Forced assignments from singleton constraints are propagated before
    /// the first decision, so fully determined models never branch at all.
    fn solve(&mut self) -> Outcome {
        self.stats = SearchStats::default();

        let mut state = SearchState::new(&self.model);
        let mut queue = PropagationQueue::new(&self.model);

        if !self.propagate(&mut state, &mut queue) {
            return Outcome::Infeasible;
        }

        self.search(state, 0)
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}

impl Engine {
    /// Caps the number of decisions; exceeding the cap yields
    /// [`Outcome::Aborted`].
    #[must_use]
    pub const fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn model(&self) -> &Model {
        &self.model
    }

    /// Drains the queue to a fixpoint. Returns `false` on conflict.
    fn propagate(&mut self, state: &mut SearchState, queue: &mut PropagationQueue) -> bool {
        while let Some((var, value)) = queue.pop() {
            match state.assignment.value(var) {
                Some(existing) if existing == value => continue,
                Some(_) => {
                    self.stats.conflicts += 1;
                    return false;
                }
                None => {}
            }

            state.assignment.set(var, value);
            self.stats.propagations += 1;

            if value {
                for &ci in self.model.occurrences(var) {
                    let ci = ci as usize;
                    if state.is_satisfied(ci) {
                        // A second true member of an exactly-one set.
                        self.stats.conflicts += 1;
                        return false;
                    }
                    state.satisfied.set(ci, true);
                    for &other in &self.model.constraints()[ci] {
                        if other != var {
                            queue.push(other, false);
                        }
                    }
                }
            } else {
                for &ci in self.model.occurrences(var) {
                    let ci = ci as usize;
                    state.open[ci] -= 1;
                    if state.is_satisfied(ci) {
                        continue;
                    }
                    match state.open[ci] {
                        0 => {
                            self.stats.conflicts += 1;
                            return false;
                        }
                        1 => {
                            let last = self.model.constraints()[ci]
                                .iter()
                                .copied()
                                .find(|&v| state.assignment.value(v) != Some(false));
                            if let Some(last) = last {
                                queue.push(last, true);
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        true
    }

    fn search(&mut self, state: SearchState, depth: usize) -> Outcome {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let Some(target) = self.pick(&state) else {
            // Every constraint satisfied: extract the assignment.
            return Outcome::Satisfiable(state.assignment.solution());
        };

        if self
            .node_limit
            .is_some_and(|limit| self.stats.decisions >= limit)
        {
            return Outcome::Aborted;
        }

        let candidates: Vec<Variable> = self.model.constraints()[target]
            .iter()
            .copied()
            .filter(|&var| state.assignment.value(var).is_none())
            .collect();

        for var in candidates {
            self.stats.decisions += 1;

            let mut branch = state.clone();
            let mut queue = PropagationQueue::default();
            queue.push(var, true);

            if !self.propagate(&mut branch, &mut queue) {
                continue;
            }

            match self.search(branch, depth + 1) {
                Outcome::Infeasible => {}
                done => return done,
            }
        }

        Outcome::Infeasible
    }

    /// Most-constrained-first: the unsatisfied constraint with the fewest
    /// open candidates, or `None` once every constraint is satisfied.
    fn pick(&self, state: &SearchState) -> Option<usize> {
        (0..self.model.len())
            .filter(|&ci| !state.is_satisfied(ci))
            .min_by_key(|&ci| state.open[ci])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(num_vars: usize, sets: Vec<Vec<Variable>>) -> (Outcome, SearchStats) {
        let mut engine = Engine::new(Model::new(num_vars, sets));
        let outcome = engine.solve();
        (outcome, engine.stats())
    }

    #[test]
    fn test_empty_model_is_satisfiable() {
        let (outcome, _) = solve(0, vec![]);
        assert_eq!(
            outcome.into_solution().map(|s| s.len()),
            Some(0),
            "a model with no constraints is trivially satisfiable"
        );
    }

    #[test]
    fn test_forced_chain_solves_without_decisions() {
        // The singleton forces 0 true, which forces 1 false, which forces 2
        // true through the pair constraint.
        let (outcome, stats) = solve(3, vec![vec![0], vec![0, 1], vec![1, 2]]);
        let solution = outcome.into_solution().unwrap();
        assert!(solution.contains(0));
        assert!(!solution.contains(1));
        assert!(solution.contains(2));
        assert_eq!(stats.decisions, 0);
    }

    #[test]
    fn test_branching_model() {
        let model = Model::new(3, vec![vec![0, 1], vec![1, 2]]);
        let mut engine = Engine::new(model);
        let outcome = engine.solve();
        let solution = outcome.solution().unwrap();
        assert!(engine.model().verify(solution));
    }

    #[test]
    fn test_conflicting_singletons_are_infeasible() {
        // Both members of an exactly-one pair forced true.
        let (outcome, stats) = solve(2, vec![vec![0], vec![1], vec![0, 1]]);
        assert_eq!(outcome, Outcome::Infeasible);
        assert!(stats.conflicts > 0);
    }

    #[test]
    fn test_empty_constraint_is_infeasible() {
        let (outcome, _) = solve(2, vec![vec![0, 1], vec![]]);
        assert_eq!(outcome, Outcome::Infeasible);
    }

    #[test]
    fn test_node_limit_aborts() {
        let model = Model::new(2, vec![vec![0, 1]]);
        let mut engine = Engine::new(model).with_node_limit(0);
        assert_eq!(engine.solve(), Outcome::Aborted);
    }

    #[test]
    fn test_stats_reset_between_solves() {
        let model = Model::new(3, vec![vec![0, 1, 2]]);
        let mut engine = Engine::new(model);
        let first = engine.solve();
        assert!(first.is_satisfiable());
        let decisions = engine.stats().decisions;
        let second = engine.solve();
        assert!(second.is_satisfiable());
        assert_eq!(engine.stats().decisions, decisions);
    }
}
