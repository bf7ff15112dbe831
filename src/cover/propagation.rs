#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::cover::constraint::Variable;
use crate::cover::model::Model;
use std::collections::VecDeque;

/// A FIFO queue of forced assignments awaiting propagation.
///
/// Each entry is a `(variable, value)` pair. A fresh queue is seeded from the
/// model's singleton constraints: a given forces its variable true before any
/// search decision is made.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropagationQueue(VecDeque<(Variable, bool)>);

impl PropagationQueue {
    #[must_use]
    pub fn new(model: &Model) -> Self {
        Self(model.forced().map(|var| (var, true)).collect())
    }

    pub fn push(&mut self, var: Variable, value: bool) {
        self.0.push_back((var, value));
    }

    pub fn pop(&mut self) -> Option<(Variable, bool)> {
        self.0.pop_front()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
