#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use core::ops::Index;
use smallvec::SmallVec;

/// Dense index of a decision variable within a model's universe.
pub type Variable = u32;

/// An exactly-one constraint: of the listed variables, precisely one must be
/// assigned true in any satisfying assignment.
///
/// Members are stored inline for the common case of small sets (a Sudoku
/// constraint never exceeds nine members).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Constraint {
    vars: SmallVec<[Variable; 9]>,
}

impl Constraint {
    #[must_use]
    pub fn new(vars: impl IntoIterator<Item = Variable>) -> Self {
        Self {
            vars: vars.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// A singleton constraint forces its sole member true unconditionally.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.len() == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter()
    }

    #[must_use]
    pub fn contains(&self, var: Variable) -> bool {
        self.vars.contains(&var)
    }
}

impl Index<usize> for Constraint {
    type Output = Variable;

    fn index(&self, index: usize) -> &Self::Output {
        &self.vars[index]
    }
}

impl From<Vec<Variable>> for Constraint {
    fn from(vars: Vec<Variable>) -> Self {
        Self::new(vars)
    }
}

impl From<&[Variable]> for Constraint {
    fn from(vars: &[Variable]) -> Self {
        Self::new(vars.iter().copied())
    }
}

impl<'c> IntoIterator for &'c Constraint {
    type Item = &'c Variable;
    type IntoIter = core::slice::Iter<'c, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}
