#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Encoding Sudoku puzzles as exactly-one constraint models and decoding
//! satisfying assignments back into grids.
//!
//! The universe holds one boolean decision variable per `(column, row, value)`
//! combination, 729 in total. Four structural constraint families express the
//! Sudoku rules, one exactly-one set per rule instance:
//!
//! - **cell**: each cell holds exactly one value,
//! - **row**: each value appears exactly once per row,
//! - **column**: each value appears exactly once per column,
//! - **box**: each value appears exactly once per 3x3 box,
//!
//! giving 4 x 81 = 324 constraints regardless of the input. Each given fact
//! contributes one additional singleton constraint forcing its variable true.
//! Givens are not checked for mutual consistency; a contradictory set simply
//! produces an infeasible model.

use crate::cover::assignment::Solution;
use crate::cover::constraint::Variable;
use crate::cover::model::Model;
use crate::cover::search::Engine;
use crate::cover::solver::{Outcome, Solver};
use crate::sudoku::grid::{Grid, parse_givens};
use itertools::{Itertools, iproduct};
use rustc_hash::FxHashSet;
use std::fmt;
use std::io;
use std::path::Path;

/// Grid side length; also the number of candidate values per cell.
const SIZE: u8 = 9;

/// Size of the decision variable universe: 9 columns x 9 rows x 9 values.
const UNIVERSE: usize = 729;

/// A pre-filled cell supplied as input: cell `(column, row)` holds `value`.
///
/// All three coordinates are 1-based and in `[1, 9]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Given {
    pub column: u8,
    pub row: u8,
    pub value: u8,
}

impl Given {
    #[must_use]
    pub const fn new(column: u8, row: u8, value: u8) -> Self {
        Self { column, row, value }
    }

    const fn variable(self) -> Variable {
        encode(self.column, self.row, self.value)
    }
}

/// Dense index of the decision variable "cell `(column, row)` holds `value`".
const fn encode(column: u8, row: u8, value: u8) -> Variable {
    (column as u32 - 1) * 81 + (row as u32 - 1) * 9 + (value as u32 - 1)
}

/// The fixed grouping of the 81 cells into nine disjoint 3x3 boxes, as
/// `(column, row)` pairs. A direct product over block indices, computed once
/// per encode and read-only afterwards.
fn box_partition() -> Vec<Vec<(u8, u8)>> {
    iproduct!(0..3u8, 0..3u8)
        .map(|(bi, bj)| {
            iproduct!(1..=3u8, 1..=3u8)
                .map(move |(i, j)| (bi * 3 + i, bj * 3 + j))
                .collect_vec()
        })
        .collect_vec()
}

fn cell_constraints() -> Vec<Vec<Variable>> {
    iproduct!(1..=SIZE, 1..=SIZE)
        .map(|(column, row)| {
            (1..=SIZE)
                .map(|value| encode(column, row, value))
                .collect_vec()
        })
        .collect_vec()
}

fn row_constraints() -> Vec<Vec<Variable>> {
    iproduct!(1..=SIZE, 1..=SIZE)
        .map(|(row, value)| {
            (1..=SIZE)
                .map(|column| encode(column, row, value))
                .collect_vec()
        })
        .collect_vec()
}

fn column_constraints() -> Vec<Vec<Variable>> {
    iproduct!(1..=SIZE, 1..=SIZE)
        .map(|(column, value)| {
            (1..=SIZE)
                .map(|row| encode(column, row, value))
                .collect_vec()
        })
        .collect_vec()
}

fn box_constraints() -> Vec<Vec<Variable>> {
    let boxes = box_partition();
    iproduct!(boxes, 1..=SIZE)
        .map(|(cells, value)| {
            cells
                .iter()
                .map(|&(column, row)| encode(column, row, value))
                .collect_vec()
        })
        .collect_vec()
}

fn given_constraints(givens: &[Given]) -> Vec<Vec<Variable>> {
    givens.iter().map(|g| vec![g.variable()]).collect_vec()
}

/// A Sudoku instance: the set of given facts to solve under.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Puzzle {
    givens: Vec<Given>,
}

impl Puzzle {
    /// Builds a puzzle from given facts, dropping exact duplicates so each
    /// forced variable contributes a single constraint.
    #[must_use]
    pub fn new(givens: impl IntoIterator<Item = Given>) -> Self {
        let mut seen = FxHashSet::default();
        Self {
            givens: givens.into_iter().filter(|g| seen.insert(*g)).collect(),
        }
    }

    /// Parses puzzle text (see [`parse_givens`]).
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::new(
            parse_givens(text)
                .into_iter()
                .map(|(column, row, value)| Given::new(column, row, value)),
        )
    }

    /// Builds a puzzle from a row-major board where 0 marks an empty cell.
    #[must_use]
    pub fn from_board(board: &[[u8; 9]; 9]) -> Self {
        Self::new(board.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0)
                .map(move |(c, &v)| Given::new(c as u8 + 1, r as u8 + 1, v))
        }))
    }

    #[must_use]
    pub fn givens(&self) -> &[Given] {
        &self.givens
    }

    /// The Encoder: produces the constraint model for this puzzle.
    ///
    /// The 324 structural constraints are generated deterministically and do
    /// not depend on the givens; each given then adds one singleton.
    #[must_use]
    pub fn to_model(&self) -> Model {
        let sets = cell_constraints()
            .into_iter()
            .chain(row_constraints())
            .chain(column_constraints())
            .chain(box_constraints())
            .chain(given_constraints(&self.givens));

        Model::new(UNIVERSE, sets)
    }

    /// The Decoder: maps a satisfying assignment back to a 9x9 digit grid.
    ///
    /// # Panics
    ///
    /// Panics if any cell has zero or multiple true candidate variables.
    /// That cannot happen for an assignment produced by a sound engine on
    /// this encoding (the cell constraint family guarantees uniqueness), so
    /// it is an internal invariant failure, never coerced into a grid.
    #[must_use]
    pub fn decode(&self, solution: &Solution) -> Grid {
        let mut cells = [[0u8; 9]; 9];

        for (column, row) in iproduct!(1..=SIZE, 1..=SIZE) {
            let mut digit = None;
            for value in 1..=SIZE {
                if solution.contains(encode(column, row, value)) {
                    assert!(
                        digit.is_none(),
                        "invariant failure: cell ({column},{row}) decoded to multiple values"
                    );
                    digit = Some(value);
                }
            }
            let Some(digit) = digit else {
                panic!("invariant failure: cell ({column},{row}) decoded to no value")
            };
            cells[(row - 1) as usize][(column - 1) as usize] = digit;
        }

        Grid::new(cells)
    }

    /// Encodes, searches and decodes in one call.
    ///
    /// Returns `None` when the puzzle has no solution. The model and the
    /// engine live only for the duration of the call.
    #[must_use]
    pub fn solve(&self) -> Option<Grid> {
        let mut engine = Engine::new(self.to_model());
        match engine.solve() {
            Outcome::Satisfiable(solution) => Some(self.decode(&solution)),
            // No node limit is set here, so Aborted cannot occur.
            Outcome::Infeasible | Outcome::Aborted => None,
        }
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells = [[0u8; 9]; 9];
        for g in &self.givens {
            cells[(g.row - 1) as usize][(g.column - 1) as usize] = g.value;
        }
        for (i, row) in cells.iter().enumerate() {
            for (j, digit) in row.iter().enumerate() {
                if *digit == 0 {
                    write!(f, ".")?;
                } else {
                    write!(f, "{digit}")?;
                }
                if j == 2 || j == 5 {
                    write!(f, "|")?;
                }
            }
            writeln!(f)?;
            if i == 2 || i == 5 {
                writeln!(f, "---+---+---")?;
            }
        }
        Ok(())
    }
}

/// Reads a puzzle file into a [`Puzzle`].
///
/// # Errors
///
/// Returns any I/O error from reading the file.
pub fn parse_puzzle_file(path: impl AsRef<Path>) -> io::Result<Puzzle> {
    Ok(Puzzle::from_text(&std::fs::read_to_string(path)?))
}

/// A well-known puzzle with a unique solution, row-major, 0 for empty.
pub const EXAMPLE: [[u8; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

#[cfg(test)]
mod tests {
    use super::*;

    /// The unique solution of [`EXAMPLE`].
    const SOLVED: [[u8; 9]; 9] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    fn solution_of(board: &[[u8; 9]; 9]) -> Solution {
        let vars = board
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(c, &v)| encode(c as u8 + 1, r as u8 + 1, v))
            })
            .collect_vec();
        Solution::from(vars)
    }

    #[test]
    fn test_encode_is_column_major_dense() {
        assert_eq!(encode(1, 1, 1), 0);
        assert_eq!(encode(1, 1, 2), 1);
        assert_eq!(encode(1, 2, 1), 9);
        assert_eq!(encode(2, 1, 1), 81);
        assert_eq!(encode(9, 9, 9), 728);
    }

    #[test]
    fn test_box_partition_covers_every_cell_once() {
        let boxes = box_partition();
        assert_eq!(boxes.len(), 9);
        assert!(boxes.iter().all(|b| b.len() == 9));

        let all: FxHashSet<(u8, u8)> = boxes.iter().flatten().copied().collect();
        assert_eq!(all.len(), 81);
    }

    #[test]
    fn test_box_partition_membership() {
        let boxes = box_partition();
        let home = boxes
            .iter()
            .find(|b| b.contains(&(1, 1)))
            .expect("cell (1,1) must belong to a box");
        assert!(home.contains(&(3, 3)));
        assert!(!home.contains(&(4, 1)));
    }

    #[test]
    fn test_structural_model_shape() {
        let model = Puzzle::default().to_model();
        assert_eq!(model.num_vars(), UNIVERSE);
        assert_eq!(model.len(), 324);
        // Every variable sits in exactly four constraints: its cell, row,
        // column and box sets.
        for var in 0..UNIVERSE as Variable {
            assert_eq!(model.occurrences(var).len(), 4);
        }
    }

    #[test]
    fn test_structural_constraints_independent_of_givens() {
        let empty = Puzzle::default().to_model();
        let with_givens = Puzzle::new([Given::new(1, 1, 5)]).to_model();
        assert_eq!(with_givens.len(), 325);
        assert_eq!(
            empty.constraints(),
            &with_givens.constraints()[..324],
            "the 324 structural constraints must not depend on the input"
        );
    }

    #[test]
    fn test_givens_become_singletons() {
        let puzzle = Puzzle::new([Given::new(1, 1, 5), Given::new(4, 2, 1)]);
        let model = puzzle.to_model();
        let forced = model.forced().collect_vec();
        assert_eq!(forced, vec![encode(1, 1, 5), encode(4, 2, 1)]);
    }

    #[test]
    fn test_duplicate_givens_deduplicated() {
        let g = Given::new(3, 3, 8);
        let puzzle = Puzzle::new([g, g, g]);
        assert_eq!(puzzle.givens().len(), 1);
    }

    #[test]
    fn test_empty_puzzle_yields_valid_grid() {
        let puzzle = Puzzle::default();
        let grid = puzzle.solve().expect("an empty puzzle is satisfiable");
        assert!(grid.is_valid());

        // Re-solving must again yield a valid grid.
        let again = puzzle.solve().expect("re-solve of the same givens");
        assert!(again.is_valid());
    }

    #[test]
    fn test_example_solves_to_unique_solution() {
        let puzzle = Puzzle::from_board(&EXAMPLE);
        let grid = puzzle.solve().expect("the example puzzle is satisfiable");

        assert!(grid.is_valid());
        assert_eq!(grid, Grid::new(SOLVED));

        // Givens preserved verbatim.
        for g in puzzle.givens() {
            assert_eq!(grid.get(g.column, g.row), g.value);
        }
    }

    #[test]
    fn test_eighty_givens_fill_the_last_cell() {
        let mut board = SOLVED;
        board[0][2] = 0;
        let grid = Puzzle::from_board(&board)
            .solve()
            .expect("eighty consistent givens are satisfiable");
        assert_eq!(grid, Grid::new(SOLVED));
        assert_eq!(grid.get(3, 1), 4);
    }

    #[test]
    fn test_row_conflict_is_infeasible() {
        let puzzle = Puzzle::new([Given::new(1, 1, 5), Given::new(2, 1, 5)]);
        assert_eq!(puzzle.solve(), None);
    }

    #[test]
    fn test_cell_conflict_is_infeasible() {
        let puzzle = Puzzle::new([Given::new(1, 1, 1), Given::new(1, 1, 2)]);
        assert_eq!(puzzle.solve(), None);
    }

    #[test]
    fn test_box_conflict_is_infeasible() {
        // Three 7s inside the top-left box, pairwise in distinct rows and
        // columns so only the box family rules them out.
        let puzzle = Puzzle::new([
            Given::new(1, 1, 7),
            Given::new(2, 2, 7),
            Given::new(3, 3, 7),
        ]);
        assert_eq!(puzzle.solve(), None);
    }

    #[test]
    fn test_decode_known_assignment() {
        let solution = solution_of(&SOLVED);
        let grid = Puzzle::default().decode(&solution);
        assert_eq!(grid, Grid::new(SOLVED));
    }

    #[test]
    #[should_panic(expected = "decoded to no value")]
    fn test_decode_rejects_empty_assignment() {
        let _ = Puzzle::default().decode(&Solution::default());
    }

    #[test]
    fn test_from_text_matches_from_board() {
        let text = "53..7....\n\
                    6..195...\n\
                    .98....6.\n\
                    8...6...3\n\
                    4..8.3..1\n\
                    7...2...6\n\
                    .6....28.\n\
                    ...419..5\n\
                    ....8..79\n";
        assert_eq!(Puzzle::from_text(text), Puzzle::from_board(&EXAMPLE));
    }

    #[test]
    fn test_display_renders_givens() {
        let rendered = Puzzle::from_board(&EXAMPLE).to_string();
        assert_eq!(rendered.lines().next(), Some("53.|.7.|..."));
        assert_eq!(rendered.lines().nth(3), Some("---+---+---"));
    }
}
