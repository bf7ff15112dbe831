#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use itertools::Itertools;
use std::fmt;

/// A fully populated 9x9 grid of digits.
///
/// Stored row-major; cell access is 1-based `(column, row)` to match the
/// coordinates used by the encoder. A `Grid` owns its digits outright and
/// holds no reference back into the variable universe it was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid([[u8; 9]; 9]);

impl Grid {
    #[must_use]
    pub const fn new(cells: [[u8; 9]; 9]) -> Self {
        Self(cells)
    }

    /// Digit at 1-based `(column, row)`.
    #[must_use]
    pub const fn get(&self, column: u8, row: u8) -> u8 {
        self.0[(row - 1) as usize][(column - 1) as usize]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8; 9]> {
        self.0.iter()
    }

    /// Checks the Sudoku uniqueness rules: every row, column and 3x3 box
    /// contains each digit 1-9 exactly once.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let group_ok = |digits: [u8; 9]| {
            let mut seen = [false; 10];
            digits.iter().all(|&d| {
                if d == 0 || d > 9 || seen[d as usize] {
                    return false;
                }
                seen[d as usize] = true;
                true
            })
        };

        let rows = (0..9).all(|r| group_ok(self.0[r]));
        let columns = (0..9).all(|c| group_ok(core::array::from_fn(|r| self.0[r][c])));
        let boxes = (0..9).all(|b| {
            group_ok(core::array::from_fn(|i| {
                self.0[(b / 3) * 3 + i / 3][(b % 3) * 3 + i % 3]
            }))
        });

        rows && columns && boxes
    }

    /// The raw file format: 9 lines of 9 digits, no separators.
    #[must_use]
    pub fn to_raw_string(&self) -> String {
        self.0
            .iter()
            .map(|row| {
                let mut line: String = row.iter().map(|d| char::from(b'0' + d)).collect();
                line.push('\n');
                line
            })
            .collect()
    }
}

impl From<[[u8; 9]; 9]> for Grid {
    fn from(cells: [[u8; 9]; 9]) -> Self {
        Self::new(cells)
    }
}

impl fmt::Display for Grid {
    /// Human-readable rendering with `|` separators after columns 3 and 6
    /// and a `---+---+---` rule after rows 3 and 6.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            for (j, digit) in row.iter().enumerate() {
                write!(f, "{digit}")?;
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

/// Parses puzzle text into `(column, row, value)` given facts.
///
/// One row per line; the characters `'1'`-`'9'` are givens at that position,
/// anything else (`'.'`, `'0'`, spaces) is an empty cell. Rows and columns
/// beyond the ninth are ignored.
#[must_use]
pub fn parse_givens(text: &str) -> Vec<(u8, u8, u8)> {
    text.lines()
        .take(9)
        .enumerate()
        .flat_map(|(i, line)| {
            line.chars().take(9).enumerate().filter_map(move |(j, ch)| {
                ch.to_digit(10)
                    .filter(|&d| d != 0)
                    .map(|d| (j as u8 + 1, i as u8 + 1, d as u8))
            })
        })
        .collect_vec()
}
