#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The shape of a crossword: which cells take letters and which are blocked.

use crate::csp::variable::{Direction, Variable};
use crate::error::{CrosswordError, Result};
use bit_vec::BitVec;
use std::fmt;
use std::path::Path;

/// Marks a cell that takes a letter. Any other character is a blocked cell.
pub const OPEN_CELL: char = '_';

/// Written for blocked cells when a structure is displayed.
pub const BLOCKED_MARKER: char = '#';

/// A rectangular grid of open and blocked cells.
///
/// Short rows are padded with blocked cells up to the widest row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Structure {
    width: usize,
    height: usize,
    cells: BitVec,
}

impl Structure {
    /// Parses a structure, one grid row per line.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let rows: Vec<&str> = input.lines().collect();
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);

        let mut cells = BitVec::from_elem(width * height, false);
        for (i, row) in rows.iter().enumerate() {
            for (j, c) in row.chars().enumerate() {
                if c == OPEN_CELL {
                    cells.set(i * width + j, true);
                }
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    /// Reads and parses a structure file.
    ///
    /// # Errors
    ///
    /// Returns [`CrosswordError::Read`] if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CrosswordError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&contents))
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether `(row, col)` takes a letter. Cells outside the grid are blocked.
    #[must_use]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells.get(row * self.width + col) == Some(true)
    }

    /// Length of the run of open cells starting at `(row, col)` in `direction`.
    fn run_length(&self, row: usize, col: usize, direction: Direction) -> usize {
        let (dr, dc) = direction.step();
        (0..)
            .take_while(|&k| self.is_open(row + k * dr, col + k * dc))
            .count()
    }

    /// Every slot of the grid: maximal runs of at least two open cells.
    ///
    /// Cells are visited row by row; a cell starting both a down and an across run yields the
    /// down slot first.
    #[must_use]
    pub fn slots(&self) -> Vec<Variable> {
        let mut slots = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                if !self.is_open(row, col) {
                    continue;
                }

                if row == 0 || !self.is_open(row - 1, col) {
                    let length = self.run_length(row, col, Direction::Down);
                    if length > 1 {
                        slots.push(Variable::new(row, col, length, Direction::Down));
                    }
                }

                if col == 0 || !self.is_open(row, col - 1) {
                    let length = self.run_length(row, col, Direction::Across);
                    if length > 1 {
                        slots.push(Variable::new(row, col, length, Direction::Across));
                    }
                }
            }
        }
        slots
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let c = if self.is_open(row, col) {
                    OPEN_CELL
                } else {
                    BLOCKED_MARKER
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pads_short_rows() {
        let s = Structure::parse("___\n_\n#_#");
        assert_eq!((s.width(), s.height()), (3, 3));
        assert!(s.is_open(1, 0));
        assert!(!s.is_open(1, 1));
        assert!(!s.is_open(1, 2));
        assert!(!s.is_open(3, 0));
        assert!(!s.is_open(0, 3));
    }

    #[test]
    fn test_anything_but_underscore_is_blocked() {
        let s = Structure::parse("_x _#");
        assert!(s.is_open(0, 0));
        assert!(!s.is_open(0, 1));
        assert!(!s.is_open(0, 2));
        assert!(s.is_open(0, 3));
    }

    #[test]
    fn test_slots_down_before_across() {
        let s = Structure::parse("___\n_#_\n___");
        assert_eq!(
            s.slots(),
            vec![
                Variable::new(0, 0, 3, Direction::Down),
                Variable::new(0, 0, 3, Direction::Across),
                Variable::new(0, 2, 3, Direction::Down),
                Variable::new(2, 0, 3, Direction::Across),
            ]
        );
    }

    #[test]
    fn test_single_cells_are_not_slots() {
        let s = Structure::parse("_#_\n#__");
        assert_eq!(s.slots(), vec![
            Variable::new(0, 2, 2, Direction::Down),
            Variable::new(1, 1, 2, Direction::Across),
        ]);
    }

    #[test]
    fn test_display_round_trips_normalised() {
        let s = Structure::parse("__\n_.");
        assert_eq!(s.to_string(), "__\n_#\n");
        assert_eq!(Structure::parse(&s.to_string()), s);
    }

    #[test]
    fn test_empty_structure_has_no_slots() {
        let s = Structure::parse("");
        assert_eq!((s.width(), s.height()), (0, 0));
        assert!(s.slots().is_empty());
    }

    #[test]
    fn test_from_file_missing() {
        let err = Structure::from_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, CrosswordError::Read { .. }));
    }
}
