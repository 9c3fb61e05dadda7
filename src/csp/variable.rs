#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Slots in the grid, the variables of the constraint problem.

use std::fmt;

/// Index of a variable inside a [`ConstraintModel`](crate::csp::model::ConstraintModel).
pub type VarId = usize;

/// Zero-indexed `(row, column)` of a grid cell.
pub type Cell = (usize, usize);

/// The direction a slot runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Left to right.
    Across,
    /// Top to bottom.
    Down,
}

impl Direction {
    /// Row and column offsets between consecutive cells of a slot.
    #[must_use]
    pub const fn step(self) -> (usize, usize) {
        match self {
            Self::Across => (0, 1),
            Self::Down => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Across => write!(f, "across"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// A slot: a run of open cells that takes one word.
///
/// Compared, hashed and ordered by its four fields, so it can key maps directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    /// Row of the first cell.
    pub row: usize,
    /// Column of the first cell.
    pub col: usize,
    /// Number of cells, and so the required word length.
    pub length: usize,
    /// Which way the slot runs.
    pub direction: Direction,
}

impl Variable {
    #[must_use]
    pub const fn new(row: usize, col: usize, length: usize, direction: Direction) -> Self {
        Self {
            row,
            col,
            length,
            direction,
        }
    }

    /// The cell holding the `k`-th letter of this slot.
    #[must_use]
    pub const fn cell(self, k: usize) -> Cell {
        let (dr, dc) = self.direction.step();
        (self.row + k * dr, self.col + k * dc)
    }

    /// Every cell of the slot, in letter order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.length).map(move |k| self.cell(k))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {} {}",
            self.row, self.col, self.direction, self.length
        )
    }
}
