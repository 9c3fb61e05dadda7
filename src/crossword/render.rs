#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Text rendering of a filled grid.

use crate::crossword::structure::Structure;
use crate::csp::assignment::Solution;
use crate::error::{CrosswordError, Result};
use std::fmt;
use std::path::Path;

/// Drawn for blocked cells.
pub const BLOCKED_CELL: char = '█';

/// A structure with the letters of a solution written into it.
///
/// Open cells no slot covers are drawn as spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledGrid<'a> {
    structure: &'a Structure,
    letters: Vec<Option<char>>,
}

impl<'a> FilledGrid<'a> {
    #[must_use]
    pub fn new(structure: &'a Structure, solution: &Solution) -> Self {
        let width = structure.width();
        let mut letters = vec![None; width * structure.height()];
        for (variable, word) in solution.iter() {
            for ((row, col), c) in variable.cells().zip(word.chars()) {
                if structure.is_open(row, col) {
                    letters[row * width + col] = Some(c);
                }
            }
        }
        Self { structure, letters }
    }

    /// The letter written at `(row, col)`, if any.
    #[must_use]
    pub fn letter_at(&self, row: usize, col: usize) -> Option<char> {
        if col >= self.structure.width() {
            return None;
        }
        self.letters
            .get(row * self.structure.width() + col)
            .copied()
            .flatten()
    }

    /// Writes the rendered grid to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CrosswordError::Write`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_string()).map_err(|source| CrosswordError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl fmt::Display for FilledGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.structure.height() {
            for col in 0..self.structure.width() {
                let c = if self.structure.is_open(row, col) {
                    self.letter_at(row, col).unwrap_or(' ')
                } else {
                    BLOCKED_CELL
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
    use crate::csp::assignment::Assignment;
    use crate::csp::model::ConstraintModel;
    use crate::csp::word::WordList;

    fn corner() -> (Structure, ConstraintModel, WordList) {
        let structure = Structure::parse("___\n#_#\n#_#");
        let model = ConstraintModel::from_structure(&structure).unwrap();
        (structure, model, WordList::parse("cat\nart"))
    }

    #[test]
    fn test_renders_letters_and_blocks() {
        let (structure, model, words) = corner();
        // Slot 0 is the across slot at (0, 0), slot 1 the down slot at (0, 1).
        let mut assignment = Assignment::new(model.len());
        assignment.assign(0, words.id_of("CAT").unwrap());
        assignment.assign(1, words.id_of("ART").unwrap());
        let solution = Solution::from_assignment(&assignment, &model, &words);

        let grid = FilledGrid::new(&structure, &solution);
        assert_eq!(grid.to_string(), "CAT\n█R█\n█T█\n");
        assert_eq!(grid.letter_at(2, 1), Some('T'));
        assert_eq!(grid.letter_at(1, 0), None);
    }

    #[test]
    fn test_unfilled_open_cells_are_blank() {
        let (structure, model, words) = corner();
        let mut assignment = Assignment::new(model.len());
        assignment.assign(0, words.id_of("CAT").unwrap());
        let solution = Solution::from_assignment(&assignment, &model, &words);

        let grid = FilledGrid::new(&structure, &solution);
        assert_eq!(grid.to_string(), "CAT\n█ █\n█ █\n");
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let (structure, _, _) = corner();
        let grid = FilledGrid::new(&structure, &Solution::default());
        let err = grid
            .save(Path::new("/definitely/not/here/grid.txt"))
            .unwrap_err();
        assert!(matches!(err, CrosswordError::Write { .. }));
    }
}
