#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Loading puzzles from disk and turning them into solvers.

/// Text rendering of filled grids.
pub mod render;
/// Grid structures and slot extraction.
pub mod structure;

use crate::crossword::render::FilledGrid;
use crate::crossword::structure::Structure;
use crate::csp::assignment::Solution;
use crate::csp::backtracking::Backtracking;
use crate::csp::model::ConstraintModel;
use crate::csp::solver::{Solver, SolverConfig};
use crate::csp::word::WordList;
use crate::error::Result;
use std::path::Path;
use tracing::debug;

/// A puzzle: a grid structure and the words available to fill it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Crossword {
    structure: Structure,
    words: WordList,
}

impl Crossword {
    #[must_use]
    pub const fn new(structure: Structure, words: WordList) -> Self {
        Self { structure, words }
    }

    /// Loads a structure file and a word file.
    ///
    /// # Errors
    ///
    /// Returns [`CrosswordError::Read`](crate::error::CrosswordError::Read) if either file cannot
    /// be read.
    pub fn from_files(structure: &Path, words: &Path) -> Result<Self> {
        let crossword = Self::new(Structure::from_file(structure)?, WordList::from_file(words)?);
        debug!(
            width = crossword.structure.width(),
            height = crossword.structure.height(),
            words = crossword.words.len(),
            "loaded crossword"
        );
        Ok(crossword)
    }

    #[must_use]
    pub const fn structure(&self) -> &Structure {
        &self.structure
    }

    #[must_use]
    pub const fn words(&self) -> &WordList {
        &self.words
    }

    /// The constraint model of the grid's slots.
    ///
    /// # Errors
    ///
    /// See [`ConstraintModel::new`].
    pub fn model(&self) -> Result<ConstraintModel> {
        ConstraintModel::from_structure(&self.structure)
    }

    /// A solver using the strategies of `Config`'s defaults.
    ///
    /// # Errors
    ///
    /// See [`ConstraintModel::new`].
    pub fn solver<Config: SolverConfig>(&self) -> Result<Backtracking<Config>> {
        Ok(Backtracking::<Config>::new(self.model()?, self.words.clone()))
    }

    #[must_use]
    pub fn render(&self, solution: &Solution) -> FilledGrid<'_> {
        FilledGrid::new(&self.structure, solution)
    }
}
