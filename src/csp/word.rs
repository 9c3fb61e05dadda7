#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The candidate words, interned once so domains can refer to them by id.

use crate::error::{CrosswordError, Result};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::ops::Index;
use std::path::Path;

/// Index of a word inside a [`WordList`].
pub type WordId = usize;

/// Words up to this many letters keep their characters inline.
pub const INLINE_WORD_LENGTH: usize = 16;

/// A single candidate word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    chars: SmallVec<[char; INLINE_WORD_LENGTH]>,
}

impl Word {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars = text.chars().collect();
        Self { text, chars }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters, which is what slot lengths are measured in.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[must_use]
    pub fn char_at(&self, i: usize) -> Option<char> {
        self.chars.get(i).copied()
    }
}

/// A deduplicated list of candidate words, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<Word>,
}

impl Index<WordId> for WordList {
    type Output = Word;

    fn index(&self, index: WordId) -> &Self::Output {
        &self.words[index]
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl WordList {
    /// Builds a list from raw words, dropping empty strings and repeats.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let words = words
            .into_iter()
            .filter_map(|w| {
                let w = w.as_ref();
                (!w.is_empty() && seen.insert(w.to_owned())).then(|| Word::new(w))
            })
            .collect();
        Self { words }
    }

    /// Parses a word file: one word per line, surrounding whitespace ignored, upper-cased.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self::new(input.lines().map(|line| line.trim().to_uppercase()))
    }

    /// Reads and parses a word file.
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
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: WordId) -> Option<&Word> {
        self.words.get(id)
    }

    /// Id of the word with this exact text.
    #[must_use]
    pub fn id_of(&self, text: &str) -> Option<WordId> {
        self.words.iter().position(|w| w.as_str() == text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, &Word)> {
        self.words.iter().enumerate()
    }
}
