#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Candidate-word sets for every variable, and the snapshots used to undo them.
//!
//! Domains only ever shrink while propagating. The one way back is [`DomainStore::restore`],
//! which replaces the whole store with a [`Snapshot`] taken earlier.

use crate::csp::variable::VarId;
use crate::csp::word::WordId;
use bit_vec::BitVec;
use std::ops::{Index, IndexMut};

/// The words still possible for one variable, as a bit per word in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    words: BitVec,
    len: usize,
}

impl Domain {
    /// A domain holding every word of a list with `word_count` entries.
    #[must_use]
    pub fn full(word_count: usize) -> Self {
        Self {
            words: BitVec::from_elem(word_count, true),
            len: word_count,
        }
    }

    #[must_use]
    pub fn empty(word_count: usize) -> Self {
        Self {
            words: BitVec::from_elem(word_count, false),
            len: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn contains(&self, word: WordId) -> bool {
        self.words.get(word).unwrap_or(false)
    }

    /// Adds `word`; returns whether it was absent.
    pub fn insert(&mut self, word: WordId) -> bool {
        if self.words.get(word) == Some(false) {
            self.words.set(word, true);
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// Removes `word`; returns whether it was present.
    pub fn remove(&mut self, word: WordId) -> bool {
        if self.contains(word) {
            self.words.set(word, false);
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Keeps only the words for which `keep` holds and returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(WordId) -> bool) -> usize {
        let doomed: Vec<WordId> = self.iter().filter(|&w| !keep(w)).collect();
        for &w in &doomed {
            self.words.set(w, false);
        }
        self.len -= doomed.len();
        doomed.len()
    }

    /// Shrinks the domain to exactly `word`.
    pub fn fix(&mut self, word: WordId) {
        let mut words = BitVec::from_elem(self.words.len(), false);
        words.set(word, true);
        self.words = words;
        self.len = 1;
    }

    /// The word ids still in the domain, ascending.
    pub fn iter(&self) -> impl Iterator<Item = WordId> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(word, present)| present.then_some(word))
    }

    /// The only remaining word, if exactly one is left.
    #[must_use]
    pub fn single(&self) -> Option<WordId> {
        if self.len == 1 {
            self.iter().next()
        } else {
            None
        }
    }
}

/// A verbatim copy of a [`DomainStore`], taken before a tentative step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(Vec<Domain>);

/// The mutable domains of every variable in a model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DomainStore {
    domains: Vec<Domain>,
}

impl Index<VarId> for DomainStore {
    type Output = Domain;

    fn index(&self, index: VarId) -> &Self::Output {
        &self.domains[index]
    }
}

impl IndexMut<VarId> for DomainStore {
    fn index_mut(&mut self, index: VarId) -> &mut Self::Output {
        &mut self.domains[index]
    }
}

impl DomainStore {
    /// Every variable starts with the whole word list.
    #[must_use]
    pub fn new(variable_count: usize, word_count: usize) -> Self {
        Self {
            domains: vec![Domain::full(word_count); variable_count],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VarId, &Domain)> {
        self.domains.iter().enumerate()
    }

    /// Forces the domain of `var` to the singleton `{word}`.
    pub fn fix(&mut self, var: VarId, word: WordId) {
        self.domains[var].fix(word);
    }

    /// The first variable whose domain is empty, if any.
    #[must_use]
    pub fn first_empty(&self) -> Option<VarId> {
        self.domains.iter().position(Domain::is_empty)
    }

    /// Sum of all domain sizes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.domains.iter().map(Domain::len).sum()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.domains.clone())
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.domains = snapshot.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_full_and_remove() {
        let mut d = Domain::full(4);
        assert_eq!(d.len(), 4);
        assert!(d.remove(2));
        assert!(!d.remove(2));
        assert!(!d.remove(9));
        assert_eq!(d.iter().collect_vec(), vec![0, 1, 3]);
        assert!(d.insert(2));
        assert!(!d.insert(2));
        assert_eq!(d.len(), 4);
    }

    #[test]
    fn test_retain_counts_removals() {
        let mut d = Domain::full(6);
        let removed = d.retain(|w| w % 2 == 0);
        assert_eq!(removed, 3);
        assert_eq!(d.len(), 3);
        assert_eq!(d.iter().collect_vec(), vec![0, 2, 4]);
        assert_eq!(d.retain(|_| true), 0);
    }

    #[test]
    fn test_fix_and_single() {
        let mut d = Domain::full(5);
        assert_eq!(d.single(), None);
        d.fix(3);
        assert_eq!(d.single(), Some(3));
        assert!(d.contains(3));
        assert!(!d.contains(0));
        assert!(Domain::empty(5).is_empty());
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut store = DomainStore::new(2, 3);
        let before = store.snapshot();

        store.fix(0, 1);
        store[1].remove(0);
        store[1].remove(2);
        assert_eq!(store.total(), 2);

        store.restore(before.clone());
        assert_eq!(store.total(), 6);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_first_empty() {
        let mut store = DomainStore::new(3, 1);
        assert_eq!(store.first_empty(), None);
        store[1].remove(0);
        assert_eq!(store.first_empty(), Some(1));
    }
}
