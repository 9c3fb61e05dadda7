#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Partial assignments built during search, and the solutions handed back to callers.

use crate::csp::model::ConstraintModel;
use crate::csp::variable::{VarId, Variable};
use crate::csp::word::{WordId, WordList};
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// A partial mapping from variable to chosen word.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    slots: Vec<Option<WordId>>,
    assigned: usize,
}

impl Index<VarId> for Assignment {
    type Output = Option<WordId>;

    fn index(&self, index: VarId) -> &Self::Output {
        &self.slots[index]
    }
}

impl Assignment {
    #[must_use]
    pub fn new(variable_count: usize) -> Self {
        Self {
            slots: vec![None; variable_count],
            assigned: 0,
        }
    }

    pub fn assign(&mut self, var: VarId, word: WordId) {
        if self.slots[var].replace(word).is_none() {
            self.assigned += 1;
        }
    }

    pub fn unassign(&mut self, var: VarId) -> Option<WordId> {
        let previous = self.slots[var].take();
        if previous.is_some() {
            self.assigned -= 1;
        }
        previous
    }

    #[must_use]
    pub fn get(&self, var: VarId) -> Option<WordId> {
        self.slots[var]
    }

    #[must_use]
    pub fn is_assigned(&self, var: VarId) -> bool {
        self.slots[var].is_some()
    }

    /// Number of assigned variables.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.assigned
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.assigned == 0
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.assigned == self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VarId, WordId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(var, word)| word.map(|w| (var, w)))
    }

    pub fn unassigned(&self) -> impl Iterator<Item = VarId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(var, word)| word.is_none().then_some(var))
    }

    /// Checks the word just given to `var` against everything else assigned: it must fit the
    /// slot, differ from every other chosen word, and agree with every assigned neighbor.
    #[must_use]
    pub fn is_consistent_with(&self, var: VarId, model: &ConstraintModel, words: &WordList) -> bool {
        let Some(word) = self.get(var) else {
            return true;
        };
        let chosen = &words[word];
        if chosen.len() != model.variable(var).length {
            return false;
        }

        if self
            .iter()
            .any(|(other, w)| other != var && words[w] == *chosen)
        {
            return false;
        }

        model.neighbors(var).iter().all(|&n| {
            self.get(n).is_none_or(|w| {
                model
                    .overlap(var, n)
                    .is_some_and(|o| chosen.char_at(o.i) == words[w].char_at(o.j))
            })
        })
    }

    /// Checks the whole assignment: lengths, distinct words, and matching crossings.
    #[must_use]
    pub fn is_consistent(&self, model: &ConstraintModel, words: &WordList) -> bool {
        let mut seen = FxHashSet::default();
        for (var, word) in self.iter() {
            if words[word].len() != model.variable(var).length || !seen.insert(words[word].as_str()) {
                return false;
            }
            let crossings_agree = model.neighbors(var).iter().all(|&n| {
                self.get(n).is_none_or(|w| {
                    model.overlap(var, n).is_some_and(|o| {
                        words[word].char_at(o.i) == words[w].char_at(o.j)
                    })
                })
            });
            if !crossings_agree {
                return false;
            }
        }
        true
    }
}

/// A complete fill: every slot mapped to its word.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution(BTreeMap<Variable, String>);

impl Solution {
    /// Resolves an assignment's word ids back into text.
    #[must_use]
    pub fn from_assignment(assignment: &Assignment, model: &ConstraintModel, words: &WordList) -> Self {
        Self(
            assignment
                .iter()
                .map(|(var, word)| (model.variable(var), words[word].as_str().to_owned()))
                .collect(),
        )
    }

    #[must_use]
    pub fn get(&self, variable: &Variable) -> Option<&str> {
        self.0.get(variable).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &str)> {
        self.0.iter().map(|(v, w)| (v, w.as_str()))
    }

    /// Checks the solution against a model: every slot filled with a word of the right length,
    /// no word used twice, and every crossing agreeing on its letter.
    #[must_use]
    pub fn verify(&self, model: &ConstraintModel) -> bool {
        if self.0.len() != model.len() {
            return false;
        }

        let mut seen = FxHashSet::default();
        for id in model.ids() {
            let variable = model.variable(id);
            let Some(word) = self.get(&variable) else {
                return false;
            };
            if word.chars().count() != variable.length || !seen.insert(word) {
                return false;
            }

            for &n in model.neighbors(id) {
                let (Some(o), Some(other)) = (model.overlap(id, n), self.get(&model.variable(n)))
                else {
                    return false;
                };
                if word.chars().nth(o.i) != other.chars().nth(o.j) {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (variable, word) in &self.0 {
            writeln!(f, "{variable}: {word}")?;
        }
        Ok(())
    }
}
