#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Orders the candidate words of the variable chosen for branching.
//!
//! None of these orderings touch the domains; they only rank what is there.

use crate::csp::assignment::Assignment;
use crate::csp::domain::DomainStore;
use crate::csp::model::ConstraintModel;
use crate::csp::variable::VarId;
use crate::csp::word::{WordId, WordList};
use clap::ValueEnum;
use rustc_hash::FxHashMap;
use std::fmt::{self, Debug};

pub trait ValueOrdering: Debug {
    fn order(
        &mut self,
        var: VarId,
        model: &ConstraintModel,
        words: &WordList,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> Vec<WordId>;
}

/// Least-constraining value: words that eliminate the fewest options from unassigned
/// neighbors come first. Equal costs keep word-list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeastConstrainingValue;

impl LeastConstrainingValue {
    /// Number of words across all unassigned neighbors of `var` that would be ruled out if
    /// `var` took `word`.
    #[must_use]
    pub fn cost(
        var: VarId,
        word: WordId,
        model: &ConstraintModel,
        words: &WordList,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> usize {
        model
            .neighbors(var)
            .iter()
            .filter(|&&n| !assignment.is_assigned(n))
            .filter_map(|&n| model.overlap(var, n).map(|o| (n, o)))
            .map(|(n, o)| {
                let letter = words[word].char_at(o.i);
                domains[n]
                    .iter()
                    .filter(|&y| words[y].char_at(o.j) != letter)
                    .count()
            })
            .sum()
    }
}

impl ValueOrdering for LeastConstrainingValue {
    fn order(
        &mut self,
        var: VarId,
        model: &ConstraintModel,
        words: &WordList,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> Vec<WordId> {
        // Letter histograms per neighbor make each cost a lookup instead of a domain scan.
        let crossings: Vec<_> = model
            .neighbors(var)
            .iter()
            .filter(|&&n| !assignment.is_assigned(n))
            .filter_map(|&n| {
                let o = model.overlap(var, n)?;
                let mut letters: FxHashMap<Option<char>, usize> = FxHashMap::default();
                for y in domains[n].iter() {
                    *letters.entry(words[y].char_at(o.j)).or_default() += 1;
                }
                Some((o.i, domains[n].len(), letters))
            })
            .collect();

        let mut ranked: Vec<(usize, WordId)> = domains[var]
            .iter()
            .map(|w| {
                let cost: usize = crossings
                    .iter()
                    .map(|(i, size, letters)| {
                        size - letters.get(&words[w].char_at(*i)).copied().unwrap_or(0)
                    })
                    .sum();
                (cost, w)
            })
            .collect();
        ranked.sort_unstable();
        ranked.into_iter().map(|(_, w)| w).collect()
    }
}

/// Word-list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DomainOrder;

impl ValueOrdering for DomainOrder {
    fn order(
        &mut self,
        var: VarId,
        _: &ConstraintModel,
        _: &WordList,
        domains: &DomainStore,
        _: &Assignment,
    ) -> Vec<WordId> {
        domains[var].iter().collect()
    }
}

/// A seeded shuffle of the domain.
#[derive(Debug, Clone)]
pub struct RandomValues(fastrand::Rng);

impl RandomValues {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl Default for RandomValues {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ValueOrdering for RandomValues {
    fn order(
        &mut self,
        var: VarId,
        _: &ConstraintModel,
        _: &WordList,
        domains: &DomainStore,
        _: &Assignment,
    ) -> Vec<WordId> {
        let mut values: Vec<WordId> = domains[var].iter().collect();
        self.0.shuffle(&mut values);
        values
    }
}

#[derive(Debug, Clone)]
pub enum ValueOrderingImpls {
    Lcv(LeastConstrainingValue),
    Domain(DomainOrder),
    Random(RandomValues),
}

impl Default for ValueOrderingImpls {
    fn default() -> Self {
        Self::Lcv(LeastConstrainingValue)
    }
}

impl ValueOrdering for ValueOrderingImpls {
    fn order(
        &mut self,
        var: VarId,
        model: &ConstraintModel,
        words: &WordList,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> Vec<WordId> {
        match self {
            Self::Lcv(o) => o.order(var, model, words, domains, assignment),
            Self::Domain(o) => o.order(var, model, words, domains, assignment),
            Self::Random(o) => o.order(var, model, words, domains, assignment),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, ValueEnum)]
pub enum ValueOrderingType {
    /// Least-constraining value first.
    #[default]
    Lcv,
    /// Word-list order.
    Domain,
    /// Seeded shuffle.
    Random,
}

impl fmt::Display for ValueOrderingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lcv => write!(f, "lcv"),
            Self::Domain => write!(f, "domain"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl ValueOrderingType {
    #[must_use]
    pub fn to_impl(self, seed: u64) -> ValueOrderingImpls {
        match self {
            Self::Lcv => ValueOrderingImpls::Lcv(LeastConstrainingValue),
            Self::Domain => ValueOrderingImpls::Domain(DomainOrder),
            Self::Random => ValueOrderingImpls::Random(RandomValues::new(seed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::variable::{Direction, Variable};
    use itertools::Itertools;

    // Across slot 0 crosses down slot 1 at across[1] == down[0].
    fn setup() -> (ConstraintModel, WordList, DomainStore) {
        let model = ConstraintModel::new(vec![
            Variable::new(0, 0, 3, Direction::Across),
            Variable::new(0, 1, 3, Direction::Down),
        ])
        .unwrap();
        let words = WordList::new(["dog", "cat", "art", "ape", "pod"]);
        let domains = DomainStore::new(model.len(), words.len());
        (model, words, domains)
    }

    fn texts(words: &WordList, ids: &[WordId]) -> Vec<String> {
        ids.iter().map(|&w| words[w].as_str().to_owned()).collect_vec()
    }

    #[test]
    fn test_cost_counts_eliminated_neighbor_words() {
        let (model, words, domains) = setup();
        let assignment = Assignment::new(model.len());
        // "cat" keeps the two down words starting with 'a'; the other three are ruled out.
        let cat = words.id_of("cat").unwrap();
        assert_eq!(
            LeastConstrainingValue::cost(0, cat, &model, &words, &domains, &assignment),
            3
        );
        let dog = words.id_of("dog").unwrap();
        assert_eq!(
            LeastConstrainingValue::cost(0, dog, &model, &words, &domains, &assignment),
            5
        );
    }

    #[test]
    fn test_lcv_orders_by_cost_then_word_order() {
        let (model, words, domains) = setup();
        let assignment = Assignment::new(model.len());
        let ordered = LeastConstrainingValue.order(0, &model, &words, &domains, &assignment);
        assert_eq!(
            texts(&words, &ordered),
            vec!["cat", "ape", "dog", "art", "pod"]
        );

        for pair in ordered.windows(2) {
            let a = LeastConstrainingValue::cost(0, pair[0], &model, &words, &domains, &assignment);
            let b = LeastConstrainingValue::cost(0, pair[1], &model, &words, &domains, &assignment);
            assert!(a <= b);
        }
    }

    #[test]
    fn test_lcv_ignores_assigned_neighbors() {
        let (model, words, domains) = setup();
        let mut assignment = Assignment::new(model.len());
        assignment.assign(1, 0);
        let ordered = LeastConstrainingValue.order(0, &model, &words, &domains, &assignment);
        assert_eq!(ordered, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_lcv_does_not_mutate_domains() {
        let (model, words, domains) = setup();
        let before = domains.snapshot();
        let _ = LeastConstrainingValue.order(0, &model, &words, &domains, &Assignment::new(2));
        assert_eq!(domains.snapshot(), before);
    }

    #[test]
    fn test_random_values_is_a_permutation() {
        let (model, words, domains) = setup();
        let assignment = Assignment::new(model.len());
        let mut ordered = RandomValues::new(3).order(1, &model, &words, &domains, &assignment);
        ordered.sort_unstable();
        assert_eq!(ordered, DomainOrder.order(1, &model, &words, &domains, &assignment));
    }
}
