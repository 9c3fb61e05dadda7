#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::assignment::Assignment;
use crate::csp::domain::DomainStore;
use crate::csp::model::ConstraintModel;
use crate::csp::variable::VarId;
use clap::ValueEnum;
use std::cmp::Reverse;
use std::fmt::{self, Debug};

pub trait VariableSelection: Debug {
    /// Picks the next unassigned variable to branch on, or `None` if every variable is assigned.
    fn pick(
        &mut self,
        model: &ConstraintModel,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> Option<VarId>;
}

/// Fewest remaining values first, then most neighbors, then construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinimumRemainingValues;

impl VariableSelection for MinimumRemainingValues {
    fn pick(
        &mut self,
        model: &ConstraintModel,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> Option<VarId> {
        assignment
            .unassigned()
            .min_by_key(|&v| (domains[v].len(), Reverse(model.degree(v)), v))
    }
}

/// The first unassigned variable in construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedOrder;

impl VariableSelection for FixedOrder {
    fn pick(&mut self, _: &ConstraintModel, _: &DomainStore, assignment: &Assignment) -> Option<VarId> {
        assignment.unassigned().next()
    }
}

/// A uniformly random unassigned variable, from a seeded generator.
#[derive(Debug, Clone)]
pub struct RandomOrder(fastrand::Rng);

impl RandomOrder {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl Default for RandomOrder {
    fn default() -> Self {
        Self::new(0)
    }
}

impl VariableSelection for RandomOrder {
    fn pick(&mut self, _: &ConstraintModel, _: &DomainStore, assignment: &Assignment) -> Option<VarId> {
        let candidates: Vec<VarId> = assignment.unassigned().collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[self.0.usize(..candidates.len())])
    }
}

#[derive(Debug, Clone)]
pub enum VariableSelectionImpls {
    Mrv(MinimumRemainingValues),
    Fixed(FixedOrder),
    Random(RandomOrder),
}

impl Default for VariableSelectionImpls {
    fn default() -> Self {
        Self::Mrv(MinimumRemainingValues)
    }
}

impl VariableSelection for VariableSelectionImpls {
    fn pick(
        &mut self,
        model: &ConstraintModel,
        domains: &DomainStore,
        assignment: &Assignment,
    ) -> Option<VarId> {
        match self {
            Self::Mrv(s) => s.pick(model, domains, assignment),
            Self::Fixed(s) => s.pick(model, domains, assignment),
            Self::Random(s) => s.pick(model, domains, assignment),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, ValueEnum)]
pub enum VariableSelectionType {
    /// Minimum remaining values, ties broken by degree.
    #[default]
    Mrv,
    /// Construction order.
    Fixed,
    /// Seeded random order.
    Random,
}

impl fmt::Display for VariableSelectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mrv => write!(f, "mrv"),
            Self::Fixed => write!(f, "fixed"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl VariableSelectionType {
    #[must_use]
    pub fn to_impl(self, seed: u64) -> VariableSelectionImpls {
        match self {
            Self::Mrv => VariableSelectionImpls::Mrv(MinimumRemainingValues),
            Self::Fixed => VariableSelectionImpls::Fixed(FixedOrder),
            Self::Random => VariableSelectionImpls::Random(RandomOrder::new(seed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::variable::{Direction, Variable};

    // Slot 1 runs across row 1 and crosses the down slots 2 and 3; slot 0 crosses nothing.
    fn comb() -> ConstraintModel {
        ConstraintModel::new(vec![
            Variable::new(0, 0, 1, Direction::Down),
            Variable::new(1, 0, 5, Direction::Across),
            Variable::new(0, 2, 3, Direction::Down),
            Variable::new(0, 4, 3, Direction::Down),
        ])
        .unwrap()
    }

    #[test]
    fn test_mrv_prefers_smallest_domain() {
        let model = comb();
        let mut domains = DomainStore::new(model.len(), 4);
        domains[3].remove(0);
        let assignment = Assignment::new(model.len());
        assert_eq!(
            MinimumRemainingValues.pick(&model, &domains, &assignment),
            Some(3)
        );
    }

    #[test]
    fn test_mrv_breaks_ties_by_degree_then_order() {
        let model = comb();
        assert_eq!(model.degree(1), 2);
        let domains = DomainStore::new(model.len(), 4);
        let mut assignment = Assignment::new(model.len());
        assert_eq!(
            MinimumRemainingValues.pick(&model, &domains, &assignment),
            Some(1)
        );

        assignment.assign(1, 0);
        assert_eq!(
            MinimumRemainingValues.pick(&model, &domains, &assignment),
            Some(2)
        );
    }

    #[test]
    fn test_mrv_none_when_complete() {
        let model = comb();
        let domains = DomainStore::new(model.len(), 1);
        let mut assignment = Assignment::new(model.len());
        for v in model.ids() {
            assignment.assign(v, 0);
        }
        assert_eq!(
            MinimumRemainingValues.pick(&model, &domains, &assignment),
            None
        );
    }

    #[test]
    fn test_fixed_order() {
        let model = comb();
        let domains = DomainStore::new(model.len(), 2);
        let mut assignment = Assignment::new(model.len());
        assignment.assign(0, 1);
        assert_eq!(FixedOrder.pick(&model, &domains, &assignment), Some(1));
    }

    #[test]
    fn test_random_order_is_seeded_and_unassigned() {
        let model = comb();
        let domains = DomainStore::new(model.len(), 2);
        let mut assignment = Assignment::new(model.len());
        assignment.assign(2, 0);

        let mut a = RandomOrder::new(7);
        let mut b = RandomOrder::new(7);
        for _ in 0..10 {
            let picked = a.pick(&model, &domains, &assignment);
            assert_eq!(picked, b.pick(&model, &domains, &assignment));
            assert_ne!(picked, Some(2));
            assert!(picked.is_some());
        }
    }
}
