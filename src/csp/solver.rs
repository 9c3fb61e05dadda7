#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Strategy configuration for the search, and the statistics it reports.
//!
//! A [`SolverConfig`] picks the concrete heuristics at compile time. [`DefaultConfig`] is the
//! usual MRV + LCV + FIFO combination; [`DynamicConfig`] swaps every slot for an enum so the
//! choice can be made at runtime, which is what the command line does.

use crate::csp::assignment::Solution;
use crate::csp::consistency::{ArcQueue, ArcWorklist, WorklistImpls};
use crate::csp::model::ConstraintModel;
use crate::csp::value_ordering::{LeastConstrainingValue, ValueOrdering, ValueOrderingImpls};
use crate::csp::variable_selection::{
    MinimumRemainingValues, VariableSelection, VariableSelectionImpls,
};
use crate::csp::word::WordList;
use std::fmt::Debug;

pub trait SolverConfig: Debug + Clone {
    type VariableSelector: VariableSelection + Default + Clone;
    type ValueOrderer: ValueOrdering + Default + Clone;
    type Worklist: ArcWorklist + Clone;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type VariableSelector = MinimumRemainingValues;
    type ValueOrderer = LeastConstrainingValue;
    type Worklist = ArcQueue;
}

/// Every strategy chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DynamicConfig;

impl SolverConfig for DynamicConfig {
    type VariableSelector = VariableSelectionImpls;
    type ValueOrderer = ValueOrderingImpls;
    type Worklist = WorklistImpls;
}

/// Counters collected while solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SolutionStats {
    /// Candidate words tentatively assigned.
    pub decisions: usize,
    /// Candidates undone after failing consistency, inference or the subtree below them.
    pub backtracks: usize,
    /// Assignments forced by propagation rather than chosen.
    pub inferences: usize,
    /// Arc revisions performed.
    pub revisions: usize,
    /// Words removed from domains, including by node consistency.
    pub removals: usize,
    /// Deepest recursion level reached.
    pub max_depth: usize,
    /// Whether the search stopped because its deadline passed.
    pub timed_out: bool,
}

pub trait Solver<Config: SolverConfig = DefaultConfig> {
    fn new(model: ConstraintModel, words: WordList) -> Self;
    /// Runs the search to completion. `None` means there is no fill, or the deadline passed.
    fn solve(&mut self) -> Option<Solution>;
    fn stats(&self) -> SolutionStats;
}
