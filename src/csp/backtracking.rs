#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Depth-first backtracking search with arc-consistency inference.
//!
//! Before searching, [`Backtracking::solve`] enforces node consistency and runs a full AC-3 pass.
//! Each search step then:
//!
//! 1. returns success once every slot has a word;
//! 2. picks the next slot with the configured [`VariableSelection`];
//! 3. tries its candidate words in [`ValueOrdering`] order, skipping any that clash with a word
//!    already placed;
//! 4. snapshots the domains, pins every placed slot to its word and runs AC-3 from the arcs into
//!    the slot just filled; slots left with a single word are filled too;
//! 5. recurses, and on failure restores the snapshot and removes everything placed in step 4.
//!
//! On success nothing is restored, so the domains end up describing the solution.

use crate::csp::assignment::{Assignment, Solution};
use crate::csp::consistency::Propagator;
use crate::csp::domain::DomainStore;
use crate::csp::model::{Arc, ConstraintModel};
use crate::csp::solver::{DefaultConfig, SolutionStats, Solver, SolverConfig};
use crate::csp::value_ordering::ValueOrdering;
use crate::csp::variable::VarId;
use crate::csp::variable_selection::VariableSelection;
use crate::csp::word::{WordId, WordList};
use std::time::Instant;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct Backtracking<Config: SolverConfig = DefaultConfig> {
    model: ConstraintModel,
    words: WordList,
    domains: DomainStore,
    propagator: Propagator<Config::Worklist>,
    selector: Config::VariableSelector,
    orderer: Config::ValueOrderer,
    deadline: Option<Instant>,
    stats: SolutionStats,
}

impl<Config: SolverConfig> Solver<Config> for Backtracking<Config> {
    fn new(model: ConstraintModel, words: WordList) -> Self {
        Self::from_parts(
            model,
            words,
            Config::VariableSelector::default(),
            Config::ValueOrderer::default(),
            Config::Worklist::default(),
        )
    }

    fn solve(&mut self) -> Option<Solution> {
        debug!(
            slots = self.model.len(),
            words = self.words.len(),
            "starting search"
        );

        self.propagator
            .enforce_node_consistency(&self.model, &self.words, &mut self.domains);
        if let Some(var) = self.domains.first_empty() {
            debug!(slot = %self.model.variable(var), "no word has the slot's length");
            return None;
        }

        if !self
            .propagator
            .ac3(&self.model, &self.words, &mut self.domains, self.model.arcs())
        {
            debug!("initial arc consistency emptied a domain");
            return None;
        }
        debug!(
            candidates = self.domains.total(),
            revisions = self.propagator.revisions(),
            "initial propagation done"
        );

        let mut assignment = Assignment::new(self.model.len());
        if self.backtrack(&mut assignment, 0) {
            debug!(decisions = self.stats.decisions, "found a fill");
            Some(Solution::from_assignment(
                &assignment,
                &self.model,
                &self.words,
            ))
        } else {
            debug!(
                decisions = self.stats.decisions,
                timed_out = self.stats.timed_out,
                "search exhausted"
            );
            None
        }
    }

    fn stats(&self) -> SolutionStats {
        SolutionStats {
            revisions: self.propagator.revisions(),
            removals: self.propagator.removals(),
            ..self.stats
        }
    }
}

impl<Config: SolverConfig> Backtracking<Config> {
    /// Builds a solver from explicit strategy instances, typically the runtime `*Impls` enums.
    pub fn from_parts(
        model: ConstraintModel,
        words: WordList,
        selector: Config::VariableSelector,
        orderer: Config::ValueOrderer,
        worklist: Config::Worklist,
    ) -> Self {
        let domains = DomainStore::new(model.len(), words.len());
        Self {
            model,
            words,
            domains,
            propagator: Propagator::new(worklist),
            selector,
            orderer,
            deadline: None,
            stats: SolutionStats::default(),
        }
    }

    /// Abandons the search once `deadline` has passed; `solve` then returns `None` and
    /// [`SolutionStats::timed_out`] is set.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub const fn model(&self) -> &ConstraintModel {
        &self.model
    }

    #[must_use]
    pub const fn words(&self) -> &WordList {
        &self.words
    }

    #[must_use]
    pub const fn domains(&self) -> &DomainStore {
        &self.domains
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn backtrack(&mut self, assignment: &mut Assignment, depth: usize) -> bool {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        if assignment.is_complete() {
            return true;
        }

        if self.deadline_passed() {
            if !self.stats.timed_out {
                debug!(depth, "deadline passed, abandoning search");
            }
            self.stats.timed_out = true;
            return false;
        }

        let Some(var) = self.selector.pick(&self.model, &self.domains, assignment) else {
            return false;
        };
        let candidates =
            self.orderer
                .order(var, &self.model, &self.words, &self.domains, assignment);
        trace!(
            depth,
            slot = %self.model.variable(var),
            candidates = candidates.len(),
            "branching"
        );

        for word in candidates {
            self.stats.decisions += 1;
            assignment.assign(var, word);

            if !assignment.is_consistent_with(var, &self.model, &self.words) {
                assignment.unassign(var);
                self.stats.backtracks += 1;
                continue;
            }
            trace!(depth, word = self.words[word].as_str(), "trying");

            let snapshot = self.domains.snapshot();
            if let Some(inferred) = self.infer(var, assignment) {
                for &(v, w) in &inferred {
                    assignment.assign(v, w);
                }
                self.stats.inferences += inferred.len();

                // Inferred words are only checked against crossings, not against each other.
                let distinct =
                    inferred.is_empty() || assignment.is_consistent(&self.model, &self.words);
                if distinct && self.backtrack(assignment, depth + 1) {
                    return true;
                }

                for &(v, _) in &inferred {
                    assignment.unassign(v);
                }
            }

            self.domains.restore(snapshot);
            assignment.unassign(var);
            self.stats.backtracks += 1;

            if self.stats.timed_out {
                return false;
            }
        }

        false
    }

    /// Propagates the assignment of `var`. Returns the unassigned slots whose domains collapsed
    /// to a single word, or `None` if a domain was wiped out. Leaves the domains modified either
    /// way; the caller owns the snapshot.
    fn infer(&mut self, var: VarId, assignment: &Assignment) -> Option<Vec<(VarId, WordId)>> {
        for (v, w) in assignment.iter() {
            self.domains.fix(v, w);
        }

        let arcs: Vec<Arc> = self
            .model
            .neighbors(var)
            .iter()
            .filter(|&&n| !assignment.is_assigned(n))
            .map(|&n| Arc::new(n, var))
            .collect();

        if !self
            .propagator
            .ac3(&self.model, &self.words, &mut self.domains, arcs)
        {
            trace!(slot = %self.model.variable(var), "inference emptied a domain");
            return None;
        }

        Some(
            assignment
                .unassigned()
                .filter_map(|v| self.domains[v].single().map(|w| (v, w)))
                .collect(),
        )
    }
}
