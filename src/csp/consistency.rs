#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Node consistency and AC-3 arc consistency.
//!
//! Node consistency is the unary filter: a word survives only if it has the slot's length.
//! Arc consistency removes a word from `X` when no word of a crossing slot `Y` agrees with it on
//! the shared letter, and keeps revisiting the arcs into `X` until nothing changes.
//!
//! The order arcs are taken from the worklist does not affect the fixed point, only how fast it
//! is reached, so the worklist is pluggable: [`ArcQueue`] is first-in first-out, [`ArcStack`] is
//! last-in first-out.

use crate::csp::domain::DomainStore;
use crate::csp::model::{Arc, ConstraintModel};
use crate::csp::variable::VarId;
use crate::csp::word::WordList;
use clap::ValueEnum;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::fmt::{self, Debug};

pub trait ArcWorklist: Debug + Default {
    fn push(&mut self, arc: Arc);
    fn pop(&mut self) -> Option<Arc>;
    fn clear(&mut self);
    fn is_empty(&self) -> bool;

    fn extend<I: IntoIterator<Item = Arc>>(&mut self, arcs: I) {
        for arc in arcs {
            self.push(arc);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct ArcQueue(VecDeque<Arc>);

impl ArcWorklist for ArcQueue {
    fn push(&mut self, arc: Arc) {
        self.0.push_back(arc);
    }

    fn pop(&mut self) -> Option<Arc> {
        self.0.pop_front()
    }

    fn clear(&mut self) {
        self.0.clear();
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct ArcStack(Vec<Arc>);

impl ArcWorklist for ArcStack {
    fn push(&mut self, arc: Arc) {
        self.0.push(arc);
    }

    fn pop(&mut self) -> Option<Arc> {
        self.0.pop()
    }

    fn clear(&mut self) {
        self.0.clear();
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Runtime choice between the worklists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorklistImpls {
    Queue(ArcQueue),
    Stack(ArcStack),
}

impl Default for WorklistImpls {
    fn default() -> Self {
        Self::Queue(ArcQueue::default())
    }
}

impl ArcWorklist for WorklistImpls {
    fn push(&mut self, arc: Arc) {
        match self {
            Self::Queue(q) => q.push(arc),
            Self::Stack(s) => s.push(arc),
        }
    }

    fn pop(&mut self) -> Option<Arc> {
        match self {
            Self::Queue(q) => q.pop(),
            Self::Stack(s) => s.pop(),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Queue(q) => q.clear(),
            Self::Stack(s) => s.clear(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Queue(q) => q.is_empty(),
            Self::Stack(s) => s.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, ValueEnum)]
pub enum WorklistType {
    /// First-in first-out.
    #[default]
    Queue,
    /// Last-in first-out.
    Stack,
}

impl fmt::Display for WorklistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queue => write!(f, "queue"),
            Self::Stack => write!(f, "stack"),
        }
    }
}

impl WorklistType {
    #[must_use]
    pub fn to_impl(self) -> WorklistImpls {
        match self {
            Self::Queue => WorklistImpls::Queue(ArcQueue::default()),
            Self::Stack => WorklistImpls::Stack(ArcStack::default()),
        }
    }
}

/// Enforces node and arc consistency over a [`DomainStore`], counting the work it does.
#[derive(Debug, Clone, Default)]
pub struct Propagator<W: ArcWorklist> {
    worklist: W,
    revisions: usize,
    removals: usize,
}

impl<W: ArcWorklist> Propagator<W> {
    #[must_use]
    pub const fn new(worklist: W) -> Self {
        Self {
            worklist,
            revisions: 0,
            removals: 0,
        }
    }

    /// Number of `revise` calls made so far.
    #[must_use]
    pub const fn revisions(&self) -> usize {
        self.revisions
    }

    /// Number of words removed from domains so far.
    #[must_use]
    pub const fn removals(&self) -> usize {
        self.removals
    }

    /// Removes every word whose length differs from its variable's length.
    pub fn enforce_node_consistency(
        &mut self,
        model: &ConstraintModel,
        words: &WordList,
        domains: &mut DomainStore,
    ) {
        for var in model.ids() {
            let length = model.variable(var).length;
            self.removals += domains[var].retain(|w| words[w].len() == length);
        }
    }

    /// Makes `x` arc consistent with `y`: drops every word of `x` whose letter at the crossing
    /// appears in no word of `y` at its side of the crossing. Returns whether anything was
    /// removed. Variables that do not cross are left alone.
    pub fn revise(
        &mut self,
        model: &ConstraintModel,
        words: &WordList,
        domains: &mut DomainStore,
        x: VarId,
        y: VarId,
    ) -> bool {
        let Some(overlap) = model.overlap(x, y) else {
            return false;
        };
        self.revisions += 1;

        let supported: FxHashSet<char> = domains[y]
            .iter()
            .filter_map(|w| words[w].char_at(overlap.j))
            .collect();
        let removed = domains[x].retain(|w| {
            words[w]
                .char_at(overlap.i)
                .is_some_and(|c| supported.contains(&c))
        });

        self.removals += removed;
        removed > 0
    }

    /// Runs AC-3 starting from `arcs`.
    ///
    /// Pass [`ConstraintModel::arcs`] for a full run, or a smaller set after a single domain has
    /// changed. Returns `false` as soon as any domain is emptied; the domains are then left in
    /// whatever partially-revised state they reached and the caller is expected to restore them.
    pub fn ac3<I: IntoIterator<Item = Arc>>(
        &mut self,
        model: &ConstraintModel,
        words: &WordList,
        domains: &mut DomainStore,
        arcs: I,
    ) -> bool {
        self.worklist.clear();
        self.worklist.extend(arcs);

        while let Some(Arc { from: x, to: y }) = self.worklist.pop() {
            if !self.revise(model, words, domains, x, y) {
                continue;
            }
            if domains[x].is_empty() {
                self.worklist.clear();
                return false;
            }
            for &n in model.neighbors(x) {
                if n != y {
                    self.worklist.push(Arc::new(n, x));
                }
            }
        }
        true
    }
}
