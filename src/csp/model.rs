#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The static half of the constraint problem: which slots exist and where they cross.
//!
//! A [`ConstraintModel`] is built once from the slot geometry and never changes afterwards. Each
//! variable gets a dense [`VarId`] in construction order; that order is also the final tie-break
//! used by the variable-selection heuristics.

use crate::crossword::structure::Structure;
use crate::csp::variable::{Cell, VarId, Variable};
use crate::error::{CrosswordError, Result};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Expected maximum number of crossings for a single slot.
pub const INLINE_NEIGHBORS: usize = 8;

/// Shared-letter constraint between two crossing slots: `x[i] == y[j]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Overlap {
    /// Letter index in the first slot.
    pub i: usize,
    /// Letter index in the second slot.
    pub j: usize,
}

impl Overlap {
    #[must_use]
    pub const fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    /// The same constraint seen from the other slot.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(self.j, self.i)
    }
}

/// A directed arc `(from, to)`: `from` must keep only words supported by `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Arc {
    pub from: VarId,
    pub to: VarId,
}

impl Arc {
    #[must_use]
    pub const fn new(from: VarId, to: VarId) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConstraintModel {
    variables: Vec<Variable>,
    index: FxHashMap<Variable, VarId>,
    neighbors: Vec<SmallVec<[VarId; INLINE_NEIGHBORS]>>,
    overlaps: FxHashMap<(VarId, VarId), Overlap>,
}

impl ConstraintModel {
    /// Builds the model from explicit slots, computing neighbors and overlaps from the cells the
    /// slots occupy.
    ///
    /// # Errors
    ///
    /// - [`CrosswordError::InvalidSlotLength`] if a slot has length zero.
    /// - [`CrosswordError::DuplicateSlot`] if a slot appears twice.
    /// - [`CrosswordError::AmbiguousOverlap`] if two slots share more than one cell.
    pub fn new(variables: Vec<Variable>) -> Result<Self> {
        if let Some(v) = variables.iter().find(|v| v.length == 0) {
            return Err(CrosswordError::InvalidSlotLength {
                row: v.row,
                col: v.col,
            });
        }

        let mut index = FxHashMap::default();
        for (id, &v) in variables.iter().enumerate() {
            if index.insert(v, id).is_some() {
                return Err(CrosswordError::DuplicateSlot(v));
            }
        }

        let mut occupants: FxHashMap<Cell, SmallVec<[(VarId, usize); 2]>> = FxHashMap::default();
        for (id, v) in variables.iter().enumerate() {
            for (k, cell) in v.cells().enumerate() {
                occupants.entry(cell).or_default().push((id, k));
            }
        }

        let mut overlaps: FxHashMap<(VarId, VarId), Overlap> = FxHashMap::default();
        let mut shared: FxHashMap<(VarId, VarId), usize> = FxHashMap::default();
        for slots in occupants.values() {
            for (a, &(x, i)) in slots.iter().enumerate() {
                for &(y, j) in &slots[a + 1..] {
                    overlaps.insert((x, y), Overlap::new(i, j));
                    overlaps.insert((y, x), Overlap::new(j, i));
                    *shared.entry((x.min(y), x.max(y))).or_default() += 1;
                }
            }
        }

        if let Some((&(x, y), &count)) = shared.iter().filter(|&(_, &n)| n > 1).min() {
            return Err(CrosswordError::AmbiguousOverlap {
                first: variables[x],
                second: variables[y],
                shared: count,
            });
        }

        let mut neighbors = vec![SmallVec::new(); variables.len()];
        for &(x, y) in overlaps.keys() {
            neighbors[x].push(y);
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        Ok(Self {
            variables,
            index,
            neighbors,
            overlaps,
        })
    }

    /// Builds the model from every slot of a grid structure.
    ///
    /// # Errors
    ///
    /// See [`ConstraintModel::new`]; slots derived from a structure never trigger them.
    pub fn from_structure(structure: &Structure) -> Result<Self> {
        Self::new(structure.slots())
    }

    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    #[must_use]
    pub fn variable(&self, id: VarId) -> Variable {
        self.variables[id]
    }

    #[must_use]
    pub fn id_of(&self, variable: &Variable) -> Option<VarId> {
        self.index.get(variable).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = VarId> + use<> {
        0..self.variables.len()
    }

    /// Variables sharing a cell with `id`, in ascending id order.
    #[must_use]
    pub fn neighbors(&self, id: VarId) -> &[VarId] {
        &self.neighbors[id]
    }

    #[must_use]
    pub fn degree(&self, id: VarId) -> usize {
        self.neighbors[id].len()
    }

    /// The overlap between `x` and `y`, or `None` when they do not cross.
    #[must_use]
    pub fn overlap(&self, x: VarId, y: VarId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// Every ordered pair of neighbors, the seed of a full AC-3 run.
    pub fn arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        self.ids()
            .flat_map(move |x| self.neighbors(x).iter().map(move |&y| Arc::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::variable::Direction;
    use itertools::Itertools;

    fn cross() -> ConstraintModel {
        ConstraintModel::new(vec![
            Variable::new(1, 0, 3, Direction::Across),
            Variable::new(0, 1, 3, Direction::Down),
            Variable::new(4, 0, 2, Direction::Across),
        ])
        .unwrap()
    }

    #[test]
    fn test_neighbors_and_overlap() {
        let model = cross();
        assert_eq!(model.neighbors(0), &[1]);
        assert_eq!(model.neighbors(1), &[0]);
        assert!(model.neighbors(2).is_empty());
        assert_eq!(model.overlap(0, 1), Some(Overlap::new(1, 1)));
        assert_eq!(model.overlap(1, 0), Some(Overlap::new(1, 1)));
        assert_eq!(model.overlap(0, 2), None);
    }

    #[test]
    fn test_overlap_reversed_for_offset_crossing() {
        let model = ConstraintModel::new(vec![
            Variable::new(0, 0, 3, Direction::Across),
            Variable::new(0, 1, 3, Direction::Down),
        ])
        .unwrap();
        assert_eq!(model.overlap(0, 1), Some(Overlap::new(1, 0)));
        assert_eq!(model.overlap(1, 0), Some(Overlap::new(1, 0).reversed()));
    }

    #[test]
    fn test_arcs_cover_both_directions() {
        let model = cross();
        let arcs = model.arcs().sorted().collect_vec();
        assert_eq!(arcs, vec![Arc::new(0, 1), Arc::new(1, 0)]);
    }

    #[test]
    fn test_zero_length_rejected() {
        let err = ConstraintModel::new(vec![Variable::new(2, 3, 0, Direction::Down)]).unwrap_err();
        assert!(matches!(
            err,
            CrosswordError::InvalidSlotLength { row: 2, col: 3 }
        ));
    }

    #[test]
    fn test_duplicate_rejected() {
        let v = Variable::new(0, 0, 3, Direction::Across);
        let err = ConstraintModel::new(vec![v, v]).unwrap_err();
        assert!(matches!(err, CrosswordError::DuplicateSlot(d) if d == v));
    }

    #[test]
    fn test_collinear_overlap_rejected() {
        let err = ConstraintModel::new(vec![
            Variable::new(0, 0, 4, Direction::Across),
            Variable::new(0, 2, 4, Direction::Across),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            CrosswordError::AmbiguousOverlap { shared: 2, .. }
        ));
    }

    #[test]
    fn test_id_of() {
        let model = cross();
        assert_eq!(
            model.id_of(&Variable::new(0, 1, 3, Direction::Down)),
            Some(1)
        );
        assert_eq!(
            model.id_of(&Variable::new(0, 1, 3, Direction::Across)),
            None
        );
        assert_eq!(model.degree(0), 1);
        assert_eq!(model.len(), 3);
    }
}
