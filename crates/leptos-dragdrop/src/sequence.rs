//! Ordered Row Sequence
//!
//! The in-memory order of a list's row ids, and the splice used on drop.

use std::collections::HashSet;
use std::hash::Hash;

/// Which side of the target row the source lands on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

impl Side {
    /// Side implied by the pointer's vertical position over a row.
    /// Above the midpoint means before; the midpoint itself counts as after.
    pub fn from_pointer(pointer_y: f64, top: f64, height: f64) -> Self {
        if pointer_y < top + height / 2.0 {
            Side::Before
        } else {
            Side::After
        }
    }

    /// Side implied by the source and target indices: moving down lands
    /// after the target, moving up lands before it.
    pub fn from_indices(source: usize, target: usize) -> Self {
        if source < target {
            Side::After
        } else {
            Side::Before
        }
    }
}

/// Ordered ids, unique by value
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence<Id> {
    ids: Vec<Id>,
}

impl<Id: Clone + Eq + Hash> Sequence<Id> {
    /// Build from ids in display order. Later duplicates are dropped.
    pub fn from_ids<I: IntoIterator<Item = Id>>(ids: I) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for id in ids {
            if seen.insert(id.clone()) {
                unique.push(id);
            }
        }
        Self { ids: unique }
    }

    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn index_of(&self, id: &Id) -> Option<usize> {
        self.ids.iter().position(|i| i == id)
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.index_of(id).is_some()
    }

    /// Remove the id at `from` and reinsert it on `side` of the id that
    /// was at `target` before removal. Returns the new index.
    ///
    /// Both indices must be in bounds.
    pub fn move_relative(&mut self, from: usize, target: usize, side: Side) -> usize {
        let id = self.ids.remove(from);
        let target = if from < target { target - 1 } else { target };
        let to = match side {
            Side::Before => target,
            Side::After => target + 1,
        };
        self.ids.insert(to, id);
        to
    }

    /// Denormalized sort weights (`base + index * step`) in display order
    pub fn weights(&self, base: i64, step: i64) -> Vec<(Id, i64)> {
        self.ids
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), base + idx as i64 * step))
            .collect()
    }
}
