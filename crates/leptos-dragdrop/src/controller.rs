//! Reorder Controller
//!
//! Per-list drag gesture state machine. Knows nothing about the DOM:
//! the binding layer feeds it presses, pointer moves, hovered targets and
//! releases, and applies the returned outcome to the page.

use std::hash::Hash;

use serde::Deserialize;

use crate::sequence::{Sequence, Side};

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// How the landing side is chosen on drop
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Moving down lands after the target, moving up lands before it
    #[default]
    Index,
    /// The half of the target row under the pointer decides
    Pointer,
}

/// The single target currently marked as insertion boundary
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropMark<Id> {
    pub target: Id,
    pub side: Side,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GestureState<Id> {
    Idle,
    /// Handle pressed, pointer not yet past the threshold
    Pressed { source: Id, origin: (i32, i32) },
    Dragging {
        source: Id,
        mark: Option<DropMark<Id>>,
    },
}

/// A completed reorder
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reorder<Id> {
    pub source: Id,
    pub target: Id,
    pub side: Side,
    pub from: usize,
    pub to: usize,
    /// Full order before the drop
    pub previous: Vec<Id>,
    /// Full order after the drop
    pub order: Vec<Id>,
    pub generation: u64,
}

/// Result of releasing the pointer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome<Id> {
    Reordered(Reorder<Id>),
    /// Dropped onto itself, or the splice left the order as it was
    Unchanged,
    /// No drag in progress or no valid target
    Cancelled,
}

#[derive(Clone, Debug)]
pub struct ReorderController<Id> {
    sequence: Sequence<Id>,
    state: GestureState<Id>,
    placement: Placement,
    threshold: i32,
    generation: u64,
}

impl<Id: Clone + Eq + Hash> ReorderController<Id> {
    pub fn new<I: IntoIterator<Item = Id>>(ids: I, placement: Placement) -> Self {
        Self {
            sequence: Sequence::from_ids(ids),
            state: GestureState::Idle,
            placement,
            threshold: DRAG_THRESHOLD_PX,
            generation: 0,
        }
    }

    pub fn with_threshold(mut self, threshold: i32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn sequence(&self) -> &Sequence<Id> {
        &self.sequence
    }

    pub fn state(&self) -> &GestureState<Id> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Id of the row being pressed or dragged
    pub fn source(&self) -> Option<&Id> {
        match &self.state {
            GestureState::Idle => None,
            GestureState::Pressed { source, .. } | GestureState::Dragging { source, .. } => Some(source),
        }
    }

    pub fn mark(&self) -> Option<&DropMark<Id>> {
        match &self.state {
            GestureState::Dragging { mark, .. } => mark.as_ref(),
            _ => None,
        }
    }

    /// Replace the sequence with the order currently on screen.
    ///
    /// A gesture whose source is no longer present is cancelled, and a
    /// mark on a vanished target is cleared.
    pub fn attach<I: IntoIterator<Item = Id>>(&mut self, ids: I) {
        self.sequence = Sequence::from_ids(ids);
        let source_gone = self.source().map_or(false, |s| !self.sequence.contains(s));
        if source_gone {
            self.state = GestureState::Idle;
            return;
        }
        if let GestureState::Dragging { mark, .. } = &mut self.state {
            if mark.as_ref().map_or(false, |m| !self.sequence.contains(&m.target)) {
                *mark = None;
            }
        }
    }

    /// Handle pressed on a row. A press during another gesture restarts.
    /// Returns false for ids outside the sequence.
    pub fn press(&mut self, source: Id, x: i32, y: i32) -> bool {
        if !self.sequence.contains(&source) {
            return false;
        }
        self.state = GestureState::Pressed { source, origin: (x, y) };
        true
    }

    /// Returns true when this movement started the drag
    pub fn pointer_moved(&mut self, x: i32, y: i32) -> bool {
        let GestureState::Pressed { source, origin } = &self.state else {
            return false;
        };
        let dx = (x - origin.0).abs();
        let dy = (y - origin.1).abs();
        if dx > self.threshold || dy > self.threshold {
            self.state = GestureState::Dragging {
                source: source.clone(),
                mark: None,
            };
            true
        } else {
            false
        }
    }

    /// Side a drop would land on. Under [`Placement::Index`] the pointer
    /// side is ignored in favour of the index rule.
    fn landing_side(&self, from: usize, target: usize, pointer_side: Side) -> Side {
        match self.placement {
            Placement::Index => Side::from_indices(from, target),
            Placement::Pointer => pointer_side,
        }
    }

    /// Mark the hovered row with the side the drop will land on.
    /// Hovering the source clears the mark. Returns true when the mark changed.
    pub fn set_mark(&mut self, target: Id, side: Side) -> bool {
        let from = self.source().and_then(|s| self.sequence.index_of(s));
        let target_idx = self.sequence.index_of(&target);
        let resolved = match (from, target_idx) {
            (Some(from), Some(to)) if from != to => Some(self.landing_side(from, to, side)),
            _ => None,
        };
        let GestureState::Dragging { mark, .. } = &mut self.state else {
            return false;
        };
        let next = resolved.map(|side| DropMark { target, side });
        if *mark == next {
            return false;
        }
        *mark = next;
        true
    }

    pub fn clear_mark(&mut self) -> bool {
        match &mut self.state {
            GestureState::Dragging { mark, .. } if mark.is_some() => {
                *mark = None;
                true
            }
            _ => false,
        }
    }

    /// Abort any gesture. Returns true if one was in progress.
    pub fn cancel(&mut self) -> bool {
        let active = self.state != GestureState::Idle;
        self.state = GestureState::Idle;
        active
    }

    /// End the gesture, splicing the source next to the last marked target
    pub fn release(&mut self) -> DropOutcome<Id> {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Dragging {
                source,
                mark: Some(mark),
            } => self.drop_on(source, mark),
            _ => DropOutcome::Cancelled,
        }
    }

    fn drop_on(&mut self, source: Id, mark: DropMark<Id>) -> DropOutcome<Id> {
        let (Some(from), Some(target_idx)) = (self.sequence.index_of(&source), self.sequence.index_of(&mark.target)) else {
            return DropOutcome::Cancelled;
        };
        if from == target_idx {
            return DropOutcome::Unchanged;
        }
        let side = self.landing_side(from, target_idx, mark.side);

        let previous = self.sequence.ids().to_vec();
        let to = self.sequence.move_relative(from, target_idx, side);
        if self.sequence.ids() == previous.as_slice() {
            return DropOutcome::Unchanged;
        }
        self.generation += 1;

        DropOutcome::Reordered(Reorder {
            source,
            target: mark.target,
            side,
            from,
            to,
            previous,
            order: self.sequence.ids().to_vec(),
            generation: self.generation,
        })
    }

    /// Restore the order from before `reorder`, but only if no later
    /// reorder happened since. Returns true if the order was restored.
    pub fn rollback(&mut self, reorder: &Reorder<Id>) -> bool {
        if reorder.generation != self.generation || self.sequence.ids() != reorder.order.as_slice() {
            return false;
        }
        self.sequence = Sequence::from_ids(reorder.previous.iter().cloned());
        self.generation += 1;
        true
    }
}
