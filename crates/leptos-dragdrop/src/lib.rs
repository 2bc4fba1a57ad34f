//! Leptos DragDrop Utilities
//!
//! Drag-to-reorder for server-rendered row lists, using mouse events.
//! Uses movement threshold to distinguish click from drag.
//!
//! - [`sequence`]: ordered ids and the drop splice
//! - [`controller`]: per-list gesture state machine (no DOM)
//! - [`dom`]: binds a controller to rows already in the page

pub mod controller;
pub mod dom;
pub mod sequence;

pub use controller::{DropMark, DropOutcome, GestureState, Placement, Reorder, ReorderController, DRAG_THRESHOLD_PX};
pub use dom::{ReorderList, RowSelectors};
pub use sequence::{Sequence, Side};
