//! DOM Binding
//!
//! Attaches a [`ReorderController`] to rows that already exist in the page.
//! Uses mouse events with a movement threshold (not native HTML5 drag) so a
//! plain click on a handle never turns into a drag.

use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

use crate::controller::{DropOutcome, Placement, Reorder, ReorderController};
use crate::sequence::Side;

/// Class on the row being dragged
pub const DRAGGING_CLASS: &str = "dragging";
/// Class on the marked drop target
pub const DRAG_OVER_CLASS: &str = "drag-over";
pub const DRAG_OVER_BEFORE_CLASS: &str = "drag-over-before";
pub const DRAG_OVER_AFTER_CLASS: &str = "drag-over-after";

/// What counts as a reorderable row and where its id lives
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowSelectors {
    pub container: String,
    pub row: String,
    pub handle: String,
    /// Read from the row first, then from its handle
    pub id_attribute: String,
}

/// One reorderable list bound to one container element
pub struct ReorderList<Id: Send + Sync + 'static> {
    container: Element,
    selectors: Rc<RowSelectors>,
    controller: StoredValue<ReorderController<Id>>,
    parse_id: Rc<dyn Fn(&str) -> Option<Id>>,
}

impl<Id: Send + Sync + 'static> Clone for ReorderList<Id> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            selectors: self.selectors.clone(),
            controller: self.controller,
            parse_id: self.parse_id.clone(),
        }
    }
}

impl<Id> ReorderList<Id>
where
    Id: Clone + Eq + Hash + Debug + Send + Sync + 'static,
{
    /// Look up the container and read its rows. `None` when the page has
    /// no such container.
    pub fn find<P>(selectors: RowSelectors, placement: Placement, threshold: i32, parse_id: P) -> Option<Self>
    where
        P: Fn(&str) -> Option<Id> + 'static,
    {
        let document = web_sys::window()?.document()?;
        let container = document.query_selector(&selectors.container).ok().flatten()?;
        let list = Self {
            container,
            selectors: Rc::new(selectors),
            controller: StoredValue::new(ReorderController::new(Vec::new(), placement).with_threshold(threshold)),
            parse_id: Rc::new(parse_id),
        };
        list.attach();
        Some(list)
    }

    pub fn selectors(&self) -> &RowSelectors {
        &self.selectors
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Current sequence ids, as last attached or dropped
    pub fn ids(&self) -> Vec<Id> {
        self.controller
            .try_with_value(|c| c.sequence().ids().to_vec())
            .unwrap_or_default()
    }

    /// Rows with a readable id, in DOM order. Malformed rows are skipped.
    pub fn rows(&self) -> Vec<(Id, Element)> {
        let Ok(nodes) = self.container.query_selector_all(&self.selectors.row) else {
            return Vec::new();
        };
        let mut rows = Vec::with_capacity(nodes.length() as usize);
        for idx in 0..nodes.length() {
            let Some(row) = nodes.item(idx).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            match self.read_id(&row) {
                Some(id) => rows.push((id, row)),
                None => log::debug!("skipping row {} without a valid {}", idx, self.selectors.id_attribute),
            }
        }
        rows
    }

    fn read_id(&self, row: &Element) -> Option<Id> {
        let attr = &self.selectors.id_attribute;
        let raw = row.get_attribute(attr).or_else(|| {
            row.query_selector(&self.selectors.handle)
                .ok()
                .flatten()
                .and_then(|h| h.get_attribute(attr))
        })?;
        (self.parse_id)(raw.trim())
    }

    /// Row containing `el` inside this list, with its id
    fn row_of(&self, el: &Element) -> Option<(Id, Element)> {
        let row = el.closest(&self.selectors.row).ok().flatten()?;
        let node: &web_sys::Node = &row;
        if !self.container.contains(Some(node)) {
            return None;
        }
        let id = self.read_id(&row)?;
        Some((id, row))
    }

    /// Re-read the rows after the owner inserted or removed some.
    /// Returns the number of rows in the sequence.
    pub fn attach(&self) -> usize {
        let ids: Vec<Id> = self.rows().into_iter().map(|(id, _)| id).collect();
        let count = ids.len();
        self.controller.update_value(|c| c.attach(ids));
        log::debug!("attached {} rows in {}", count, self.selectors.container);
        count
    }

    fn for_each_row(&self, selector: &str, f: impl Fn(&Element)) {
        if let Ok(nodes) = self.container.query_selector_all(selector) {
            for idx in 0..nodes.length() {
                if let Some(el) = nodes.item(idx).and_then(|n| n.dyn_into::<Element>().ok()) {
                    f(&el);
                }
            }
        }
    }

    fn clear_marks(&self) {
        let selector = format!(".{}", DRAG_OVER_CLASS);
        self.for_each_row(&selector, |el| {
            let _ = el
                .class_list()
                .remove_3(DRAG_OVER_CLASS, DRAG_OVER_BEFORE_CLASS, DRAG_OVER_AFTER_CLASS);
        });
    }

    fn clear_visuals(&self) {
        self.clear_marks();
        let selector = format!(".{}", DRAGGING_CLASS);
        self.for_each_row(&selector, |el| {
            let _ = el.class_list().remove_1(DRAGGING_CLASS);
        });
    }

    fn paint_mark(&self, rows: &[(Id, Element)]) {
        self.clear_marks();
        let Some(mark) = self.controller.try_with_value(|c| c.mark().cloned()).flatten() else {
            return;
        };
        if let Some((_, row)) = rows.iter().find(|(id, _)| *id == mark.target) {
            let side_class = match mark.side {
                Side::Before => DRAG_OVER_BEFORE_CLASS,
                Side::After => DRAG_OVER_AFTER_CLASS,
            };
            let _ = row.class_list().add_2(DRAG_OVER_CLASS, side_class);
        }
    }

    /// Move the source row next to the target row in the DOM
    fn move_row(&self, reorder: &Reorder<Id>, rows: &[(Id, Element)]) {
        let find = |wanted: &Id| rows.iter().find(|(id, _)| id == wanted).map(|(_, el)| el.clone());
        let (Some(source), Some(target)) = (find(&reorder.source), find(&reorder.target)) else {
            return;
        };
        let Some(parent) = target.parent_node() else {
            return;
        };
        let reference = match reorder.side {
            Side::Before => Some(web_sys::Node::from(target)),
            Side::After => target.next_sibling(),
        };
        if let Err(e) = parent.insert_before(&source, reference.as_ref()) {
            log::error!("failed to move row {:?}: {:?}", reorder.source, e);
        }
    }

    /// Put the rows back into `order` and make it the current sequence.
    ///
    /// Rows are laid out contiguously starting where the first row sits.
    pub fn apply_order(&self, order: &[Id]) {
        let rows = self.rows();
        let Some((_, first)) = rows.first() else {
            return;
        };
        let Some(parent) = first.parent_node() else {
            return;
        };
        let mut anchor = first.previous_sibling();
        for id in order {
            let Some((_, row)) = rows.iter().find(|(rid, _)| rid == id) else {
                continue;
            };
            let reference = match &anchor {
                Some(a) => a.next_sibling(),
                None => parent.first_child(),
            };
            if let Err(e) = parent.insert_before(row, reference.as_ref()) {
                log::error!("failed to restore row {:?}: {:?}", id, e);
                return;
            }
            anchor = Some(web_sys::Node::from(row.clone()));
        }
        self.attach();
    }

    /// Undo a failed reorder if it is still the latest one
    pub fn rollback(&self, reorder: &Reorder<Id>) -> bool {
        let restored = self
            .controller
            .try_update_value(|c| c.rollback(reorder))
            .unwrap_or(false);
        if restored {
            self.apply_order(&reorder.previous);
        }
        restored
    }

    /// Bind the gesture listeners. `on_drop` receives the outcome of every
    /// released gesture; for a reorder the DOM has already been rearranged.
    pub fn bind<F>(&self, on_drop: F)
    where
        F: Fn(DropOutcome<Id>) + 'static,
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Press on a handle (delegated, so rows added later need no rebinding)
        let list = self.clone();
        let on_mousedown = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            if ev.button() != 0 {
                return;
            }
            let Some(el) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Some(handle) = el.closest(&list.selectors.handle).ok().flatten() else {
                return;
            };
            let Some((id, _)) = list.row_of(&handle) else {
                log::debug!("press on a handle without a valid id");
                return;
            };
            // Keep the browser from selecting text while dragging
            ev.prevent_default();
            list.clear_visuals();
            let (x, y) = (ev.client_x(), ev.client_y());
            list.controller.update_value(|c| {
                c.press(id, x, y);
            });
        });
        let _ = self
            .container
            .add_event_listener_with_callback("mousedown", on_mousedown.as_ref().unchecked_ref());
        on_mousedown.forget();

        // Movement: start the drag past the threshold, then track the target
        let list = self.clone();
        let doc = document.clone();
        let on_mousemove = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            let (x, y) = (ev.client_x(), ev.client_y());
            let Some((started, dragging)) = list
                .controller
                .try_update_value(|c| (c.pointer_moved(x, y), c.is_dragging()))
            else {
                return;
            };
            if !dragging {
                return;
            }
            let rows = list.rows();
            if started {
                let source = list.controller.try_with_value(|c| c.source().cloned()).flatten();
                if let Some((_, row)) = rows.iter().find(|(id, _)| Some(id) == source.as_ref()) {
                    let _ = row.class_list().add_1(DRAGGING_CLASS);
                }
            }
            let hovered = doc
                .element_from_point(x as f32, y as f32)
                .and_then(|el| list.row_of(&el));
            let changed = match hovered {
                Some((id, row)) => {
                    let rect = row.get_bounding_client_rect();
                    let side = Side::from_pointer(y as f64, rect.top(), rect.height());
                    list.controller.try_update_value(|c| c.set_mark(id, side)).unwrap_or(false)
                }
                None => list.controller.try_update_value(|c| c.clear_mark()).unwrap_or(false),
            };
            if changed {
                list.paint_mark(&rows);
            }
        });
        let _ = document.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        on_mousemove.forget();

        // Release: splice against the order on screen right now
        let list = self.clone();
        let on_mouseup = Closure::<dyn FnMut(MouseEvent)>::new(move |_ev: MouseEvent| {
            let active = list
                .controller
                .try_with_value(|c| c.source().is_some())
                .unwrap_or(false);
            if !active {
                return;
            }
            let rows = list.rows();
            let ids: Vec<Id> = rows.iter().map(|(id, _)| id.clone()).collect();
            let outcome = list
                .controller
                .try_update_value(|c| {
                    c.attach(ids);
                    c.release()
                })
                .unwrap_or(DropOutcome::Cancelled);
            list.clear_visuals();

            match &outcome {
                DropOutcome::Reordered(reorder) => {
                    log::info!(
                        "moved {:?} from {} to {} in {}",
                        reorder.source,
                        reorder.from,
                        reorder.to,
                        list.selectors.container
                    );
                    list.move_row(reorder, &rows);
                }
                DropOutcome::Unchanged => log::debug!("drop left the order unchanged"),
                DropOutcome::Cancelled => log::debug!("drag cancelled"),
            }
            on_drop(outcome);
        });
        let _ = document.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        on_mouseup.forget();

        // Interruptions: Escape or losing focus drops the gesture
        let list = self.clone();
        let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Escape" && list.controller.try_update_value(|c| c.cancel()).unwrap_or(false) {
                list.clear_visuals();
                log::debug!("drag cancelled by Escape");
            }
        });
        let _ = document.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        on_keydown.forget();

        let list = self.clone();
        let on_blur = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
            if list.controller.try_update_value(|c| c.cancel()).unwrap_or(false) {
                list.clear_visuals();
            }
        });
        let _ = window.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref());
        on_blur.forget();
    }
}
