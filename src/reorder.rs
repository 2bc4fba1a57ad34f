//! Reorderable Lists
//!
//! Binds every configured list found on the page and persists each
//! completed drag as one full-order snapshot.

use std::rc::Rc;

use leptos::task::spawn_local;
use leptos_dragdrop::{DropOutcome, Reorder, ReorderList, Sequence};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::commands::AdminBackend;
use crate::config::ListConfig;
use crate::error::AdminError;
use crate::models::ItemId;
use crate::store::{show_notice, Notice, NoticeStore};

pub type AdminList = ReorderList<ItemId>;

/// Send the complete post-drop order to the list's endpoint
pub async fn persist_reorder<B: AdminBackend>(
    backend: &B,
    list: &ListConfig,
    reorder: &Reorder<ItemId>,
) -> Result<(), AdminError> {
    log::info!("saving order of {} items to {}", reorder.order.len(), list.endpoint);
    backend.save_order(&list.endpoint, &reorder.order).await
}

/// Persist a released gesture. Only a reorder sends a request; `None`
/// means nothing was sent.
pub async fn save_outcome<B: AdminBackend>(
    backend: &B,
    list: &ListConfig,
    outcome: &DropOutcome<ItemId>,
) -> Option<Result<(), AdminError>> {
    match outcome {
        DropOutcome::Reordered(reorder) => Some(persist_reorder(backend, list, reorder).await),
        DropOutcome::Unchanged | DropOutcome::Cancelled => None,
    }
}

pub fn notice_for(list: &ListConfig, result: &Result<(), AdminError>) -> Notice {
    match result {
        Ok(()) => Notice::success(format!("✓ {}", list.success_message)),
        Err(e) => Notice::error(format!("Failed to save order: {}", e)),
    }
}

/// Copy the sort weights of `order` into each row's weight input
fn write_weights(list: &AdminList, config: &ListConfig, order: &[ItemId]) {
    let Some(selector) = &config.weight_field else {
        return;
    };
    let rows = list.rows();
    for (id, weight) in Sequence::from_ids(order.iter().cloned()).weights(config.weight_base, config.weight_step) {
        let input = rows
            .iter()
            .find(|(rid, _)| *rid == id)
            .and_then(|(_, row)| row.query_selector(selector).ok().flatten())
            .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok());
        if let Some(input) = input {
            input.set_value(&weight.to_string());
        }
    }
}

/// Find and bind every configured list present on this page
pub fn attach_lists<B>(configs: &[ListConfig], backend: B, notices: NoticeStore) -> Vec<AdminList>
where
    B: AdminBackend + Clone + 'static,
{
    let mut lists = Vec::new();
    for config in configs {
        let parser = config.clone();
        let found = ReorderList::find(config.selectors(), config.placement, config.drag_threshold, move |raw| {
            parser.parse_id(raw)
        });
        let Some(list) = found else {
            log::debug!("no {} on this page", config.container);
            continue;
        };
        log::info!("reorder ready for {} ({} rows)", config.container, list.ids().len());

        let bound = list.clone();
        let config = config.clone();
        let backend = backend.clone();
        list.bind(move |outcome| {
            let DropOutcome::Reordered(reorder) = &outcome else {
                return;
            };
            write_weights(&bound, &config, &reorder.order);

            let list = bound.clone();
            let config = config.clone();
            let backend = backend.clone();
            spawn_local(async move {
                let Some(result) = save_outcome(&backend, &config, &outcome).await else {
                    return;
                };
                if let (Err(e), DropOutcome::Reordered(reorder)) = (&result, &outcome) {
                    log::error!("failed to save order for {}: {}", config.container, e);
                    if config.rollback_on_failure && list.rollback(reorder) {
                        log::warn!("restored previous order of {}", config.container);
                        write_weights(&list, &config, &reorder.previous);
                    }
                }
                show_notice(notices, notice_for(&config, &result));
            });
        });
        lists.push(list);
    }
    lists
}

/// Re-attach all lists whenever the admin adds or removes inline rows
pub fn bind_formset_events(lists: Rc<Vec<AdminList>>) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    for event in ["formset:added", "formset:removed"] {
        let lists = lists.clone();
        let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
            for list in lists.iter() {
                list.attach();
            }
        });
        let _ = document.add_event_listener_with_callback(event, on_change.as_ref().unchecked_ref());
        on_change.forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NoticeKind;
    use crate::testing::{int_ids, Call, RecordingBackend};
    use futures::executor::block_on;
    use leptos_dragdrop::{DropOutcome, Placement, ReorderController, Side};

    fn drop_on(c: &mut ReorderController<ItemId>, source: i64, target: i64) -> DropOutcome<ItemId> {
        c.press(ItemId::Int(source), 0, 0);
        c.pointer_moved(0, 40);
        c.set_mark(ItemId::Int(target), Side::Before);
        c.release()
    }

    #[test]
    fn test_completed_drag_sends_full_new_order() {
        let backend = RecordingBackend::default();
        let config = ListConfig::new("#result_list tbody", "reorder/");
        let mut c = ReorderController::new(int_ids(&[10, 20, 30, 40]), Placement::Index);

        let DropOutcome::Reordered(reorder) = drop_on(&mut c, 10, 30) else {
            panic!("expected a reorder");
        };
        let result = block_on(persist_reorder(&backend, &config, &reorder));

        assert!(result.is_ok());
        assert_eq!(
            backend.calls(),
            vec![Call::SaveOrder {
                endpoint: "reorder/".to_string(),
                order: int_ids(&[20, 30, 10, 40]),
            }]
        );
        assert_eq!(c.sequence().ids(), int_ids(&[20, 30, 10, 40]).as_slice());
    }

    #[test]
    fn test_quick_successive_drags_send_snapshots() {
        let backend = RecordingBackend::default();
        let config = ListConfig::new("#result_list tbody", "reorder/");
        let mut c = ReorderController::new(int_ids(&[1, 2, 3, 4]), Placement::Index);

        let DropOutcome::Reordered(first) = drop_on(&mut c, 4, 2) else { panic!() };
        let DropOutcome::Reordered(second) = drop_on(&mut c, 1, 3) else { panic!() };
        // Completion order is not guaranteed; each payload stands alone
        block_on(persist_reorder(&backend, &config, &second)).unwrap();
        block_on(persist_reorder(&backend, &config, &first)).unwrap();

        let orders: Vec<Vec<ItemId>> = backend
            .calls()
            .into_iter()
            .map(|call| match call {
                Call::SaveOrder { order, .. } => order,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(orders, vec![int_ids(&[4, 2, 3, 1]), int_ids(&[1, 4, 2, 3])]);
    }

    #[test]
    fn test_completed_drag_saves_once() {
        let backend = RecordingBackend::default();
        let config = ListConfig::new("#result_list tbody", "reorder/");
        let mut c = ReorderController::new(int_ids(&[1, 2, 3]), Placement::Index);

        let outcome = drop_on(&mut c, 3, 1);
        let result = block_on(save_outcome(&backend, &config, &outcome));
        assert!(matches!(result, Some(Ok(()))));
        assert_eq!(
            backend.calls(),
            vec![Call::SaveOrder {
                endpoint: "reorder/".to_string(),
                order: int_ids(&[3, 1, 2]),
            }]
        );
    }

    #[test]
    fn test_drop_on_self_or_outside_is_not_saved() {
        let backend = RecordingBackend::default();
        let config = ListConfig::new("#result_list tbody", "reorder/");
        let mut c = ReorderController::new(int_ids(&[1, 2, 3]), Placement::Index);

        let on_self = drop_on(&mut c, 2, 2);
        assert_eq!(on_self, DropOutcome::Cancelled);
        assert!(block_on(save_outcome(&backend, &config, &on_self)).is_none());

        c.press(ItemId::Int(1), 0, 0);
        c.pointer_moved(0, 40);
        let outside = c.release();
        assert_eq!(outside, DropOutcome::Cancelled);
        assert!(block_on(save_outcome(&backend, &config, &outside)).is_none());

        assert!(block_on(save_outcome(&backend, &config, &DropOutcome::Unchanged)).is_none());
        assert!(backend.calls().is_empty());
        assert_eq!(c.sequence().ids(), int_ids(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn test_same_slot_drop_is_not_saved() {
        let backend = RecordingBackend::default();
        let config = ListConfig::new("#result_list tbody", "reorder/");
        let mut c = ReorderController::new(int_ids(&[1, 2, 3]), Placement::Pointer);

        // 2 onto the upper half of 3 stays where it is
        let outcome = drop_on(&mut c, 2, 3);
        assert_eq!(outcome, DropOutcome::Unchanged);
        assert!(block_on(save_outcome(&backend, &config, &outcome)).is_none());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_rejected_save_is_reported() {
        let backend = RecordingBackend::rejecting("bad order");
        let config = ListConfig::new("#result_list tbody", "reorder/");
        let mut c = ReorderController::new(int_ids(&[1, 2]), Placement::Index);
        let DropOutcome::Reordered(reorder) = drop_on(&mut c, 2, 1) else { panic!() };

        let result = block_on(persist_reorder(&backend, &config, &reorder));
        let notice = notice_for(&config, &result);
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text, "Failed to save order: Server rejected the request: bad order");
        // Optimistic: the new order stays unless rollback is requested
        assert_eq!(c.sequence().ids(), int_ids(&[2, 1]).as_slice());
        assert_eq!(backend.calls().len(), 1);
    }

    #[test]
    fn test_success_notice_uses_list_message() {
        let mut config = ListConfig::new(".inline-group tbody", "/admin/blog/event/reorder-photos/");
        config.success_message = "Photo order saved".to_string();
        let notice = notice_for(&config, &Ok(()));
        assert_eq!(notice, Notice::success("✓ Photo order saved"));
    }
}
