//! Row Deletion
//!
//! Confirm, POST the id, then fade the row out and re-read every list.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::commands::AdminBackend;
use crate::config::DeleteConfig;
use crate::error::AdminError;
use crate::models::ItemId;
use crate::reorder::AdminList;

#[derive(Debug)]
pub enum DeleteOutcome {
    /// The user dismissed the confirmation; nothing was sent
    Declined,
    Deleted,
    Failed(AdminError),
}

/// Ask `confirm` first, then send exactly one delete request
pub async fn confirm_and_delete<B, C>(backend: &B, config: &DeleteConfig, id: &ItemId, confirm: C) -> DeleteOutcome
where
    B: AdminBackend,
    C: FnOnce(&str) -> bool,
{
    if !confirm(&config.confirm_message) {
        return DeleteOutcome::Declined;
    }
    match backend.delete_item(&config.endpoint_for(id), &config.field, id).await {
        Ok(()) => DeleteOutcome::Deleted,
        Err(e) => DeleteOutcome::Failed(e),
    }
}

/// Alert text for a failed delete
pub fn failure_message(err: &AdminError) -> String {
    match err {
        AdminError::Rejected { message } => format!("Failed to delete: {}", message),
        _ => "Error deleting item. Please try again.".to_string(),
    }
}

async fn fade_out_and_remove(row: web_sys::Element, fade_ms: u32) {
    if let Some(el) = row.dyn_ref::<web_sys::HtmlElement>() {
        let style = el.style();
        let _ = style.set_property("transition", &format!("all {}ms ease", fade_ms));
        let _ = style.set_property("opacity", "0");
        let _ = style.set_property("transform", "scale(0.8)");
    }
    TimeoutFuture::new(fade_ms).await;
    row.remove();
}

/// Delegated click handling for every delete button on the page
pub fn bind_delete_buttons<B>(config: DeleteConfig, backend: B, lists: Rc<Vec<AdminList>>)
where
    B: AdminBackend + Clone + 'static,
{
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let config = Rc::new(config);

    let on_click = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let button = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(&config.button).ok().flatten());
        let Some(button) = button else {
            return;
        };
        ev.prevent_default();

        let raw = button.get_attribute(&config.id_attribute).unwrap_or_default();
        let Some(id) = ItemId::parse(&raw, config.id_kind) else {
            log::warn!("delete button without a valid {}", config.id_attribute);
            return;
        };
        let row = button.closest(&config.row).ok().flatten();

        let config = config.clone();
        let backend = backend.clone();
        let lists = lists.clone();
        spawn_local(async move {
            let window = web_sys::window();
            let confirm = |message: &str| {
                window
                    .as_ref()
                    .and_then(|w| w.confirm_with_message(message).ok())
                    .unwrap_or(false)
            };
            match confirm_and_delete(&backend, &config, &id, confirm).await {
                DeleteOutcome::Declined => log::debug!("delete of {} declined", id),
                DeleteOutcome::Deleted => {
                    log::info!("deleted {}", id);
                    if let Some(row) = row {
                        fade_out_and_remove(row, config.fade_ms).await;
                    }
                    for list in lists.iter() {
                        list.attach();
                    }
                }
                DeleteOutcome::Failed(e) => {
                    log::error!("failed to delete {}: {}", id, e);
                    if let Some(w) = &window {
                        let _ = w.alert_with_message(&failure_message(&e));
                    }
                }
            }
        });
    });
    let _ = document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminConfig;
    use crate::testing::{Call, RecordingBackend};
    use futures::executor::block_on;

    fn config() -> DeleteConfig {
        AdminConfig::default().delete.expect("photo delete is on by default")
    }

    #[test]
    fn test_declined_sends_nothing() {
        let backend = RecordingBackend::default();
        let outcome = block_on(confirm_and_delete(&backend, &config(), &ItemId::Int(7), |_| false));
        assert!(matches!(outcome, DeleteOutcome::Declined));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_confirmed_sends_one_request() {
        let backend = RecordingBackend::default();
        let mut asked = None;
        let outcome = block_on(confirm_and_delete(&backend, &config(), &ItemId::Int(7), |msg| {
            asked = Some(msg.to_string());
            true
        }));
        assert!(matches!(outcome, DeleteOutcome::Deleted));
        assert_eq!(asked.as_deref(), Some("Delete this photo?"));
        assert_eq!(
            backend.calls(),
            vec![Call::Delete {
                endpoint: "/admin/blog/event/delete-photo/7/".to_string(),
                field: "photo_id".to_string(),
                id: ItemId::Int(7),
            }]
        );
    }

    #[test]
    fn test_endpoint_template_gets_id() {
        let backend = RecordingBackend::default();
        let cfg = DeleteConfig::new("/admin/blog/event/delete-photo/{id}/");
        block_on(confirm_and_delete(&backend, &cfg, &ItemId::Int(12), |_| true));
        let Call::Delete { endpoint, .. } = &backend.calls()[0] else {
            panic!("expected a delete");
        };
        assert_eq!(endpoint, "/admin/blog/event/delete-photo/12/");
    }

    #[test]
    fn test_rejected_delete_is_reported() {
        let backend = RecordingBackend::rejecting("Photo not found");
        let outcome = block_on(confirm_and_delete(&backend, &config(), &ItemId::Int(3), |_| true));
        let DeleteOutcome::Failed(err) = outcome else {
            panic!("expected failure");
        };
        assert_eq!(failure_message(&err), "Failed to delete: Photo not found");
        assert_eq!(
            failure_message(&AdminError::Transport("offline".into())),
            "Error deleting item. Please try again."
        );
    }
}
