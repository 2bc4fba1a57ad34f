//! Admin Reorder App
//!
//! Binds the configured lists and delete buttons to the server-rendered
//! page and hosts the toast.

use std::rc::Rc;

use leptos::prelude::*;

use crate::commands::FetchBackend;
use crate::components::ToastHost;
use crate::config::AdminConfig;
use crate::delete::bind_delete_buttons;
use crate::reorder::{attach_lists, bind_formset_events};
use crate::store::{new_notice_store, NoticeStore};

/// Wire every list and delete button found in the page
fn bind_page(config: &AdminConfig, notices: NoticeStore) {
    let backend = FetchBackend::new(config.csrf.clone());
    let lists = Rc::new(attach_lists(&config.lists, backend.clone(), notices));
    log::info!("{} of {} configured lists bound", lists.len(), config.lists.len());

    bind_formset_events(lists.clone());
    if let Some(delete) = &config.delete {
        bind_delete_buttons(delete.clone(), backend, lists);
    }
}

/// `config` is `None` when the embedded config was invalid; nothing is bound then.
#[component]
pub fn App(config: Option<AdminConfig>) -> impl IntoView {
    let notice_ms = config
        .as_ref()
        .map_or_else(|| AdminConfig::default().notice_ms, |c| c.notice_ms);
    let notices = new_notice_store(notice_ms);
    provide_context(notices);

    // Rows are already in the document; bind once after mount
    Effect::new(move |_| {
        if let Some(config) = &config {
            bind_page(config, notices);
        }
    });

    view! { <ToastHost /> }
}
