//! Notice Store
//!
//! Uses Leptos reactive_stores for the single transient toast.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
}

#[derive(Clone, Debug, Default, Store)]
pub struct NoticeState {
    /// Toast currently on screen
    pub current: Option<Notice>,
    /// Bumped for every notice so a stale timer cannot hide a newer one
    pub serial: u32,
    /// Display time in milliseconds
    pub duration_ms: u32,
}

pub type NoticeStore = Store<NoticeState>;

pub fn use_notice_store() -> NoticeStore {
    expect_context::<NoticeStore>()
}

pub fn new_notice_store(duration_ms: u32) -> NoticeStore {
    Store::new(NoticeState {
        duration_ms,
        ..Default::default()
    })
}

/// Current toast (tracked)
pub fn current_notice(store: &NoticeStore) -> Option<Notice> {
    store.current().get()
}

/// Replace the toast and schedule its dismissal
pub fn show_notice(store: NoticeStore, notice: Notice) {
    let serial = store.serial().get_untracked().wrapping_add(1);
    store.serial().set(serial);
    store.current().set(Some(notice));

    let duration = store.duration_ms().get_untracked();
    spawn_local(async move {
        TimeoutFuture::new(duration).await;
        dismiss_notice(store, serial);
    });
}

/// Hide the toast if it is still the one numbered `serial`
pub fn dismiss_notice(store: NoticeStore, serial: u32) {
    if store.serial().get_untracked() == serial {
        store.current().set(None);
    }
}
