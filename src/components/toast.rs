//! Toast Component
//!
//! Bottom-right transient notice fed by the notice store.

use leptos::prelude::*;

use crate::store::{current_notice, use_notice_store, NoticeKind};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_notice_store();

    view! {
        {move || current_notice(&store).map(|notice| {
            let (class, background) = match notice.kind {
                NoticeKind::Success => ("admin-toast admin-toast-success", "#28a745"),
                NoticeKind::Error => ("admin-toast admin-toast-error", "#dc3545"),
            };
            // Inline so the admin stylesheet needs no additions
            let style = format!(
                "position: fixed; bottom: 20px; right: 20px; z-index: 10000; \
                 padding: 12px 20px; border-radius: 4px; color: #fff; background: {};",
                background
            );
            view! {
                <div class=class style=style role="status">
                    {notice.text}
                </div>
            }
        })}
    }
}
