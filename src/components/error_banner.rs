//! Error Banner Component
//!
//! Shows the last failed action. Dismissed by hand or after a timeout.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::RecentLog;
use crate::store::{self, use_ui_store, UiStateStoreFields};

/// Log records shown under a failure
const DETAIL_LINES: usize = 8;

#[component]
pub fn ErrorBanner(timeout_ms: u32) -> impl IntoView {
    let ui = use_ui_store();

    // Each failure restarts the timer; a stale timer leaves newer errors alone
    Effect::new(move |_| {
        let seq = ui.error_seq().get();
        if ui.error().get_untracked().is_none() { return; }
        spawn_local(async move {
            TimeoutFuture::new(timeout_ms).await;
            store::dismiss_error(&ui, seq);
        });
    });

    view! {
        {move || ui.error().get().map(|message| view! {
            <div class="error-banner" role="alert">
                <span class="error-text">{message}</span>
                <button class="dismiss-btn" on:click=move |_| ui.error().set(None)>"×"</button>
                <details class="error-details">
                    <summary>"Details"</summary>
                    <RecentLog limit=DETAIL_LINES />
                </details>
            </div>
        })}
    }
}
