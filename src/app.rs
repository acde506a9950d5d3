//! SongList Frontend App
//!
//! Builds the checklist context once, provides it to every component,
//! and lays out the page.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};
use reactive_stores::Store;

use crate::components::{AddSongForm, ErrorBanner, RecentLog, SongList};
use crate::config::AppConfig;
use crate::context::{ChecklistContext, ListEvent, ListSnapshot, Listener};
use crate::remote::{RemoteStore, SupabaseStore};
use crate::store::{self, UiState, UiStateStoreFields, UiStore};

/// Records kept by the log buffer when the config cannot be read
const FALLBACK_LOG_CAPACITY: usize = 200;

/// Log records shown with a configuration error
const CONFIG_ERROR_LOG_LINES: usize = 20;

/// Context handle shared with components. The context itself is
/// single-threaded, so it lives in local storage.
pub type ChecklistHandle = StoredValue<ChecklistContext, LocalStorage>;

/// Get the checklist handle from context
pub fn use_checklist() -> ChecklistHandle {
    expect_context::<ChecklistHandle>()
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_document();

    let capacity = config.as_ref().map(|c| c.log_capacity).unwrap_or(FALLBACK_LOG_CAPACITY);
    if rolling_logger::init_logger("SongList", capacity).is_err() {
        web_sys::console::warn_1(&"[APP] Logger already installed".into());
    }

    match config {
        Ok(config) => view! { <SongListPage config=config /> }.into_any(),
        Err(err) => {
            error!("[APP] Cannot start: {}", err);
            view! {
                <main class="app">
                    <div class="config-error" role="alert">
                        <h1>"Configuration error"</h1>
                        <p>{err.to_string()}</p>
                        <RecentLog limit=CONFIG_ERROR_LOG_LINES />
                    </div>
                </main>
            }
            .into_any()
        }
    }
}

#[component]
fn SongListPage(config: AppConfig) -> impl IntoView {
    // UI store mirrors the context; every context event lands here
    let ui: UiStore = Store::new(UiState::default());
    provide_context(ui);

    let remote: Rc<dyn RemoteStore> = Rc::new(SupabaseStore::new(&config));
    let listener: Listener = Rc::new(move |event: &ListEvent, snapshot: &ListSnapshot| {
        store::apply_event(&ui, event, snapshot)
    });
    let checklist: ChecklistHandle = StoredValue::new_local(ChecklistContext::new(remote, listener));
    provide_context(checklist);

    info!("[APP] Starting against {} (table {})", config.supabase_url, config.table);

    // Initial load
    Effect::new(move |_| {
        let ctx = checklist.get_value();
        spawn_local(async move {
            ctx.load().await;
        });
    });

    let stagger_ms = config.stagger_ms;
    let error_timeout_ms = config.error_timeout_ms;

    view! {
        <main class="app">
            <header class="app-header">
                <h1>"Songs"</h1>
                <AddSongForm />
            </header>

            <ErrorBanner timeout_ms=error_timeout_ms />

            <Show
                when=move || ui.loaded().get()
                fallback=|| view! { <p class="loading">"Loading..."</p> }
            >
                <SongList stagger_ms=stagger_ms />
            </Show>

            <p class="song-count">{move || format!("{} songs", ui.rows().read().len())}</p>
        </main>
    }
}
