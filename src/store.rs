//! UI State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store is a
//! mirror of the checklist context, refreshed from each `ListEvent`.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::context::{ListEvent, ListSnapshot};
use crate::models::{Song, SongId};
use crate::registry::Row;

/// What the views render
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Rows in visual order
    pub rows: Vec<Row>,
    /// Row whose title is being edited
    pub editing: Option<SongId>,
    /// Add form revealed
    pub form_open: bool,
    /// Last failure shown to the user
    pub error: Option<String>,
    /// Bumped on every failure so the banner timer can tell them apart
    pub error_seq: u32,
    /// First load finished
    pub loaded: bool,
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

/// Get the UI store from context
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Apply a context notification
pub fn apply_event(store: &UiStore, event: &ListEvent, snapshot: &ListSnapshot) {
    match event {
        ListEvent::Failed { message, .. } => {
            store.error().set(Some(message.clone()));
            store.error_seq().update(|seq| *seq = seq.wrapping_add(1));
        }
        ListEvent::Loaded { .. } => {
            store.loaded().set(true);
            sync_rows(store, snapshot);
        }
        _ => sync_rows(store, snapshot),
    }
}

fn sync_rows(store: &UiStore, snapshot: &ListSnapshot) {
    store.rows().set(snapshot.rows.clone());
    store.editing().set(snapshot.editing);
}

/// Current song for a row (tracked)
pub fn song(store: &UiStore, id: SongId) -> Option<Song> {
    store
        .rows()
        .read()
        .iter()
        .find(|row| row.song.id == id)
        .map(|row| row.song.clone())
}

/// Clear the banner if it still shows failure `seq`
pub fn dismiss_error(store: &UiStore, seq: u32) {
    if store.error_seq().get_untracked() == seq {
        store.error().set(None);
    }
}
