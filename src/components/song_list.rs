//! Song List Component
//!
//! Renders every row with drag-and-drop reordering.
//! Uses leptos-dragdrop: rows are drop targets, and so are the slots
//! before each row and after the last one.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;

use crate::app::use_checklist;
use crate::components::SongRow;
use crate::models::SongId;
use crate::store::{use_ui_store, UiStateStoreFields};

use leptos_dragdrop::*;

/// Song list with DnD support
#[component]
pub fn SongList(stagger_ms: u32) -> impl IntoView {
    let ui = use_ui_store();
    let checklist = use_checklist();

    // Create DnD signals
    let dnd = create_dnd_signals::<SongId>();

    // Drop completes with the new visual order; persist it as one batch
    bind_global_mouseup(
        dnd,
        move || checklist.get_value().ids(),
        move |dragged_id, ids| {
            info!("[DND] Dropped song {}, {} rows reordered", dragged_id, ids.len());
            let ctx = checklist.get_value();
            spawn_local(async move {
                ctx.reorder(ids).await;
            });
        },
    );

    view! {
        <ul class="song-list">
            <For
                each=move || ui.rows().get()
                key=|row| row.song.id
                children=move |row| {
                    let id = row.song.id;
                    view! {
                        <DropSlot dnd=dnd before=Some(id) />
                        <SongRow row=row dnd=dnd stagger_ms=stagger_ms />
                    }
                }
            />
            <DropSlot dnd=dnd before=None />
        </ul>
    }
}

/// Slot index in front of `before`; the end of the list for `None` or a
/// row that is gone
fn slot_index(ids: &[SongId], before: Option<SongId>) -> usize {
    before
        .and_then(|id| ids.iter().position(|other| *other == id))
        .unwrap_or(ids.len())
}

/// Drop zone in front of a row, or below the last row
#[component]
fn DropSlot(dnd: DndSignals<SongId>, before: Option<SongId>) -> impl IntoView {
    let ui = use_ui_store();

    // Rows are keyed by id, so the index is looked up when needed
    let index = move || {
        let ids: Vec<SongId> = ui.rows().read_untracked().iter().map(|row| row.song.id).collect();
        slot_index(&ids, before)
    };
    let on_mouseenter = make_on_slot_mouseenter(dnd, index);
    let on_mouseleave = make_on_mouseleave(dnd);

    // Is this zone the current drop target?
    let is_active = move || match dnd.drop_target_read.get() {
        Some(DropTarget::Slot(slot)) => {
            let len = ui.rows().read().len();
            slot.min(len) == index()
        }
        _ => false,
    };

    // Only show when dragging
    let is_dragging = move || dnd.dragging_id_read.get().is_some();

    let zone_class = move || {
        let mut c = String::from("drop-zone");
        if before.is_none() { c.push_str(" end"); }
        if !is_dragging() { c.push_str(" hidden"); }
        if is_active() { c.push_str(" active"); }
        c
    };

    view! {
        <li
            class=zone_class
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_index() {
        let ids = [10, 20, 30];
        assert_eq!(slot_index(&ids, Some(10)), 0);
        assert_eq!(slot_index(&ids, Some(30)), 2);
        assert_eq!(slot_index(&ids, None), 3);
        // Row deleted while the slot was still mounted
        assert_eq!(slot_index(&ids, Some(99)), 3);
    }
}
