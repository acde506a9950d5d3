//! Song Row Component
//!
//! One row of the list: drag handle, title (double-click to rename),
//! checkbox, delete button.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;

use crate::app::use_checklist;
use crate::components::TitleEditor;
use crate::models::SongId;
use crate::registry::{Row, RowHandle};
use crate::store::{self, use_ui_store, UiStateStoreFields};

/// A single song row
#[component]
pub fn SongRow(
    row: Row,
    dnd: DndSignals<SongId>,
    stagger_ms: u32,
) -> impl IntoView {
    let ui = use_ui_store();
    let checklist = use_checklist();

    let id = row.song.id;
    let handle = RowHandle::new(id);
    let delay = row.entrance_delay_ms(stagger_ms);

    let title = move || store::song(&ui, id).map(|s| s.title).unwrap_or_default();
    let checked = move || store::song(&ui, id).is_some_and(|s| s.is_checked);
    let is_editing = move || ui.editing().get() == Some(id);

    // DnD handlers
    let on_mousedown = make_on_mousedown(dnd, id);
    let on_mouseenter = make_on_row_mouseenter(dnd, id);
    let on_mouseleave = make_on_mouseleave(dnd);

    // Visual state
    let is_dragging = move || dnd.dragging_id_read.get() == Some(id);
    let is_drop_target = move || {
        matches!(dnd.drop_target_read.get(), Some(DropTarget::Row(tid)) if tid == id)
    };

    let row_class = move || {
        let mut c = String::from("song-row slide-in-left");
        if checked() { c.push_str(" checked"); }
        if is_dragging() { c.push_str(" dragging"); }
        if is_drop_target() { c.push_str(" drop-target"); }
        c
    };

    let on_dblclick = move |_: web_sys::MouseEvent| {
        // A drag that ends on the title fires a stray dblclick
        if dnd.drag_just_ended_read.get_untracked() { return; }
        checklist.get_value().begin_edit(id);
    };

    let on_toggle = move |ev: web_sys::Event| {
        let value = event_target_checked(&ev);
        let ctx = checklist.get_value();
        spawn_local(async move {
            let _ = ctx.set_checked(id, value).await;
        });
    };

    let on_delete = move |_: web_sys::MouseEvent| {
        let ctx = checklist.get_value();
        spawn_local(async move {
            let _ = ctx.delete(handle).await;
        });
    };

    view! {
        <li
            class=row_class
            style=format!("animation-delay: {}ms;", delay)
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <span class="drag-handle" title="Drag to reorder" on:mousedown=on_mousedown>"⋮⋮"</span>

            // Title (60%)
            <div class="song-title" on:dblclick=on_dblclick>
                <Show
                    when=is_editing
                    fallback=move || view! { <span class="song-title-text">{title}</span> }
                >
                    <TitleEditor id=id />
                </Show>
            </div>

            // Checkbox (20%)
            <div class="song-check">
                <input type="checkbox" prop:checked=checked on:change=on_toggle />
            </div>

            // Delete (20%)
            <div class="song-delete">
                <button class="delete-btn" title="Delete" on:click=on_delete>"×"</button>
            </div>
        </li>
    }
}
