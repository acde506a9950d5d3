//! Title Editor Component
//!
//! Inline input that replaces a song title while renaming. Enter commits,
//! Escape cancels. Only the row named by the controller renders one.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::use_checklist;
use crate::models::SongId;

#[component]
pub fn TitleEditor(id: SongId) -> impl IntoView {
    let checklist = use_checklist();
    let input_ref = NodeRef::<html::Input>::new();

    let initial = checklist
        .get_value()
        .song(id)
        .map(|s| s.title)
        .unwrap_or_default();

    // Focus once mounted
    Effect::new(move |_| {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
            input.select();
        }
    });

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        match ev.key().as_str() {
            "Enter" => {
                ev.prevent_default();
                let ctx = checklist.get_value();
                spawn_local(async move {
                    ctx.commit_edit().await;
                });
            }
            "Escape" => checklist.get_value().cancel_edit(),
            _ => {}
        }
    };

    // Selecting a word must not reopen the editor underneath
    let on_dblclick = move |ev: web_sys::MouseEvent| ev.stop_propagation();

    view! {
        <input
            type="text"
            class="song-edit-input"
            node_ref=input_ref
            value=initial
            on:input=move |ev| checklist.get_value().update_draft(&event_target_value(&ev))
            on:keydown=on_keydown
            on:dblclick=on_dblclick
        />
    }
}
