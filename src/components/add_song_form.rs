//! Add Song Form Component
//!
//! "+" button revealing a title input. Enter adds the song at the end of
//! the list; the input is cleared and hidden only once the add succeeded.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::use_checklist;
use crate::store::{use_ui_store, UiStateStoreFields};

#[component]
pub fn AddSongForm() -> impl IntoView {
    let ui = use_ui_store();
    let checklist = use_checklist();

    let (new_title, set_new_title) = signal(String::new());
    let input_ref = NodeRef::<html::Input>::new();

    // Focus the input when it appears
    Effect::new(move |_| {
        if ui.form_open().get() {
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
            }
        }
    });

    let add_song = move || {
        let title = new_title.get_untracked();
        if title.trim().is_empty() { return; }
        let ctx = checklist.get_value();
        spawn_local(async move {
            if ctx.add(&title).await.is_some() {
                set_new_title.set(String::new());
                ui.form_open().set(false);
            }
        });
    };

    view! {
        <div class="add-song">
            <button
                class="add-btn"
                title="Add song"
                on:click=move |_| ui.form_open().set(true)
            >
                "+"
            </button>

            <Show when=move || ui.form_open().get()>
                <input
                    type="text"
                    class="song-input"
                    placeholder="Song title..."
                    node_ref=input_ref
                    prop:value=move || new_title.get()
                    on:input=move |ev| set_new_title.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        match ev.key().as_str() {
                            "Enter" => add_song(),
                            "Escape" => ui.form_open().set(false),
                            _ => {}
                        }
                    }
                />
            </Show>
        </div>
    }
}
