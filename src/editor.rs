//! Edit-Mode Controller
//!
//! Owns the single inline title editor. Each title region is either in
//! `Display` or `Editing`; opening an editor always closes the one held
//! here, so at most one is ever open.

use crate::models::{Song, SongId};

/// The open editor
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEditor {
    pub id: SongId,
    /// Title captured when the editor opened; restored on revert
    pub original_title: String,
    pub draft: String,
    /// A title update for this editor is in flight
    pub submitting: bool,
}

/// What a confirm gesture resolved to
#[derive(Debug, Clone, PartialEq)]
pub enum Confirm {
    /// Empty or unchanged draft: editor closed, nothing to send
    Revert { id: SongId },
    /// Send `title`; the editor stays open until `finish`
    Submit { id: SongId, title: String },
}

#[derive(Debug, Default)]
pub struct EditController {
    active: Option<ActiveEditor>,
}

impl EditController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveEditor> {
        self.active.as_ref()
    }

    pub fn is_open(&self, id: SongId) -> bool {
        self.active.as_ref().is_some_and(|e| e.id == id)
    }

    /// Open an editor on `song`, force-closing the previous one.
    ///
    /// Returns the editor that was closed; its region shows
    /// `original_title` again. Opening the row already being edited keeps
    /// its draft and any update in flight.
    pub fn open(&mut self, song: &Song) -> Option<ActiveEditor> {
        if self.is_open(song.id) {
            return None;
        }
        self.active.replace(ActiveEditor {
            id: song.id,
            original_title: song.title.clone(),
            draft: song.title.clone(),
            submitting: false,
        })
    }

    pub fn set_draft(&mut self, text: &str) {
        if let Some(editor) = self.active.as_mut() {
            if !editor.submitting {
                editor.draft = text.to_string();
            }
        }
    }

    /// Resolve a confirm gesture. `None` when no editor is open or its
    /// update is already in flight.
    pub fn confirm(&mut self) -> Option<Confirm> {
        let editor = self.active.as_mut()?;
        if editor.submitting {
            return None;
        }
        let title = editor.draft.trim();
        if title.is_empty() || title == editor.original_title {
            let id = editor.id;
            self.active = None;
            return Some(Confirm::Revert { id });
        }
        editor.submitting = true;
        Some(Confirm::Submit {
            id: editor.id,
            title: title.to_string(),
        })
    }

    /// Close the editor for `id` once its update settled. Returns false if
    /// it was already replaced by another editor.
    pub fn finish(&mut self, id: SongId) -> bool {
        if self.is_open(id) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Discard the open editor without committing
    pub fn cancel(&mut self) -> Option<ActiveEditor> {
        self.active.take()
    }

    /// Close the editor if it belongs to a removed row
    pub fn discard(&mut self, id: SongId) -> bool {
        self.finish(id)
    }

    /// Editors do not survive a full reload
    pub fn reset(&mut self) {
        self.active = None;
    }
}
