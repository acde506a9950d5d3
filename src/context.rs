//! Checklist Context
//!
//! Built once at startup and shared by every component. Runs each user
//! action against the remote store, keeps the registry and edit controller
//! in step, and reports every visible change to a single listener.
//!
//! All state sits behind `Rc<RefCell<..>>`; no borrow is held across an
//! `.await` or while the listener runs.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{error, info, warn};

use crate::editor::{Confirm, EditController};
use crate::error::RemoteFailure;
use crate::models::{NewSong, Song, SongId};
use crate::registry::{Row, RowHandle, SongRegistry};
use crate::remote::RemoteStore;
use crate::reorder;

/// User action, for failure reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Add,
    Delete,
    Rename,
    Toggle,
    Reorder,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Load => "load",
            Action::Add => "add",
            Action::Delete => "delete",
            Action::Rename => "rename",
            Action::Toggle => "toggle",
            Action::Reorder => "reorder",
        };
        f.write_str(name)
    }
}

/// Change notification for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    Loaded { count: usize },
    Added(RowHandle),
    Removed(RowHandle),
    CheckedChanged { id: SongId, checked: bool },
    EditorOpened { id: SongId, closed: Option<SongId> },
    EditorClosed { id: SongId },
    Renamed { id: SongId },
    Reordered,
    Failed { action: Action, message: String },
}

/// Registry state at the time of an event
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListSnapshot {
    pub rows: Vec<Row>,
    pub editing: Option<SongId>,
}

pub type Listener = Rc<dyn Fn(&ListEvent, &ListSnapshot)>;

/// Result of a confirm gesture on the inline editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    NotEditing,
    Reverted,
    Renamed,
    Failed,
}

#[derive(Clone)]
pub struct ChecklistContext {
    store: Rc<dyn RemoteStore>,
    registry: Rc<RefCell<SongRegistry>>,
    editor: Rc<RefCell<EditController>>,
    listener: Listener,
}

impl ChecklistContext {
    pub fn new(store: Rc<dyn RemoteStore>, listener: Listener) -> Self {
        Self {
            store,
            registry: Rc::new(RefCell::new(SongRegistry::new())),
            editor: Rc::new(RefCell::new(EditController::new())),
            listener,
        }
    }

    // ========================
    // Queries
    // ========================

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            rows: self.registry.borrow().rows().to_vec(),
            editing: self.editor.borrow().active().map(|e| e.id),
        }
    }

    /// Ids in visual order
    pub fn ids(&self) -> Vec<SongId> {
        self.registry.borrow().ids()
    }

    pub fn song(&self, id: SongId) -> Option<Song> {
        self.registry.borrow().get(id).cloned()
    }

    pub fn editing(&self) -> Option<SongId> {
        self.editor.borrow().active().map(|e| e.id)
    }

    // ========================
    // List
    // ========================

    /// Fetch every song and redraw the list from scratch
    pub async fn load(&self) -> bool {
        match self.store.list_ordered().await {
            Ok(songs) => {
                let count = songs.len();
                self.editor.borrow_mut().reset();
                self.registry.borrow_mut().replace_all(songs);
                info!("[LIST] Loaded {} songs", count);
                self.emit(ListEvent::Loaded { count });
                true
            }
            Err(err) => {
                self.fail(Action::Load, err);
                false
            }
        }
    }

    /// Create a song at the end of the list. Blank titles are ignored.
    pub async fn add(&self, title: &str) -> Option<RowHandle> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let draft = NewSong::new(title, self.registry.borrow().next_order());

        match self.store.create(&draft).await {
            Ok(song) => {
                info!("[LIST] Added song {} at order {}", song.id, song.order);
                let handle = self.registry.borrow_mut().append(song);
                self.emit(ListEvent::Added(handle));
                Some(handle)
            }
            Err(err) => {
                self.fail(Action::Add, err);
                None
            }
        }
    }

    /// Delete remotely, then drop the row. On failure the row stays.
    pub async fn delete(&self, handle: RowHandle) -> bool {
        let id = handle.id();
        if let Err(err) = self.store.delete(id).await {
            self.fail(Action::Delete, err);
            return false;
        }

        self.editor.borrow_mut().discard(id);
        let removed = self.registry.borrow_mut().remove(handle);
        if removed.is_some() {
            info!("[LIST] Deleted song {}", id);
            self.emit(ListEvent::Removed(handle));
        }
        true
    }

    /// Mirror a checkbox change and persist it. The row keeps the new
    /// value even if the remote call fails.
    pub async fn set_checked(&self, id: SongId, checked: bool) -> bool {
        let known = self.registry.borrow_mut().set_checked(id, checked);
        if !known {
            warn!("[LIST] Toggle for unknown song {}", id);
            return false;
        }
        self.emit(ListEvent::CheckedChanged { id, checked });

        match self.store.update_checked(id, checked).await {
            Ok(()) => true,
            Err(err) => {
                self.fail(Action::Toggle, err);
                false
            }
        }
    }

    // ========================
    // Inline Editing
    // ========================

    /// Open the inline editor on a row, closing any other one. Already
    /// editing this row is a no-op.
    pub fn begin_edit(&self, id: SongId) -> bool {
        let Some(song) = self.song(id) else {
            return false;
        };
        let already_open = self.editor.borrow().is_open(id);
        if already_open {
            return true;
        }
        let closed = self.editor.borrow_mut().open(&song);
        self.emit(ListEvent::EditorOpened { id, closed: closed.map(|e| e.id) });
        true
    }

    pub fn update_draft(&self, text: &str) {
        self.editor.borrow_mut().set_draft(text);
    }

    pub fn cancel_edit(&self) {
        let closed = self.editor.borrow_mut().cancel();
        if let Some(editor) = closed {
            self.emit(ListEvent::EditorClosed { id: editor.id });
        }
    }

    /// Confirm the open editor: revert on a no-op draft, otherwise send
    /// the new title. A failed update leaves the original title shown.
    pub async fn commit_edit(&self) -> EditOutcome {
        let confirm = self.editor.borrow_mut().confirm();
        let (id, title) = match confirm {
            None => return EditOutcome::NotEditing,
            Some(Confirm::Revert { id }) => {
                self.emit(ListEvent::EditorClosed { id });
                return EditOutcome::Reverted;
            }
            Some(Confirm::Submit { id, title }) => (id, title),
        };

        let result = self.store.update_title(id, &title).await;
        let closed = self.editor.borrow_mut().finish(id);

        let outcome = match result {
            Ok(()) => {
                self.registry.borrow_mut().set_title(id, &title);
                info!("[LIST] Renamed song {}", id);
                self.emit(ListEvent::Renamed { id });
                EditOutcome::Renamed
            }
            Err(err) => {
                self.fail(Action::Rename, err);
                EditOutcome::Failed
            }
        };
        if closed {
            self.emit(ListEvent::EditorClosed { id });
        }
        outcome
    }

    // ========================
    // Reordering
    // ========================

    /// Handle a completed drag: `ids` is the new visual order. The rows
    /// are rearranged at once; the dense order is then sent as one batch
    /// and never rolled back.
    pub async fn reorder(&self, ids: Vec<SongId>) -> bool {
        let updates = match reorder::dense_order(&ids) {
            Ok(updates) => updates,
            Err(err) => {
                warn!("[LIST] Rejected reorder: {}", err);
                return false;
            }
        };
        let applied = self.registry.borrow_mut().apply_visual_order(&ids);
        if let Err(err) = applied {
            warn!("[LIST] Rejected reorder: {}", err);
            return false;
        }
        self.emit(ListEvent::Reordered);

        match reorder::submit(self.store.as_ref(), &updates).await {
            Ok(()) => {
                self.registry.borrow_mut().set_orders(&updates);
                info!("[LIST] Reordered {} songs", updates.len());
                true
            }
            Err(err) => {
                self.fail(Action::Reorder, err);
                false
            }
        }
    }

    // ========================
    // Notification
    // ========================

    fn emit(&self, event: ListEvent) {
        let snapshot = self.snapshot();
        (self.listener)(&event, &snapshot);
    }

    fn fail(&self, action: Action, err: RemoteFailure) {
        error!("[LIST] Failed to {}: {}", action, err);
        self.emit(ListEvent::Failed {
            action,
            message: err.message().to_string(),
        });
    }
}
