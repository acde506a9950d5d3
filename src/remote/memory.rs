//! In-Memory Remote Store
//!
//! Test double for `RemoteStore`: keeps rows in a `Vec`, journals every
//! call, and can be told to fail specific operations.

use std::cell::RefCell;
use std::collections::HashSet;

use async_trait::async_trait;
use futures::channel::oneshot;

use super::RemoteStore;
use crate::error::{RemoteFailure, RemoteResult};
use crate::models::{NewSong, OrderUpdate, Song, SongId};

/// Journaled remote call
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Create(String),
    List,
    Delete(SongId),
    UpdateTitle(SongId, String),
    UpdateChecked(SongId, bool),
    BatchOrder(Vec<OrderUpdate>),
}

impl Op {
    fn kind(&self) -> &'static str {
        match self {
            Op::Create(_) => "create",
            Op::List => "list",
            Op::Delete(_) => "delete",
            Op::UpdateTitle(..) => "update_title",
            Op::UpdateChecked(..) => "update_checked",
            Op::BatchOrder(_) => "batch_order",
        }
    }
}

#[derive(Default)]
struct Table {
    rows: Vec<Song>,
    next_id: SongId,
    calls: Vec<Op>,
    failing: HashSet<&'static str>,
    /// Next `update_title` waits on this before applying
    title_gate: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
pub struct MemoryStore {
    table: RefCell<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call of this kind fail until `recover` is called.
    /// Kinds: create, list, delete, update_title, update_checked, batch_order
    pub fn fail(&self, kind: &'static str) {
        self.table.borrow_mut().failing.insert(kind);
    }

    pub fn recover(&self, kind: &'static str) {
        self.table.borrow_mut().failing.remove(kind);
    }

    /// Hold the next `update_title` in flight until the returned sender
    /// fires (or is dropped)
    pub fn hold_title_update(&self) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.table.borrow_mut().title_gate = Some(gate);
        release
    }

    pub fn calls(&self) -> Vec<Op> {
        self.table.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.table.borrow_mut().calls.clear();
    }

    /// Current rows in storage order (not sorted)
    pub fn rows(&self) -> Vec<Song> {
        self.table.borrow().rows.clone()
    }

    pub fn row(&self, id: SongId) -> Option<Song> {
        self.table.borrow().rows.iter().find(|s| s.id == id).cloned()
    }

    /// Record the call, then fail if this kind is marked failing
    fn journal(&self, op: Op) -> RemoteResult<()> {
        let mut table = self.table.borrow_mut();
        let kind = op.kind();
        table.calls.push(op);
        if table.failing.contains(kind) {
            return Err(RemoteFailure::new(format!("{} failed", kind)));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl RemoteStore for MemoryStore {
    async fn create(&self, song: &NewSong) -> RemoteResult<Song> {
        self.journal(Op::Create(song.title.clone()))?;
        let mut table = self.table.borrow_mut();
        table.next_id += 1;
        let stored = Song {
            id: table.next_id,
            title: song.title.clone(),
            is_checked: song.is_checked,
            order: song.order,
            created_at: Some(chrono::Utc::now()),
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn list_ordered(&self) -> RemoteResult<Vec<Song>> {
        self.journal(Op::List)?;
        let mut rows = self.table.borrow().rows.clone();
        // Stable: insertion order breaks ties like created_at would
        rows.sort_by_key(|s| s.order);
        Ok(rows)
    }

    async fn delete(&self, id: SongId) -> RemoteResult<()> {
        self.journal(Op::Delete(id))?;
        self.table.borrow_mut().rows.retain(|s| s.id != id);
        Ok(())
    }

    async fn update_title(&self, id: SongId, title: &str) -> RemoteResult<()> {
        self.journal(Op::UpdateTitle(id, title.to_string()))?;
        let gate = self.table.borrow_mut().title_gate.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(song) = self.table.borrow_mut().rows.iter_mut().find(|s| s.id == id) {
            song.title = title.to_string();
        }
        Ok(())
    }

    async fn update_checked(&self, id: SongId, checked: bool) -> RemoteResult<()> {
        self.journal(Op::UpdateChecked(id, checked))?;
        if let Some(song) = self.table.borrow_mut().rows.iter_mut().find(|s| s.id == id) {
            song.is_checked = checked;
        }
        Ok(())
    }

    async fn batch_update_order(&self, updates: &[OrderUpdate]) -> RemoteResult<()> {
        self.journal(Op::BatchOrder(updates.to_vec()))?;
        let mut table = self.table.borrow_mut();
        for update in updates {
            if let Some(song) = table.rows.iter_mut().find(|s| s.id == update.id) {
                song.order = update.order;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let store = MemoryStore::new();
        let a = store.create(&NewSong::new("A", 0)).await.unwrap();
        store.delete(a.id).await.unwrap();
        let b = store.create(&NewSong::new("B", 0)).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_list_sorted_by_order() {
        let store = MemoryStore::new();
        let a = store.create(&NewSong::new("A", 1)).await.unwrap();
        let b = store.create(&NewSong::new("B", 0)).await.unwrap();
        let ids: Vec<_> = store.list_ordered().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn test_failure_is_journaled_and_recoverable() {
        let store = MemoryStore::new();
        store.fail("delete");
        assert!(store.delete(1).await.is_err());
        store.recover("delete");
        assert!(store.delete(1).await.is_ok());
        assert_eq!(store.calls(), vec![Op::Delete(1), Op::Delete(1)]);
    }
}
