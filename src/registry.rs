//! Song Registry
//!
//! In-memory reflection of the rendered list: one `Row` per song, in
//! visual top-to-bottom order.

use std::collections::HashSet;

use crate::error::OrderError;
use crate::models::{OrderUpdate, Song, SongId};

/// Handle returned when a row is rendered, used to remove it later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowHandle(SongId);

impl RowHandle {
    pub fn new(id: SongId) -> Self {
        Self(id)
    }

    pub fn id(&self) -> SongId {
        self.0
    }
}

/// One rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub song: Song,
    /// Position at render time, drives the entrance animation
    pub stagger: usize,
}

impl Row {
    pub fn entrance_delay_ms(&self, stagger_ms: u32) -> u32 {
        self.stagger as u32 * stagger_ms
    }
}

#[derive(Debug, Clone, Default)]
pub struct SongRegistry {
    rows: Vec<Row>,
}

impl SongRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every row and render `songs` in sequence order
    pub fn replace_all(&mut self, songs: Vec<Song>) {
        self.rows = songs
            .into_iter()
            .enumerate()
            .map(|(stagger, song)| Row { song, stagger })
            .collect();
    }

    /// Render one song at the end of the list
    pub fn append(&mut self, song: Song) -> RowHandle {
        let handle = RowHandle(song.id);
        self.rows.retain(|row| row.song.id != song.id);
        self.rows.push(Row { song, stagger: 0 });
        handle
    }

    /// Remove a row; absent rows are ignored
    pub fn remove(&mut self, handle: RowHandle) -> Option<Song> {
        let index = self.position(handle.id())?;
        Some(self.rows.remove(index).song)
    }

    pub fn get(&self, id: SongId) -> Option<&Song> {
        self.rows.iter().find(|row| row.song.id == id).map(|row| &row.song)
    }

    pub fn position(&self, id: SongId) -> Option<usize> {
        self.rows.iter().position(|row| row.song.id == id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Ids in visual order
    pub fn ids(&self) -> Vec<SongId> {
        self.rows.iter().map(|row| row.song.id).collect()
    }

    /// Order for a song appended now. Not coordinated with other clients.
    pub fn next_order(&self) -> i32 {
        self.rows.len() as i32
    }

    pub fn set_title(&mut self, id: SongId, title: &str) -> bool {
        self.song_mut(id).map(|song| song.title = title.to_string()).is_some()
    }

    pub fn set_checked(&mut self, id: SongId, checked: bool) -> bool {
        self.song_mut(id).map(|song| song.is_checked = checked).is_some()
    }

    /// Rearrange rows to match `ids`, which must name every row exactly once
    pub fn apply_visual_order(&mut self, ids: &[SongId]) -> Result<(), OrderError> {
        let mut seen = HashSet::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(*id) {
                return Err(OrderError::Duplicate(*id));
            }
            if self.position(*id).is_none() {
                return Err(OrderError::Unknown(*id));
            }
        }
        if let Some(row) = self.rows.iter().find(|row| !seen.contains(&row.song.id)) {
            return Err(OrderError::Missing(row.song.id));
        }

        self.rows.sort_by_key(|row| ids.iter().position(|id| *id == row.song.id));
        Ok(())
    }

    /// Store confirmed order values
    pub fn set_orders(&mut self, updates: &[OrderUpdate]) {
        for update in updates {
            if let Some(song) = self.song_mut(update.id) {
                song.order = update.order;
            }
        }
    }

    fn song_mut(&mut self, id: SongId) -> Option<&mut Song> {
        self.rows.iter_mut().find(|row| row.song.id == id).map(|row| &mut row.song)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: SongId, title: &str, order: i32) -> Song {
        Song {
            id,
            title: title.to_string(),
            is_checked: false,
            order,
            created_at: None,
        }
    }

    fn registry(ids: &[SongId]) -> SongRegistry {
        let mut reg = SongRegistry::new();
        reg.replace_all(ids.iter().enumerate().map(|(i, id)| song(*id, "s", i as i32)).collect());
        reg
    }

    #[test]
    fn test_replace_all_staggers_by_position() {
        let reg = registry(&[10, 20, 30]);
        assert_eq!(reg.ids(), vec![10, 20, 30]);
        let delays: Vec<_> = reg.rows().iter().map(|r| r.entrance_delay_ms(80)).collect();
        assert_eq!(delays, vec![0, 80, 160]);
    }

    #[test]
    fn test_replace_all_clears_previous_rows() {
        let mut reg = registry(&[1, 2]);
        reg.replace_all(vec![song(3, "c", 0)]);
        assert_eq!(reg.ids(), vec![3]);
    }

    #[test]
    fn test_append_and_next_order() {
        let mut reg = registry(&[1]);
        assert_eq!(reg.next_order(), 1);
        let handle = reg.append(song(2, "b", 1));
        assert_eq!(handle.id(), 2);
        assert_eq!(reg.ids(), vec![1, 2]);
        assert_eq!(reg.rows()[1].stagger, 0);
        assert_eq!(reg.next_order(), 2);
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut reg = registry(&[1, 2]);
        assert!(reg.remove(RowHandle::new(1)).is_some());
        assert!(reg.remove(RowHandle::new(1)).is_none());
        assert_eq!(reg.ids(), vec![2]);
    }

    #[test]
    fn test_setters() {
        let mut reg = registry(&[1]);
        assert!(reg.set_title(1, "New"));
        assert!(reg.set_checked(1, true));
        assert!(!reg.set_title(9, "x"));
        let s = reg.get(1).unwrap();
        assert_eq!(s.title, "New");
        assert!(s.is_checked);
    }

    #[test]
    fn test_apply_visual_order() {
        let mut reg = registry(&[1, 2, 3]);
        reg.apply_visual_order(&[3, 1, 2]).unwrap();
        assert_eq!(reg.ids(), vec![3, 1, 2]);
    }

    #[test]
    fn test_apply_visual_order_rejects_bad_payloads() {
        let mut reg = registry(&[1, 2, 3]);
        assert_eq!(reg.apply_visual_order(&[1, 1, 2]), Err(OrderError::Duplicate(1)));
        assert_eq!(reg.apply_visual_order(&[1, 2, 4]), Err(OrderError::Unknown(4)));
        assert_eq!(reg.apply_visual_order(&[1, 2]), Err(OrderError::Missing(3)));
        // Untouched after rejections
        assert_eq!(reg.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_set_orders() {
        let mut reg = registry(&[1, 2]);
        reg.set_orders(&[OrderUpdate { id: 2, order: 0 }, OrderUpdate { id: 1, order: 1 }]);
        assert_eq!(reg.get(2).unwrap().order, 0);
        assert_eq!(reg.get(1).unwrap().order, 1);
    }
}
