//! Frontend Models
//!
//! Data structures matching the remote `songs` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Remote-assigned row identifier
pub type SongId = i64;

/// Song row (matches remote table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub is_checked: bool,
    /// Sort key, dense 0..N-1 after every reorder
    pub order: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new song
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSong {
    pub title: String,
    pub is_checked: bool,
    pub order: i32,
}

impl NewSong {
    /// New unchecked song appended at `order`
    pub fn new(title: &str, order: i32) -> Self {
        Self {
            title: title.to_string(),
            is_checked: false,
            order,
        }
    }
}

/// One entry of a batch order update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub id: SongId,
    pub order: i32,
}
