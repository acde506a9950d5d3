//! Remote Store Layer
//!
//! Abstract interface to the remote `songs` table plus implementations:
//! - supabase: PostgREST over HTTP
//! - memory: in-process table for tests

mod supabase;
#[cfg(test)]
mod memory;

use async_trait::async_trait;

use crate::error::RemoteResult;
use crate::models::{NewSong, OrderUpdate, Song, SongId};

pub use supabase::SupabaseStore;
#[cfg(test)]
pub use memory::{MemoryStore, Op};

/// Remote row store for songs
///
/// Every call is a single best-effort round trip: no retries, no timeouts.
/// Futures are not `Send` because the browser fetch API is single-threaded.
#[async_trait(?Send)]
pub trait RemoteStore {
    /// Insert one song and return the stored row with its assigned id
    async fn create(&self, song: &NewSong) -> RemoteResult<Song>;

    /// All songs, ascending by `order`
    async fn list_ordered(&self) -> RemoteResult<Vec<Song>>;

    /// Delete by id; deleting an id that no longer exists succeeds
    async fn delete(&self, id: SongId) -> RemoteResult<()>;

    async fn update_title(&self, id: SongId, title: &str) -> RemoteResult<()>;

    async fn update_checked(&self, id: SongId, checked: bool) -> RemoteResult<()>;

    /// Apply a full set of order reassignments in one round trip
    async fn batch_update_order(&self, updates: &[OrderUpdate]) -> RemoteResult<()>;
}
