//! Reorder Controller
//!
//! Turns the visual order reported by a completed drag into a dense
//! zero-based set of order updates, submitted as one batch.

use std::collections::HashSet;

use crate::error::{OrderError, RemoteResult};
use crate::models::{OrderUpdate, SongId};
use crate::remote::RemoteStore;

/// One `(id, position)` pair per row, top to bottom
pub fn dense_order(ids: &[SongId]) -> Result<Vec<OrderUpdate>, OrderError> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter()
        .enumerate()
        .map(|(position, id)| {
            if seen.insert(*id) {
                Ok(OrderUpdate { id: *id, order: position as i32 })
            } else {
                Err(OrderError::Duplicate(*id))
            }
        })
        .collect()
}

/// Submit the full set of updates in a single batch call
pub async fn submit(store: &dyn RemoteStore, updates: &[OrderUpdate]) -> RemoteResult<()> {
    if updates.is_empty() {
        return Ok(());
    }
    store.batch_update_order(updates).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{MemoryStore, Op};

    #[test]
    fn test_dense_order() {
        let updates = dense_order(&[20, 10, 30]).unwrap();
        assert_eq!(
            updates,
            vec![
                OrderUpdate { id: 20, order: 0 },
                OrderUpdate { id: 10, order: 1 },
                OrderUpdate { id: 30, order: 2 },
            ]
        );
    }

    #[test]
    fn test_dense_order_rejects_duplicates() {
        assert_eq!(dense_order(&[1, 2, 1]), Err(OrderError::Duplicate(1)));
    }

    #[tokio::test]
    async fn test_submit_is_one_call() {
        let store = MemoryStore::new();
        let updates = dense_order(&[2, 1]).unwrap();
        submit(&store, &updates).await.unwrap();
        assert_eq!(store.calls(), vec![Op::BatchOrder(updates)]);
    }

    #[tokio::test]
    async fn test_submit_empty_skips_remote() {
        let store = MemoryStore::new();
        submit(&store, &[]).await.unwrap();
        assert!(store.calls().is_empty());
    }
}
