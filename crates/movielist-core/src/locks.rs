use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async lock per movie id.
///
/// Waiters are served in arrival order. Slots nobody holds or waits on are
/// pruned on the next acquire.
#[derive(Debug, Default)]
pub struct MutationLocks {
    slots: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl MutationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, movie_id: &str) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.retain(|id, slot| id == movie_id || Arc::strong_count(slot) > 1);
            Arc::clone(slots.entry(movie_id.to_string()).or_default())
        };
        slot.lock_owned().await
    }

    /// Number of slots currently tracked.
    pub fn tracked(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_id_waits() {
        let locks = Arc::new(MutationLocks::new());
        let guard = locks.acquire("m1").await;

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire("m1").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_ids_do_not_block() {
        let locks = MutationLocks::new();
        let _first = locks.acquire("m1").await;
        let second = tokio::time::timeout(Duration::from_millis(100), locks.acquire("m2")).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_idle_slots_are_pruned() {
        let locks = MutationLocks::new();
        drop(locks.acquire("m1").await);
        drop(locks.acquire("m2").await);
        drop(locks.acquire("m3").await);
        assert_eq!(locks.tracked(), 1);
    }
}
