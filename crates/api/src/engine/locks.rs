//! Per-handler import locks.
//!
//! Two concurrent page requests for the same handler would race on the
//! shared attachment directories and double-spend remote API calls, so
//! pages for one handler run strictly one at a time. Different handlers
//! are independent and proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct ImportLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ImportLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `handler`, waiting if an import page for the
    /// same handler is already running. The guard releases on drop.
    pub async fn acquire(&self, handler: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(handler.to_string()).or_default())
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_handler_serializes() {
        let locks = Arc::new(ImportLocks::new());

        let first = locks.acquire("zendesk").await;

        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire("zendesk").await;
            })
        };

        // The contender cannot finish while the first guard is held.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(first);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("lock was never released")
            .unwrap();
    }

    #[tokio::test]
    async fn different_handlers_are_independent() {
        let locks = ImportLocks::new();
        let _zendesk = locks.acquire("zendesk").await;
        // Acquiring a different handler must not block.
        let _other = tokio::time::timeout(Duration::from_millis(100), locks.acquire("freshdesk"))
            .await
            .expect("unrelated handler blocked");
    }
}
