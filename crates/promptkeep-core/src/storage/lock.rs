//! Per-key lock registry.
//!
//! Hands out one async mutex per storage key. Entries are created on first
//! use and never removed, so the table grows with the number of distinct keys
//! seen over the life of the registry.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use promptkeep_types::error::StoreError;

/// Exclusive hold on one storage key. Dropping it releases the key.
pub type KeyGuard = OwnedMutexGuard<()>;

/// Registry of per-key mutexes.
///
/// The `DashMap` is only touched for lookup-or-insert; the `Arc` is cloned
/// out before awaiting so no map shard guard is ever held across `.await`.
#[derive(Debug, Default)]
pub struct KeyLockRegistry {
    locks: DashMap<String, Arc<Mutex<()>>>,
    timeout: Option<Duration>,
}

impl KeyLockRegistry {
    /// Registry whose acquisitions wait indefinitely.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose acquisitions fail with `LockTimeout` after `timeout`.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self {
            locks: DashMap::new(),
            timeout,
        }
    }

    fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        if let Some(existing) = self.locks.get(key) {
            return existing.value().clone();
        }
        self.locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    /// Wait for exclusive access to `key`.
    pub async fn acquire(&self, key: &str) -> Result<KeyGuard, StoreError> {
        let lock = self.lock_for(key);
        match self.timeout {
            None => Ok(lock.lock_owned().await),
            Some(limit) => tokio::time::timeout(limit, lock.lock_owned())
                .await
                .map_err(|_| StoreError::LockTimeout {
                    key: key.to_string(),
                }),
        }
    }

    /// Number of distinct keys that have been locked so far.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
