//! In-memory document backend.
//!
//! Keeps documents in a `HashMap` instead of on disk. Used by tests across the
//! workspace, and able to simulate read and write failures.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::backend::DocumentBackend;

#[derive(Debug, Default)]
pub struct InMemoryBackend {
    documents: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (or succeed again) without changing
    /// stored content.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Stored text for `key`, bypassing the store.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    /// Store arbitrary text for `key`, bypassing the store.
    pub fn insert_raw(&self, key: &str, contents: &str) {
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), contents.to_string());
    }
}

impl DocumentBackend for InMemoryBackend {
    async fn read(&self, key: &str) -> Result<Option<String>, std::io::Error> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("simulated read failure"));
        }
        Ok(self.raw(key))
    }

    async fn write(&self, key: &str, contents: &str) -> Result<(), std::io::Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("simulated write failure"));
        }
        self.insert_raw(key, contents);
        Ok(())
    }
}
