//! Document store: one opaque JSON value per key.
//!
//! Every access to a key (reads included) runs under that key's lock from the
//! [`KeyLockRegistry`], so a reader never observes a half-applied
//! read-modify-write. Different keys never contend.

use std::time::Duration;

use serde_json::Value;

use promptkeep_types::error::StoreError;
use promptkeep_types::storage::Document;

use super::backend::DocumentBackend;
use super::lock::KeyLockRegistry;

/// Locked get/set over a [`DocumentBackend`].
///
/// Owns its lock registry; all stores layered on top (list, history,
/// favorites) share one `DocumentStore` through an `Arc`, and therefore one
/// registry.
pub struct DocumentStore<B: DocumentBackend> {
    backend: B,
    locks: KeyLockRegistry,
}

impl<B: DocumentBackend> DocumentStore<B> {
    /// Create a store whose lock acquisitions wait indefinitely.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            locks: KeyLockRegistry::new(),
        }
    }

    /// Create a store whose lock acquisitions give up after `timeout`.
    pub fn with_lock_timeout(backend: B, timeout: Option<Duration>) -> Self {
        Self {
            backend,
            locks: KeyLockRegistry::with_timeout(timeout),
        }
    }

    /// Access the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Access the lock registry.
    pub fn locks(&self) -> &KeyLockRegistry {
        &self.locks
    }

    /// Read `key`. Missing, blank, unreadable, and corrupt documents are all
    /// `Document::Empty`.
    pub async fn get(&self, key: &str) -> Document {
        let _guard = match self.locks.acquire(key).await {
            Ok(guard) => guard,
            Err(e) => {
                tracing::warn!(key, error = %e, "lock unavailable, reading as empty");
                return Document::Empty;
            }
        };
        match self.read_locked(key).await {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read document, treating as empty");
                Document::Empty
            }
        }
    }

    /// Overwrite `key` with `value`.
    pub async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let _guard = self.locks.acquire(key).await?;
        self.write_locked(key, value).await
    }

    /// Read several keys, each independently, in input order.
    pub async fn get_many(&self, keys: &[String]) -> Vec<(String, Document)> {
        let mut out = Vec::with_capacity(keys.len());
        for key in keys {
            out.push((key.clone(), self.get(key).await));
        }
        out
    }

    /// Write several keys in order. Each write is independent; the first
    /// failure stops the batch and earlier writes stay applied.
    pub async fn set_many(&self, entries: &[(String, Value)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value).await?;
        }
        Ok(())
    }

    /// Read-modify-write `key` under its lock.
    ///
    /// `f` receives the current document and returns the replacement (or
    /// `None` to leave the stored document untouched) plus a result that is
    /// handed back to the caller. A backend read failure aborts before `f`
    /// runs, so an unreadable document is never replaced.
    pub async fn with_document<R, F>(&self, key: &str, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(Document) -> (Option<Value>, R) + Send,
        R: Send,
    {
        let _guard = self.locks.acquire(key).await?;
        let current = self.read_locked(key).await.map_err(|e| {
            tracing::error!(key, error = %e, "failed to read document for update");
            StoreError::from(e)
        })?;
        let (next, result) = f(current);
        if let Some(value) = next {
            self.write_locked(key, &value).await?;
        }
        Ok(result)
    }

    /// Missing, blank, and corrupt documents are `Empty`; only backend
    /// failures are errors.
    async fn read_locked(&self, key: &str) -> Result<Document, std::io::Error> {
        let Some(raw) = self.backend.read(key).await? else {
            return Ok(Document::Empty);
        };
        let doc = Document::parse(&raw);
        if doc.is_empty() && !raw.trim().is_empty() {
            tracing::warn!(key, "unparseable document, treating as empty");
        }
        Ok(doc)
    }

    async fn write_locked(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(value)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.backend.write(key, &contents).await.map_err(|e| {
            tracing::error!(key, error = %e, "failed to write document");
            StoreError::from(e)
        })?;
        tracing::debug!(key, bytes = contents.len(), "document written");
        Ok(())
    }
}
