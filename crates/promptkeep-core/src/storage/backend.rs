//! Document backend port.
//!
//! Defines the raw storage interface the document store is built on.
//! `JsonFileBackend` in promptkeep-infra is the production implementation.

/// Raw per-key text storage.
///
/// Backends do no locking of their own; the document store serializes all
/// access to a given key before calling in.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait DocumentBackend: Send + Sync {
    /// Read the stored text for `key`. `Ok(None)` when nothing is stored.
    fn read(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, std::io::Error>> + Send;

    /// Replace the stored text for `key`.
    ///
    /// MUST be atomic: on error the previous content is still readable.
    fn write(
        &self,
        key: &str,
        contents: &str,
    ) -> impl std::future::Future<Output = Result<(), std::io::Error>> + Send;
}
