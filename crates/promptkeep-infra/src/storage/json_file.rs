//! One pretty-printed JSON file per storage key.
//!
//! Layout:
//! ```text
//! {root}/
//!   history.txt2img.json
//!   favorite.txt2img.json
//!   some_key.json
//! ```
//!
//! Writes go to a temporary file in the same directory and are renamed over
//! the target, so a failed write never leaves a truncated document behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use promptkeep_core::storage::backend::DocumentBackend;
use promptkeep_core::storage::key::file_name;
use uuid::Uuid;

/// Filesystem implementation of [`DocumentBackend`].
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    root: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend storing documents under `root`. The directory is
    /// created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(file_name(key))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!(".{}.{}.tmp", file_name(key), Uuid::now_v7().simple()))
    }
}

impl DocumentBackend for JsonFileBackend {
    /// Invalid UTF-8 is decoded lossily rather than failing the read.
    async fn read(&self, key: &str) -> Result<Option<String>, std::io::Error> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn write(&self, key: &str, contents: &str) -> Result<(), std::io::Error> {
        tokio::fs::create_dir_all(&self.root).await?;

        let target = self.path_for(key);
        let temp = self.temp_path_for(key);

        if let Err(err) = tokio::fs::write(&temp, contents).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(err);
        }
        if let Err(err) = tokio::fs::rename(&temp, &target).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(err);
        }

        tracing::trace!(path = %target.display(), "document file replaced");
        Ok(())
    }
}
