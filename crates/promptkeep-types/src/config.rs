//! Global configuration types for promptkeep.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls the
//! history capacity, lock acquisition timeout, storage root, and server bind
//! address.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.promptkeep/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Maximum number of entries kept per history list.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Upper bound on waiting for a per-key lock, in milliseconds.
    /// `None` waits indefinitely.
    #[serde(default)]
    pub lock_timeout_ms: Option<u64>,

    /// Directory holding one JSON file per storage key.
    /// Defaults to `{data_dir}/storage` when unset.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,

    /// Default address for `pkeep serve`.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_history_capacity() -> usize {
    100
}

fn default_bind() -> String {
    "127.0.0.1:7861".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            lock_timeout_ms: None,
            storage_dir: None,
            bind: default_bind(),
        }
    }
}

impl GlobalConfig {
    /// History capacity with a floor of one entry.
    pub fn effective_history_capacity(&self) -> usize {
        self.history_capacity.max(1)
    }

    pub fn lock_timeout(&self) -> Option<Duration> {
        self.lock_timeout_ms.map(Duration::from_millis)
    }
}
