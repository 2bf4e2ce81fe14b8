//! Global configuration loader for promptkeep.
//!
//! Reads `config.toml` from the data directory (`~/.promptkeep/` in
//! production) and deserializes it into [`GlobalConfig`]. Falls back to
//! defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use promptkeep_types::config::GlobalConfig;

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`GlobalConfig::default()`].
/// - Unreadable or unparseable file: logs a warning and returns the default.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Resolve the directory holding the per-key JSON files.
///
/// A relative `storage_dir` is taken relative to `data_dir`.
pub fn resolve_storage_dir(config: &GlobalConfig, data_dir: &Path) -> PathBuf {
    match &config.storage_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => data_dir.join(dir),
        None => data_dir.join("storage"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(tmp.path()).await;
        assert_eq!(config, GlobalConfig::default());
        assert_eq!(config.history_capacity, 100);
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
history_capacity = 25
lock_timeout_ms = 1500
storage_dir = "/var/lib/promptkeep"
bind = "0.0.0.0:9000"
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.history_capacity, 25);
        assert_eq!(config.lock_timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(config.storage_dir, Some(PathBuf::from("/var/lib/promptkeep")));
        assert_eq!(config.bind, "0.0.0.0:9000");
    }

    #[tokio::test]
    async fn load_global_config_partial_toml_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "history_capacity = 7\n")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.history_capacity, 7);
        assert_eq!(config.lock_timeout(), None);
        assert_eq!(config.bind, GlobalConfig::default().bind);
    }

    #[tokio::test]
    async fn load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn resolve_storage_dir_defaults_under_data_dir() {
        let data_dir = PathBuf::from("/home/user/.promptkeep");
        assert_eq!(
            resolve_storage_dir(&GlobalConfig::default(), &data_dir),
            PathBuf::from("/home/user/.promptkeep/storage")
        );
    }

    #[test]
    fn resolve_storage_dir_relative_and_absolute() {
        let data_dir = PathBuf::from("/home/user/.promptkeep");
        let relative = GlobalConfig {
            storage_dir: Some(PathBuf::from("docs")),
            ..GlobalConfig::default()
        };
        assert_eq!(
            resolve_storage_dir(&relative, &data_dir),
            PathBuf::from("/home/user/.promptkeep/docs")
        );

        let absolute = GlobalConfig {
            storage_dir: Some(PathBuf::from("/srv/prompts")),
            ..GlobalConfig::default()
        };
        assert_eq!(
            resolve_storage_dir(&absolute, &data_dir),
            PathBuf::from("/srv/prompts")
        );
    }
}
