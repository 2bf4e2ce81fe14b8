//! Application state wiring the store and services together.
//!
//! AppState holds the concrete service instances used by both CLI and HTTP
//! handlers. Services are generic over the document backend; AppState pins
//! them to [`JsonFileBackend`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use promptkeep_core::service::favorite::FavoritesRegistry;
use promptkeep_core::service::history::HistoryLedger;
use promptkeep_core::storage::document::DocumentStore;
use promptkeep_core::storage::list::ListStore;
use promptkeep_core::translate::BoxTranslator;
use promptkeep_infra::config::{load_global_config, resolve_storage_dir};
use promptkeep_infra::filesystem::resolve_data_dir;
use promptkeep_infra::storage::json_file::JsonFileBackend;
use promptkeep_types::config::GlobalConfig;

pub type FileDocumentStore = DocumentStore<JsonFileBackend>;
pub type FileListStore = ListStore<JsonFileBackend>;
pub type FileHistoryLedger = HistoryLedger<JsonFileBackend>;
pub type FileFavoritesRegistry = FavoritesRegistry<JsonFileBackend>;

/// Shared application state.
///
/// Every store shares one [`FileDocumentStore`], and with it one per-key lock
/// registry.
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<FileDocumentStore>,
    pub lists: FileListStore,
    pub history: Arc<FileHistoryLedger>,
    pub favorites: FileFavoritesRegistry,
    pub translator: Option<Arc<BoxTranslator>>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data directory, load `config.toml`, and wire the stores.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;
        Ok(Self::from_config(&data_dir, config))
    }

    /// Wire the stores for an already loaded configuration.
    pub fn from_config(data_dir: &Path, config: GlobalConfig) -> Self {
        let storage_dir = resolve_storage_dir(&config, data_dir);
        tracing::debug!(storage_dir = %storage_dir.display(), "using storage directory");

        let documents = Arc::new(DocumentStore::with_lock_timeout(
            JsonFileBackend::new(storage_dir),
            config.lock_timeout(),
        ));
        let favorites = FavoritesRegistry::new(Arc::clone(&documents));
        let history = HistoryLedger::new(
            Arc::clone(&documents),
            favorites.clone(),
            config.effective_history_capacity(),
        );

        Self {
            lists: ListStore::new(Arc::clone(&documents)),
            documents,
            history: Arc::new(history),
            favorites,
            translator: None,
            config: Arc::new(config),
            data_dir: data_dir.to_path_buf(),
        }
    }

    /// Attach a translation provider for `/translate` and `/translates`.
    /// No provider ships with the binary, so only tests wire one today.
    #[cfg(test)]
    pub fn with_translator(mut self, translator: BoxTranslator) -> Self {
        self.translator = Some(Arc::new(translator));
        self
    }
}
