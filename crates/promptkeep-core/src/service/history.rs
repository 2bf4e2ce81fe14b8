//! History ledger.
//!
//! Each prompt type keeps a bounded `history.<type>` list, oldest first. When
//! the list is full the oldest entries are evicted before a new one is
//! appended. Whether an entry is a favorite is never stored on the entry; it
//! is looked up in the matching favorites list on every read.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;

use promptkeep_types::error::StoreError;
use promptkeep_types::prompt::{has_id, HistoryEntry, ListKind, PromptFields, PromptItem};

use crate::service::favorite::FavoritesRegistry;
use crate::storage::backend::DocumentBackend;
use crate::storage::document::DocumentStore;
use crate::storage::list::ListStore;

/// Default number of entries kept per history list.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

pub struct HistoryLedger<B: DocumentBackend> {
    lists: ListStore<B>,
    favorites: FavoritesRegistry<B>,
    capacity: usize,
}

impl<B: DocumentBackend> HistoryLedger<B> {
    /// Create a ledger sharing `documents` with `favorites`.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(
        documents: Arc<DocumentStore<B>>,
        favorites: FavoritesRegistry<B>,
        capacity: usize,
    ) -> Self {
        Self {
            lists: ListStore::new(documents),
            favorites,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Registry used for favorite annotation and promotion.
    pub fn favorites(&self) -> &FavoritesRegistry<B> {
        &self.favorites
    }

    fn key(prompt_type: &str) -> String {
        ListKind::History.key(prompt_type)
    }

    /// Append a freshly minted entry, evicting the oldest entries first so the
    /// list never exceeds capacity.
    pub async fn push(
        &self,
        prompt_type: &str,
        fields: PromptFields,
    ) -> Result<PromptItem, StoreError> {
        let item = fields.mint();
        let value = item.to_value();
        let capacity = self.capacity;

        let evicted = self
            .lists
            .modify(&Self::key(prompt_type), move |list| {
                let mut evicted = 0usize;
                while list.len() >= capacity {
                    list.remove(0);
                    evicted += 1;
                }
                list.push(value);
                evicted
            })
            .await?;

        if evicted > 0 {
            tracing::debug!(prompt_type, evicted, "history at capacity, evicted oldest");
        }
        Ok(item)
    }

    /// All entries, oldest first, annotated with their favorite status.
    pub async fn list(&self, prompt_type: &str) -> Vec<HistoryEntry> {
        let items = self.lists.get_list(&Self::key(prompt_type)).await;
        let favorite_ids = self.favorites.ids(prompt_type).await;
        annotate(&items, &favorite_ids)
    }

    /// The most recent entry.
    pub async fn latest(&self, prompt_type: &str) -> Option<HistoryEntry> {
        let item = self
            .lists
            .get_list(&Self::key(prompt_type))
            .await
            .last()
            .and_then(PromptItem::from_value)?;
        let is_favorite = self.favorites.ids(prompt_type).await.contains(&item.id);
        Some(HistoryEntry { item, is_favorite })
    }

    /// Overwrite the supplied fields of the first entry with `id`. Unknown ids
    /// are ignored.
    pub async fn update(
        &self,
        prompt_type: &str,
        id: &str,
        patch: &PromptFields,
    ) -> Result<(), StoreError> {
        self.lists
            .modify(&Self::key(prompt_type), |list| {
                if let Some(object) = list
                    .iter_mut()
                    .find(|v| has_id(v, id))
                    .and_then(Value::as_object_mut)
                {
                    patch.apply_to(object);
                }
            })
            .await
    }

    pub async fn rename(&self, prompt_type: &str, id: &str, name: &str) -> Result<(), StoreError> {
        let patch = PromptFields {
            name: Some(name.to_string()),
            ..Default::default()
        };
        self.update(prompt_type, id, &patch).await
    }

    /// Remove the first entry with `id`, if any.
    pub async fn delete(&self, prompt_type: &str, id: &str) -> Result<(), StoreError> {
        self.lists
            .modify(&Self::key(prompt_type), |list| {
                if let Some(pos) = list.iter().position(|v| has_id(v, id)) {
                    list.remove(pos);
                }
            })
            .await
    }

    /// Drop every entry for `prompt_type`.
    pub async fn clear(&self, prompt_type: &str) -> Result<(), StoreError> {
        self.lists.clear(&Self::key(prompt_type)).await
    }

    /// Copy the entry with `id` into favorites unless it is already there.
    ///
    /// Returns `false` only when the history entry does not exist.
    pub async fn promote_to_favorite(
        &self,
        prompt_type: &str,
        id: &str,
    ) -> Result<bool, StoreError> {
        let source = self
            .lists
            .get_list(&Self::key(prompt_type))
            .await
            .into_iter()
            .find(|v| has_id(v, id));

        let Some(source) = source else {
            return Ok(false);
        };
        let added = self.favorites.add_if_absent(prompt_type, source).await?;
        tracing::debug!(prompt_type, id, added, "history entry promoted to favorite");
        Ok(true)
    }
}

fn annotate(items: &[Value], favorite_ids: &HashSet<String>) -> Vec<HistoryEntry> {
    items
        .iter()
        .filter_map(PromptItem::from_value)
        .map(|item| {
            let is_favorite = favorite_ids.contains(&item.id);
            HistoryEntry { item, is_favorite }
        })
        .collect()
}
