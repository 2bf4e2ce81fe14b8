//! Favorites registry.
//!
//! Favorites for a prompt type live in the `favorite.<type>` list. Order is
//! chosen by the user through adjacent swaps; new entries go to the end.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;

use promptkeep_types::error::StoreError;
use promptkeep_types::prompt::{has_id, item_id, ListKind, PromptFields, PromptItem};

use crate::storage::backend::DocumentBackend;
use crate::storage::document::DocumentStore;
use crate::storage::list::ListStore;

pub struct FavoritesRegistry<B: DocumentBackend> {
    lists: ListStore<B>,
}

impl<B: DocumentBackend> Clone for FavoritesRegistry<B> {
    fn clone(&self) -> Self {
        Self {
            lists: self.lists.clone(),
        }
    }
}

impl<B: DocumentBackend> FavoritesRegistry<B> {
    pub fn new(documents: Arc<DocumentStore<B>>) -> Self {
        Self {
            lists: ListStore::new(documents),
        }
    }

    fn key(prompt_type: &str) -> String {
        ListKind::Favorite.key(prompt_type)
    }

    /// Favorites in their stored order.
    pub async fn list(&self, prompt_type: &str) -> Vec<PromptItem> {
        self.lists
            .get_list(&Self::key(prompt_type))
            .await
            .iter()
            .filter_map(PromptItem::from_value)
            .collect()
    }

    /// Ids currently in the favorites list.
    pub async fn ids(&self, prompt_type: &str) -> HashSet<String> {
        self.lists
            .get_list(&Self::key(prompt_type))
            .await
            .iter()
            .filter_map(item_id)
            .collect()
    }

    /// Mint a new favorite from `fields` and append it. No duplicate check.
    pub async fn push(
        &self,
        prompt_type: &str,
        fields: PromptFields,
    ) -> Result<PromptItem, StoreError> {
        let item = fields.mint();
        self.lists
            .push(&Self::key(prompt_type), item.to_value())
            .await?;
        tracing::debug!(prompt_type, id = %item.id, "favorite added");
        Ok(item)
    }

    /// Append `item` unless an entry with the same id is already present.
    /// Returns whether it was added.
    pub async fn add_if_absent(&self, prompt_type: &str, item: Value) -> Result<bool, StoreError> {
        let Some(id) = item_id(&item) else {
            return Ok(false);
        };
        self.lists
            .modify(&Self::key(prompt_type), move |list| {
                if list.iter().any(|existing| has_id(existing, &id)) {
                    false
                } else {
                    list.push(item);
                    true
                }
            })
            .await
    }

    /// Swap the entry with its predecessor. No-op at the top or when absent.
    pub async fn move_up(&self, prompt_type: &str, id: &str) -> Result<(), StoreError> {
        self.lists
            .modify(&Self::key(prompt_type), |list| {
                if let Some(pos) = list.iter().position(|v| has_id(v, id)) {
                    if pos > 0 {
                        list.swap(pos - 1, pos);
                    }
                }
            })
            .await
    }

    /// Swap the entry with its successor. No-op at the bottom or when absent.
    pub async fn move_down(&self, prompt_type: &str, id: &str) -> Result<(), StoreError> {
        self.lists
            .modify(&Self::key(prompt_type), |list| {
                if let Some(pos) = list.iter().position(|v| has_id(v, id)) {
                    if pos + 1 < list.len() {
                        list.swap(pos, pos + 1);
                    }
                }
            })
            .await
    }

    /// Remove the entry with `id`, if present.
    pub async fn unfavorite(&self, prompt_type: &str, id: &str) -> Result<(), StoreError> {
        self.lists
            .modify(&Self::key(prompt_type), |list| {
                if let Some(pos) = list.iter().position(|v| has_id(v, id)) {
                    list.remove(pos);
                }
            })
            .await
    }

    /// Set the name of the entry with `id`, if present.
    pub async fn rename(&self, prompt_type: &str, id: &str, name: &str) -> Result<(), StoreError> {
        let patch = PromptFields {
            name: Some(name.to_string()),
            ..Default::default()
        };
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
}
