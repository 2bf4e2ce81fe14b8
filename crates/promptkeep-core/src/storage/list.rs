//! List store: sequence-shaped documents.
//!
//! Any document that is not a JSON array reads as an empty list. Mutations are
//! read-modify-write under the key's lock; the list is copied out, changed
//! locally, and written back whole. A mutation that leaves the list unchanged
//! does not touch storage.

use std::sync::Arc;

use serde_json::Value;

use promptkeep_types::error::StoreError;

use super::backend::DocumentBackend;
use super::document::DocumentStore;

pub struct ListStore<B: DocumentBackend> {
    documents: Arc<DocumentStore<B>>,
}

impl<B: DocumentBackend> Clone for ListStore<B> {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
        }
    }
}

impl<B: DocumentBackend> ListStore<B> {
    pub fn new(documents: Arc<DocumentStore<B>>) -> Self {
        Self { documents }
    }

    /// The underlying document store.
    pub fn documents(&self) -> &Arc<DocumentStore<B>> {
        &self.documents
    }

    /// Current contents of the list at `key`.
    pub async fn get_list(&self, key: &str) -> Vec<Value> {
        self.documents.get(key).await.into_list()
    }

    /// Element at `index`, or `None` when out of range.
    pub async fn get_item(&self, key: &str, index: usize) -> Option<Value> {
        self.get_list(key).await.into_iter().nth(index)
    }

    /// Apply `f` to the list at `key` under its lock and persist the result
    /// if it changed.
    pub async fn modify<R, F>(&self, key: &str, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Vec<Value>) -> R + Send,
        R: Send,
    {
        self.documents
            .with_document(key, |doc| {
                let before = doc.into_list();
                let mut list = before.clone();
                let result = f(&mut list);
                let next = (list != before).then(|| Value::Array(list));
                (next, result)
            })
            .await
    }

    /// Append `item`.
    pub async fn push(&self, key: &str, item: Value) -> Result<(), StoreError> {
        self.modify(key, move |list| list.push(item)).await
    }

    /// Remove and return the last element.
    pub async fn pop(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.modify(key, |list| list.pop()).await
    }

    /// Remove and return the first element.
    pub async fn shift(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.modify(key, |list| {
            if list.is_empty() {
                None
            } else {
                Some(list.remove(0))
            }
        })
        .await
    }

    /// Remove the element at `index`. Out of range is a no-op.
    pub async fn remove_at(&self, key: &str, index: usize) -> Result<(), StoreError> {
        self.modify(key, |list| {
            if index < list.len() {
                list.remove(index);
            }
        })
        .await
    }

    /// Replace the document at `key` with an empty list.
    pub async fn clear(&self, key: &str) -> Result<(), StoreError> {
        self.documents.set(key, &Value::Array(Vec::new())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryBackend;
    use promptkeep_types::storage::Document;
    use serde_json::json;

    fn lists() -> ListStore<InMemoryBackend> {
        ListStore::new(Arc::new(DocumentStore::new(InMemoryBackend::new())))
    }

    #[tokio::test]
    async fn push_then_pop_is_lifo() {
        let lists = lists();
        lists.push("k", json!({"a": 1})).await.unwrap();
        assert_eq!(lists.pop("k").await.unwrap(), Some(json!({"a": 1})));
        assert!(lists.get_list("k").await.is_empty());
    }

    #[tokio::test]
    async fn push_then_shift_is_fifo() {
        let lists = lists();
        lists.push("k", json!(1)).await.unwrap();
        lists.push("k", json!(2)).await.unwrap();
        assert_eq!(lists.shift("k").await.unwrap(), Some(json!(1)));
        assert_eq!(lists.get_list("k").await, vec![json!(2)]);
    }

    #[tokio::test]
    async fn pop_and_shift_on_empty_return_none() {
        let lists = lists();
        assert_eq!(lists.pop("k").await.unwrap(), None);
        assert_eq!(lists.shift("k").await.unwrap(), None);
        assert!(lists.documents().backend().raw("k").is_none());
    }

    #[tokio::test]
    async fn get_item_is_bounds_checked() {
        let lists = lists();
        lists.push("k", json!("a")).await.unwrap();
        lists.push("k", json!("b")).await.unwrap();
        assert_eq!(lists.get_item("k", 1).await, Some(json!("b")));
        assert_eq!(lists.get_item("k", 2).await, None);
        assert_eq!(lists.get_item("missing", 0).await, None);
    }

    #[tokio::test]
    async fn remove_at_in_and_out_of_range() {
        let lists = lists();
        for i in 0..3 {
            lists.push("k", json!(i)).await.unwrap();
        }
        lists.remove_at("k", 1).await.unwrap();
        assert_eq!(lists.get_list("k").await, vec![json!(0), json!(2)]);

        lists.remove_at("k", 10).await.unwrap();
        assert_eq!(lists.get_list("k").await, vec![json!(0), json!(2)]);
    }

    #[tokio::test]
    async fn clear_writes_empty_array() {
        let lists = lists();
        lists.push("k", json!(1)).await.unwrap();
        lists.clear("k").await.unwrap();
        assert!(lists.get_list("k").await.is_empty());
        assert_eq!(
            lists.documents().get("k").await,
            Document::Value(json!([]))
        );
    }

    #[tokio::test]
    async fn non_array_document_reads_as_empty_list() {
        let lists = lists();
        lists.documents().set("k", &json!({"not": "a list"})).await.unwrap();
        assert!(lists.get_list("k").await.is_empty());
    }

    #[tokio::test]
    async fn pop_on_non_array_leaves_document_alone() {
        let lists = lists();
        lists.documents().set("k", &json!({"keep": true})).await.unwrap();
        assert_eq!(lists.pop("k").await.unwrap(), None);
        assert_eq!(
            lists.documents().get("k").await,
            Document::Value(json!({"keep": true}))
        );
    }

    #[tokio::test]
    async fn push_on_non_array_starts_fresh_list() {
        let lists = lists();
        lists.documents().set("k", &json!("scalar")).await.unwrap();
        lists.push("k", json!(1)).await.unwrap();
        assert_eq!(lists.get_list("k").await, vec![json!(1)]);
    }

    #[tokio::test]
    async fn failed_push_keeps_previous_list() {
        let lists = lists();
        lists.push("k", json!(1)).await.unwrap();
        lists.documents().backend().set_fail_writes(true);
        assert!(lists.push("k", json!(2)).await.is_err());
        lists.documents().backend().set_fail_writes(false);
        assert_eq!(lists.get_list("k").await, vec![json!(1)]);
    }

    #[tokio::test]
    async fn push_after_failed_read_keeps_previous_list() {
        let lists = lists();
        lists.push("k", json!(1)).await.unwrap();
        lists.documents().backend().set_fail_reads(true);
        assert!(lists.push("k", json!(2)).await.is_err());
        lists.documents().backend().set_fail_reads(false);
        assert_eq!(lists.get_list("k").await, vec![json!(1)]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_pushes_lose_no_updates() {
        let lists = lists();
        let mut handles = Vec::new();
        for i in 0..100 {
            let lists = lists.clone();
            handles.push(tokio::spawn(async move {
                lists.push("shared", json!({"n": i})).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let list = lists.get_list("shared").await;
        assert_eq!(list.len(), 100);
        let mut seen: Vec<i64> = list.iter().map(|v| v["n"].as_i64().unwrap()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..100).collect::<Vec<_>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_pushes_on_distinct_keys_are_independent() {
        let lists = lists();
        let mut handles = Vec::new();
        for i in 0..20 {
            let lists = lists.clone();
            handles.push(tokio::spawn(async move {
                let key = format!("key.{}", i % 4);
                lists.push(&key, json!(i)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        for k in 0..4 {
            assert_eq!(lists.get_list(&format!("key.{k}")).await.len(), 5);
        }
        assert_eq!(lists.documents().locks().len(), 4);
    }
}
