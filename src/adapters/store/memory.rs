//! In-memory document store
//!
//! Behaves like a single-region document store: documents are addressed by link and
//! partition key, reads with the wrong partition key miss, and the store adds
//! `_self` and `_etag` system properties. Call counters and one-shot fault
//! injection make it the test double for the repository.

use super::traits::{document_id, DocumentStore, StoredDocument, STATUS_NO_CONTENT};
use crate::domain::ids::{CollectionPath, DocumentLink};
use crate::domain::{StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::Mutex;

const MEMORY_ENDPOINT: &str = "memory://itemstore";

/// Number of calls made against each operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub reads: usize,
    pub upserts: usize,
    pub deletes: usize,
}

impl CallCounts {
    /// Sum over all operations
    pub fn total(&self) -> usize {
        self.reads + self.upserts + self.deletes
    }
}

#[derive(Default)]
struct Faults {
    read: Option<StoreError>,
    upsert: Option<StoreError>,
    delete: Option<StoreError>,
    delete_status: Option<u16>,
}

struct Entry {
    partition_key: String,
    body: Value,
}

/// Document store that keeps everything in process memory
#[derive(Default)]
pub struct InMemoryStore {
    documents: Mutex<HashMap<DocumentLink, Entry>>,
    faults: Mutex<Faults>,
    reads: AtomicUsize,
    upserts: AtomicUsize,
    deletes: AtomicUsize,
    etag: AtomicU64,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls made so far
    pub fn call_counts(&self) -> CallCounts {
        CallCounts {
            reads: self.reads.load(Ordering::SeqCst),
            upserts: self.upserts.load(Ordering::SeqCst),
            deletes: self.deletes.load(Ordering::SeqCst),
        }
    }

    /// Number of documents currently stored
    pub async fn len(&self) -> usize {
        self.documents.lock().await.len()
    }

    /// Returns true if no documents are stored
    pub async fn is_empty(&self) -> bool {
        self.documents.lock().await.is_empty()
    }

    /// Make the next read fail with `error`
    pub async fn fail_next_read(&self, error: StoreError) {
        self.faults.lock().await.read = Some(error);
    }

    /// Make the next upsert fail with `error`
    pub async fn fail_next_upsert(&self, error: StoreError) {
        self.faults.lock().await.upsert = Some(error);
    }

    /// Make the next delete fail with `error`
    pub async fn fail_next_delete(&self, error: StoreError) {
        self.faults.lock().await.delete = Some(error);
    }

    /// Make the next delete answer with `status` without touching the document
    pub async fn answer_next_delete_with(&self, status: u16) {
        self.faults.lock().await.delete_status = Some(status);
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn read_document(
        &self,
        link: &DocumentLink,
        partition_key: &str,
    ) -> StoreResult<StoredDocument> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.faults.lock().await.read.take() {
            return Err(error);
        }

        let documents = self.documents.lock().await;
        match documents.get(link) {
            Some(entry) if entry.partition_key == partition_key => Ok(StoredDocument {
                link: link.clone(),
                body: entry.body.clone(),
            }),
            _ => Err(StoreError::NotFound(link.to_string())),
        }
    }

    async fn upsert_document(
        &self,
        collection: &CollectionPath,
        partition_key: &str,
        mut document: Value,
    ) -> StoreResult<StoredDocument> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.faults.lock().await.upsert.take() {
            return Err(error);
        }

        let link = collection.document_link(&document_id(&document)?);

        let Some(body) = document.as_object_mut() else {
            return Err(StoreError::Fatal("document is not a JSON object".to_string()));
        };
        let etag = self.etag.fetch_add(1, Ordering::SeqCst) + 1;
        body.insert("_self".to_string(), Value::from(link.to_string()));
        body.insert("_etag".to_string(), Value::from(format!("\"{etag:08x}\"")));

        self.documents.lock().await.insert(
            link.clone(),
            Entry {
                partition_key: partition_key.to_string(),
                body: document.clone(),
            },
        );

        Ok(StoredDocument {
            link,
            body: document,
        })
    }

    async fn delete_document(&self, link: &DocumentLink, partition_key: &str) -> StoreResult<u16> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        {
            let mut faults = self.faults.lock().await;
            if let Some(error) = faults.delete.take() {
                return Err(error);
            }
            if let Some(status) = faults.delete_status.take() {
                return Ok(status);
            }
        }

        let mut documents = self.documents.lock().await;
        let present = documents
            .get(link)
            .is_some_and(|entry| entry.partition_key == partition_key);
        if present {
            documents.remove(link);
            Ok(STATUS_NO_CONTENT)
        } else {
            Err(StoreError::NotFound(link.to_string()))
        }
    }

    fn endpoint(&self) -> &str {
        MEMORY_ENDPOINT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::ItemKey;
    use serde_json::json;

    fn collection() -> CollectionPath {
        CollectionPath::new("testdb", "orders")
    }

    fn link(id: &str) -> DocumentLink {
        collection().document_link(&ItemKey::new(id).unwrap())
    }

    #[tokio::test]
    async fn test_upsert_then_read() {
        let store = InMemoryStore::new();
        store
            .upsert_document(&collection(), "order-42", json!({"id": "order-42", "qty": 1}))
            .await
            .unwrap();

        let doc = store.read_document(&link("order-42"), "order-42").await.unwrap();
        assert_eq!(doc.body["qty"], json!(1));
        assert_eq!(doc.body["_self"], json!("/dbs/testdb/colls/orders/docs/order-42"));
        assert_eq!(store.call_counts(), CallCounts { reads: 1, upserts: 1, deletes: 0 });
    }

    #[tokio::test]
    async fn test_read_with_wrong_partition_key_misses() {
        let store = InMemoryStore::new();
        store
            .upsert_document(&collection(), "order-42", json!({"id": "order-42"}))
            .await
            .unwrap();

        let err = store.read_document(&link("order-42"), "other").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_upsert_replaces_and_bumps_etag() {
        let store = InMemoryStore::new();
        let first = store
            .upsert_document(&collection(), "a", json!({"id": "a", "v": 1}))
            .await
            .unwrap();
        let second = store
            .upsert_document(&collection(), "a", json!({"id": "a", "v": 2}))
            .await
            .unwrap();

        assert_ne!(first.body["_etag"], second.body["_etag"]);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_upsert_without_id_is_fatal() {
        let store = InMemoryStore::new();
        let err = store
            .upsert_document(&collection(), "a", json!({"name": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Fatal(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = InMemoryStore::new();
        let err = store.delete_document(&link("nope"), "nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_faults_fire_once() {
        let store = InMemoryStore::new();
        store
            .fail_next_read(StoreError::Transient("throttled".to_string()))
            .await;

        let first = store.read_document(&link("a"), "a").await.unwrap_err();
        assert!(first.is_transient());
        let second = store.read_document(&link("a"), "a").await.unwrap_err();
        assert!(second.is_not_found());
    }

    #[tokio::test]
    async fn test_answer_next_delete_with_keeps_document() {
        let store = InMemoryStore::new();
        store
            .upsert_document(&collection(), "a", json!({"id": "a"}))
            .await
            .unwrap();
        store.answer_next_delete_with(200).await;

        assert_eq!(store.delete_document(&link("a"), "a").await.unwrap(), 200);
        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.delete_document(&link("a"), "a").await.unwrap(),
            STATUS_NO_CONTENT
        );
        assert!(store.is_empty().await);
    }
}
