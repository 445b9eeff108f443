//! Document store abstraction
//!
//! This module defines the trait the repository talks to. Bindings translate
//! logical addresses into vendor calls and report failures as typed
//! [`StoreError`](crate::domain::StoreError) values.

use crate::domain::ids::{CollectionPath, DocumentLink, ItemKey};
use crate::domain::{StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;

/// Reads the `id` property a document is stored under
pub(crate) fn document_id(document: &Value) -> StoreResult<ItemKey> {
    let id = document
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Fatal("document has no string id".to_string()))?;
    ItemKey::new(id).map_err(StoreError::Fatal)
}

/// Status the store reports for a successful delete
pub const STATUS_NO_CONTENT: u16 = 204;

/// Status the store reports for a missing document
pub const STATUS_NOT_FOUND: u16 = 404;

/// A document as returned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Canonical address of the stored document
    pub link: DocumentLink,

    /// Document body, including any store system properties
    pub body: Value,
}

/// Document store client
///
/// Implementations must be safe for concurrent use; the repository shares one
/// instance across all calls.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point read of a single document
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the document does not exist.
    async fn read_document(
        &self,
        link: &DocumentLink,
        partition_key: &str,
    ) -> StoreResult<StoredDocument>;

    /// Insert-or-replace a document in a collection
    ///
    /// The document id is taken from the `id` property of `document`.
    async fn upsert_document(
        &self,
        collection: &CollectionPath,
        partition_key: &str,
        document: Value,
    ) -> StoreResult<StoredDocument>;

    /// Delete the document at `link`, returning the status the store answered with
    async fn delete_document(&self, link: &DocumentLink, partition_key: &str) -> StoreResult<u16>;

    /// Service endpoint this store is bound to
    fn endpoint(&self) -> &str;
}
