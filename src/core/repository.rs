//! Item repository
//!
//! CRUD surface over one collection. Each operation derives the key, formats the
//! document address, calls the store and maps the typed store outcome onto the
//! caller's return shape.

use crate::adapters::cosmosdb::ClientConfigurator;
use crate::adapters::store::{DocumentStore, STATUS_NOT_FOUND, STATUS_NO_CONTENT};
use crate::domain::ids::{CollectionPath, DocumentLink, ItemKey};
use crate::domain::{Item, ItemStoreError, KeyedRequest, Result, StoreError};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Repository over a single item collection
///
/// # Example
///
/// ```rust
/// use itemstore::adapters::store::InMemoryStore;
/// use itemstore::core::ItemRepository;
/// use itemstore::domain::{CollectionPath, Item, ItemRequest};
/// use std::sync::Arc;
///
/// # async fn example() -> itemstore::domain::Result<()> {
/// let store = Arc::new(InMemoryStore::new());
/// let repository = ItemRepository::new(store, CollectionPath::new("testdb", "orders"));
///
/// let mut item = Item::new("order", "42").with_attribute("qty", 3);
/// repository.upsert_item(&mut item).await?;
///
/// let found = repository.fetch_by_key(&ItemRequest::new("order", "42")).await?;
/// assert_eq!(found.map(|found| found.id), Some(item.id));
/// # Ok(())
/// # }
/// ```
pub struct ItemRepository {
    /// Shared document store client
    store: Arc<dyn DocumentStore>,

    /// Collection all operations target
    collection: CollectionPath,

    /// Runtime that deferred reads run on; the caller's runtime when unset
    executor: Option<Handle>,
}

impl ItemRepository {
    /// Create a repository over `collection` using `store`
    pub fn new(store: Arc<dyn DocumentStore>, collection: CollectionPath) -> Self {
        tracing::info!(
            collection_path = %collection,
            endpoint = %store.endpoint(),
            "Item repository ready"
        );
        Self {
            store,
            collection,
            executor: None,
        }
    }

    /// Create a repository from an initialized configurator
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` if the configurator has not built its client.
    pub fn from_configurator(configurator: &ClientConfigurator) -> Result<Self> {
        Ok(Self::new(
            configurator.client()?,
            configurator.collection_path(),
        ))
    }

    /// Run deferred reads from [`get_item`](Self::get_item) on a dedicated runtime
    pub fn with_executor(mut self, executor: Handle) -> Self {
        self.executor = Some(executor);
        self
    }

    /// The collection this repository targets
    pub fn collection_path(&self) -> &CollectionPath {
        &self.collection
    }

    /// Address of the document with the given key
    pub fn document_link(&self, key: &ItemKey) -> DocumentLink {
        self.collection.document_link(key)
    }

    /// Point read of the item named by `request`
    ///
    /// Returns `Ok(None)` without calling the store when no key can be derived,
    /// and `Ok(None)` when the store has no such document.
    ///
    /// # Errors
    ///
    /// Returns any store failure other than "not found", and serialization errors
    /// when the stored document does not match the item shape.
    pub async fn fetch_by_key<R: KeyedRequest + ?Sized>(&self, request: &R) -> Result<Option<Item>> {
        let Some(key) = request.generate_key() else {
            tracing::debug!(request = ?request, "No key derivable from request, skipping lookup");
            return Ok(None);
        };

        let link = self.document_link(&key);
        let started = Instant::now();

        let item = match self.store.read_document(&link, key.as_str()).await {
            Ok(document) => Some(serde_json::from_value::<Item>(document.body)?),
            Err(StoreError::NotFound(_)) => {
                tracing::error!(request = ?request, link = %link, "Record not found for request");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, link = %link, "Failed to read item");
                return Err(e.into());
            }
        };

        tracing::info!(
            key = %key,
            found = item.is_some(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Time taken to fetch from Cosmos DB"
        );

        Ok(item)
    }

    /// Deferred point read
    ///
    /// Spawns [`fetch_by_key`](Self::fetch_by_key) on the repository's executor (or
    /// the current runtime) and returns the handle that completes with its result.
    ///
    /// # Panics
    ///
    /// Panics if no executor is set and this is called outside a tokio runtime.
    pub fn get_item<R>(self: &Arc<Self>, request: R) -> JoinHandle<Result<Option<Item>>>
    where
        R: KeyedRequest + 'static,
    {
        let repository = Arc::clone(self);
        let task = async move { repository.fetch_by_key(&request).await };
        match &self.executor {
            Some(executor) => executor.spawn(task),
            None => tokio::spawn(task),
        }
    }

    /// Insert or replace `item`
    ///
    /// Assigns the item id first (see [`Item::assign_id`]); the id is also the
    /// partition key.
    ///
    /// # Errors
    ///
    /// Returns any failure from id assignment, serialization or the store. No retry.
    pub async fn upsert_item(&self, item: &mut Item) -> Result<()> {
        let key = item.assign_id()?;
        tracing::debug!(key = %key, "Upserting item");

        let document = serde_json::to_value(&*item)?;
        self.store
            .upsert_document(&self.collection, key.as_str(), document)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, key = %key, "Failed to upsert item");
                ItemStoreError::from(e)
            })?;

        Ok(())
    }

    /// Delete the item named by `request`
    ///
    /// Reads the document first to resolve its stored address, then deletes at that
    /// address. The read and the delete are separate round trips: a concurrent
    /// delete in between surfaces as `NotFound`.
    ///
    /// # Errors
    ///
    /// - `Validation` if no key can be derived from `request`
    /// - `NotFound` if the document is missing or the store answers 404
    /// - `DeleteRejected` if the store answers with any status other than 204
    /// - `DeleteFailed` for every other store failure
    pub async fn delete_item<R: KeyedRequest + ?Sized>(&self, request: &R) -> Result<()> {
        let key = request.generate_key().ok_or_else(|| {
            ItemStoreError::Validation(format!("Cannot derive an item key from {request:?}"))
        })?;
        tracing::debug!(key = %key, "Deleting item");

        let link = self.document_link(&key);
        let resolved = match self.store.read_document(&link, key.as_str()).await {
            Ok(document) => document.link,
            Err(StoreError::NotFound(_)) => return Err(not_found(&link)),
            Err(e) => return Err(ItemStoreError::DeleteFailed(e)),
        };

        match self.store.delete_document(&resolved, key.as_str()).await {
            Ok(STATUS_NO_CONTENT) => {
                tracing::debug!(link = %resolved, deleted = true, "Item deleted");
                Ok(())
            }
            Ok(STATUS_NOT_FOUND) | Err(StoreError::NotFound(_)) => Err(not_found(&resolved)),
            Ok(status) => {
                tracing::warn!(link = %resolved, status, deleted = false, "Unexpected delete status");
                Err(ItemStoreError::DeleteRejected { status })
            }
            Err(e) => Err(ItemStoreError::DeleteFailed(e)),
        }
    }
}

fn not_found(link: &DocumentLink) -> ItemStoreError {
    ItemStoreError::NotFound(format!("Could not find document {link}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryStore;
    use crate::domain::ItemRequest;
    use serde_json::json;

    fn repository() -> (Arc<InMemoryStore>, ItemRepository) {
        let store = Arc::new(InMemoryStore::new());
        let repository =
            ItemRepository::new(store.clone(), CollectionPath::new("testdb", "orders"));
        (store, repository)
    }

    #[test]
    fn test_document_link_for_request_key() {
        let (_, repository) = repository();
        let key = ItemRequest::new("order", "42").generate_key().unwrap();
        assert_eq!(
            repository.document_link(&key).to_string(),
            "/dbs/testdb/colls/orders/docs/order-42"
        );
        assert_eq!(repository.collection_path().to_string(), "/dbs/testdb/colls/orders");
    }

    #[tokio::test]
    async fn test_fetch_without_key_skips_store() {
        let (store, repository) = repository();
        let found = repository.fetch_by_key(&ItemRequest::default()).await.unwrap();
        assert!(found.is_none());
        assert_eq!(store.call_counts().total(), 0);
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_none() {
        let (store, repository) = repository();
        store
            .fail_next_read(StoreError::NotFound(
                "Entity with the specified id does not exist in the system".to_string(),
            ))
            .await;

        let found = repository
            .fetch_by_key(&ItemRequest::new("order", "42"))
            .await
            .unwrap();
        assert!(found.is_none());
        assert_eq!(store.call_counts().reads, 1);
    }

    #[tokio::test]
    async fn test_fetch_propagates_other_errors() {
        let (store, repository) = repository();
        store
            .fail_next_read(StoreError::Fatal("401 Unauthorized".to_string()))
            .await;

        let err = repository
            .fetch_by_key(&ItemRequest::new("order", "42"))
            .await
            .unwrap_err();
        assert!(matches!(err, ItemStoreError::Store(StoreError::Fatal(_))));
    }

    #[tokio::test]
    async fn test_fetch_reads_numeric_key_field() {
        let (store, repository) = repository();
        store
            .upsert_document(
                repository.collection_path(),
                "order-42",
                json!({"id": "order-42", "item_type": "order", "item_number": 42}),
            )
            .await
            .unwrap();

        let item = repository
            .fetch_by_key(&ItemRequest::new("order", "42"))
            .await
            .unwrap()
            .expect("item should be readable");
        assert_eq!(item.id, "order-42");
        assert_eq!(item.item_number.as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn test_fetch_rejects_structured_key_field() {
        let (store, repository) = repository();
        store
            .upsert_document(
                repository.collection_path(),
                "order-42",
                json!({"id": "order-42", "item_type": {"name": "order"}}),
            )
            .await
            .unwrap();

        let err = repository
            .fetch_by_key(&ItemRequest::new("order", "42"))
            .await
            .unwrap_err();
        assert!(matches!(err, ItemStoreError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_upsert_failure_propagates() {
        let (store, repository) = repository();
        store
            .fail_next_upsert(StoreError::Transient("429".to_string()))
            .await;

        let mut item = Item::new("order", "42");
        let err = repository.upsert_item(&mut item).await.unwrap_err();
        assert!(matches!(err, ItemStoreError::Store(StoreError::Transient(_))));
        assert_eq!(store.call_counts().upserts, 1);
    }

    #[tokio::test]
    async fn test_delete_without_key_is_validation_error() {
        let (store, repository) = repository();
        let err = repository
            .delete_item(&ItemRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ItemStoreError::Validation(_)));
        assert_eq!(store.call_counts().total(), 0);
    }

    #[tokio::test]
    async fn test_delete_unexpected_status_is_rejected() {
        let (store, repository) = repository();
        repository
            .upsert_item(&mut Item::new("order", "42"))
            .await
            .unwrap();
        store.answer_next_delete_with(200).await;

        let err = repository
            .delete_item(&ItemRequest::new("order", "42"))
            .await
            .unwrap_err();
        assert!(matches!(err, ItemStoreError::DeleteRejected { status: 200 }));
    }

    #[tokio::test]
    async fn test_delete_404_status_is_not_found() {
        let (store, repository) = repository();
        repository
            .upsert_item(&mut Item::new("order", "42"))
            .await
            .unwrap();
        store.answer_next_delete_with(STATUS_NOT_FOUND).await;

        let err = repository
            .delete_item(&ItemRequest::new("order", "42"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_transport_error_is_wrapped() {
        let (store, repository) = repository();
        repository
            .upsert_item(&mut Item::new("order", "42"))
            .await
            .unwrap();
        store
            .fail_next_delete(StoreError::Transient("503".to_string()))
            .await;

        let err = repository
            .delete_item(&ItemRequest::new("order", "42"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ItemStoreError::DeleteFailed(StoreError::Transient(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_read_failure_is_wrapped() {
        let (store, repository) = repository();
        store
            .fail_next_read(StoreError::Fatal("403".to_string()))
            .await;

        let err = repository
            .delete_item(&ItemRequest::new("order", "42"))
            .await
            .unwrap_err();
        assert!(matches!(err, ItemStoreError::DeleteFailed(StoreError::Fatal(_))));
        assert_eq!(store.call_counts().deletes, 0);
    }

    #[tokio::test]
    async fn test_get_item_on_dedicated_executor() {
        let (_store, repository) = repository();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("itemstore-reader")
            .enable_all()
            .build()
            .unwrap();
        let repository = Arc::new(repository.with_executor(runtime.handle().clone()));

        repository
            .upsert_item(&mut Item::new("order", "42"))
            .await
            .unwrap();

        let found = repository
            .get_item(ItemRequest::new("order", "42"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.map(|item| item.id), Some("order-42".to_string()));

        runtime.shutdown_background();
    }
}
