//! Integration tests for the item repository
//!
//! All tests run against the in-memory document store.

use itemstore::adapters::store::{DocumentStore, InMemoryStore};
use itemstore::core::ItemRepository;
use itemstore::domain::ids::ItemKey;
use itemstore::domain::{
    CollectionPath, Item, ItemRequest, ItemStoreError, KeyedRequest, StoreError,
};
use serde_json::json;
use std::sync::Arc;

fn create_repository() -> (Arc<InMemoryStore>, Arc<ItemRepository>) {
    let store = Arc::new(InMemoryStore::new());
    let repository = ItemRepository::new(store.clone(), CollectionPath::new("testdb", "orders"));
    (store, Arc::new(repository))
}

fn order_42() -> Item {
    Item::new("order", "42")
        .with_attribute("qty", 3)
        .with_attribute("customer", "acme")
}

#[tokio::test]
async fn test_fetch_existing_item() {
    let (_store, repository) = create_repository();
    let mut item = order_42();
    repository.upsert_item(&mut item).await.unwrap();

    let found = repository
        .fetch_by_key(&ItemRequest::new("order", "42"))
        .await
        .unwrap()
        .expect("item should exist");

    assert_eq!(found.id, "order-42");
    assert_eq!(found.attribute("qty"), Some(&json!(3)));
    assert_eq!(found.attribute("customer"), Some(&json!("acme")));
}

#[tokio::test]
async fn test_fetch_missing_item_is_none() {
    let (store, repository) = create_repository();
    let found = repository
        .fetch_by_key(&ItemRequest::new("order", "404"))
        .await
        .unwrap();
    assert!(found.is_none());
    assert_eq!(store.call_counts().reads, 1);
}

#[tokio::test]
async fn test_fetch_blank_key_makes_no_store_call() {
    let (store, repository) = create_repository();
    let requests = [
        ItemRequest::default(),
        ItemRequest::new("   ", "42"),
        ItemRequest::new("order", ""),
    ];

    for request in &requests {
        assert!(repository.fetch_by_key(request).await.unwrap().is_none());
    }
    assert_eq!(store.call_counts().total(), 0);
}

#[tokio::test]
async fn test_upsert_is_idempotent() {
    let (store, repository) = create_repository();

    let mut first = order_42();
    repository.upsert_item(&mut first).await.unwrap();
    let mut second = order_42();
    repository.upsert_item(&mut second).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(store.len().await, 1);

    let found = repository
        .fetch_by_key(&ItemRequest::new("order", "42"))
        .await
        .unwrap();
    let found = found.unwrap();
    assert_eq!(found.id, second.id);
    assert_eq!(found.attribute("qty"), second.attribute("qty"));
}

#[tokio::test]
async fn test_upsert_replaces_content() {
    let (store, repository) = create_repository();
    repository.upsert_item(&mut order_42()).await.unwrap();

    let mut updated = Item::new("order", "42").with_attribute("qty", 7);
    repository.upsert_item(&mut updated).await.unwrap();

    let found = repository
        .fetch_by_key(&ItemRequest::new("order", "42"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.attribute("qty"), Some(&json!(7)));
    assert!(found.attribute("customer").is_none());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_delete_then_fetch_is_none() {
    let (store, repository) = create_repository();
    repository.upsert_item(&mut order_42()).await.unwrap();

    repository
        .delete_item(&ItemRequest::new("order", "42"))
        .await
        .unwrap();

    let found = repository
        .fetch_by_key(&ItemRequest::new("order", "42"))
        .await
        .unwrap();
    assert!(found.is_none());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_delete_missing_item_is_not_found() {
    let (store, repository) = create_repository();
    let err = repository
        .delete_item(&ItemRequest::new("order", "42"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("/dbs/testdb/colls/orders/docs/order-42"));
    assert_eq!(store.call_counts().deletes, 0);
}

#[tokio::test]
async fn test_document_link_format() {
    let (_store, repository) = create_repository();
    let key = ItemRequest::new("order", "42").generate_key().unwrap();
    assert_eq!(
        repository.document_link(&key).to_string(),
        "/dbs/testdb/colls/orders/docs/order-42"
    );
}

#[tokio::test]
async fn test_injected_not_found_is_none() {
    let (store, repository) = create_repository();
    repository.upsert_item(&mut order_42()).await.unwrap();
    store
        .fail_next_read(StoreError::NotFound("Resource Not Found".to_string()))
        .await;

    let found = repository
        .fetch_by_key(&ItemRequest::new("order", "42"))
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_generated_id_is_readable() {
    let (_store, repository) = create_repository();
    let mut item: Item = serde_json::from_value(json!({"id": "", "name": "x"})).unwrap();

    repository.upsert_item(&mut item).await.unwrap();
    assert!(!item.id.is_empty());

    let key = ItemKey::new(item.id.as_str()).unwrap();
    let found = repository.fetch_by_key(&key).await.unwrap().unwrap();
    assert_eq!(found.id, item.id);
    assert_eq!(found.attribute("name"), Some(&json!("x")));
}

#[tokio::test]
async fn test_generated_id_is_stable_for_same_content() {
    let (store, repository) = create_repository();
    let mut first: Item = serde_json::from_value(json!({"id": "", "name": "x"})).unwrap();
    let mut second: Item = serde_json::from_value(json!({"name": "x"})).unwrap();

    repository.upsert_item(&mut first).await.unwrap();
    repository.upsert_item(&mut second).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_transient_read_error_propagates() {
    let (store, repository) = create_repository();
    store
        .fail_next_read(StoreError::Transient("429 Too Many Requests".to_string()))
        .await;

    let err = repository
        .fetch_by_key(&ItemRequest::new("order", "42"))
        .await
        .unwrap_err();
    assert!(matches!(err, ItemStoreError::Store(ref e) if e.is_transient()));
}

#[tokio::test]
async fn test_delete_unexpected_status_is_rejected() {
    let (store, repository) = create_repository();
    repository.upsert_item(&mut order_42()).await.unwrap();
    store.answer_next_delete_with(200).await;

    let err = repository
        .delete_item(&ItemRequest::new("order", "42"))
        .await
        .unwrap_err();
    assert!(matches!(err, ItemStoreError::DeleteRejected { status: 200 }));
}

#[tokio::test]
async fn test_delete_transport_error_is_delete_failed() {
    let (store, repository) = create_repository();
    repository.upsert_item(&mut order_42()).await.unwrap();
    store
        .fail_next_delete(StoreError::Transient("connection reset".to_string()))
        .await;

    let err = repository
        .delete_item(&ItemRequest::new("order", "42"))
        .await
        .unwrap_err();
    assert!(matches!(err, ItemStoreError::DeleteFailed(StoreError::Transient(_))));

    // Item survives a failed delete
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_delete_by_item_uses_its_key() {
    let (store, repository) = create_repository();
    let mut item = order_42();
    repository.upsert_item(&mut item).await.unwrap();

    repository.delete_item(&item).await.unwrap();
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_get_item_completes_with_result() {
    let (_store, repository) = create_repository();
    repository.upsert_item(&mut order_42()).await.unwrap();

    let handle = repository.get_item(ItemRequest::new("order", "42"));
    let found = handle.await.unwrap().unwrap();
    assert_eq!(found.map(|item| item.id), Some("order-42".to_string()));

    let missing = repository
        .get_item(ItemRequest::new("order", "43"))
        .await
        .unwrap()
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_concurrent_reads_share_client() {
    let (store, repository) = create_repository();
    repository.upsert_item(&mut order_42()).await.unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| repository.get_item(ItemRequest::new("order", "42")))
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_some());
    }
    assert_eq!(store.call_counts().reads, 8);
}

#[tokio::test]
async fn test_stored_document_carries_system_properties() {
    let (store, repository) = create_repository();
    repository.upsert_item(&mut order_42()).await.unwrap();

    let key = ItemKey::new("order-42").unwrap();
    let link = repository.document_link(&key);
    let stored = store.read_document(&link, key.as_str()).await.unwrap();
    assert!(stored.body.get("_etag").is_some());

    // System properties do not disturb the item shape
    let found = repository.fetch_by_key(&key).await.unwrap().unwrap();
    assert_eq!(found.id, "order-42");
}
