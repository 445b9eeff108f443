//! Cosmos DB document store
//!
//! This module binds the [`DocumentStore`] trait to Azure Cosmos DB through
//! `azure_data_cosmos`. SDK errors are classified once, by HTTP status, into
//! [`StoreError`] variants.

use super::policy::ConnectionPolicy;
use crate::adapters::store::traits::{
    document_id, DocumentStore, StoredDocument, STATUS_NO_CONTENT,
};
use crate::config::SecretString;
use crate::domain::ids::{CollectionPath, DocumentLink};
use crate::domain::{ItemStoreError, Result, StoreError, StoreResult};
use async_trait::async_trait;
use azure_core::credentials::Secret;
use azure_core::error::ErrorKind;
use azure_core::http::StatusCode;
use azure_data_cosmos::clients::ContainerClient;
use azure_data_cosmos::{CosmosClient, CosmosClientOptions, PartitionKey};
use serde_json::Value;
use std::future::Future;
use tokio::sync::Semaphore;

/// Cosmos DB implementation of [`DocumentStore`]
///
/// Every call holds one of `max_pool_size` permits and is bounded by the
/// policy's media-request timeout.
pub struct CosmosDbStore {
    /// Cosmos DB client
    client: CosmosClient,

    /// Service endpoint
    endpoint: String,

    /// Policy the client was built with
    policy: ConnectionPolicy,

    /// In-flight request limit
    permits: Semaphore,
}

impl CosmosDbStore {
    /// Create a store bound to `endpoint` with key authentication
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the SDK rejects the endpoint or key.
    pub fn connect(endpoint: &str, key: &SecretString, policy: ConnectionPolicy) -> Result<Self> {
        use secrecy::ExposeSecret;

        let key = Secret::new(key.expose_secret().to_plain());
        let options = Some(CosmosClientOptions::default());

        let client = CosmosClient::with_key(endpoint, key, options).map_err(|e| {
            ItemStoreError::Configuration(format!("Failed to create Cosmos client: {e}"))
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            permits: Semaphore::new(policy.max_pool_size),
            policy,
        })
    }

    /// Policy this store was built with
    pub fn policy(&self) -> &ConnectionPolicy {
        &self.policy
    }

    fn container(&self, collection: &CollectionPath) -> ContainerClient {
        self.client
            .database_client(collection.database())
            .container_client(collection.collection())
    }

    /// Runs one SDK call under the pool limit and request timeout
    async fn call<T, F>(&self, operation: &str, target: &str, request: F) -> StoreResult<T>
    where
        F: Future<Output = azure_core::Result<T>>,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| StoreError::Fatal("connection pool closed".to_string()))?;

        match tokio::time::timeout(self.policy.media_request_timeout, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(classify(&e, operation, target)),
            Err(_) => Err(StoreError::Transient(format!(
                "{operation} {target} timed out after {}ms",
                self.policy.media_request_timeout.as_millis()
            ))),
        }
    }
}

/// Maps an SDK error onto the store error taxonomy
fn classify(error: &azure_core::Error, operation: &str, target: &str) -> StoreError {
    let message = format!("{operation} {target}: {error}");
    match error.http_status() {
        Some(StatusCode::NotFound) => StoreError::NotFound(message),
        Some(
            StatusCode::TooManyRequests
            | StatusCode::RequestTimeout
            | StatusCode::ServiceUnavailable,
        ) => StoreError::Transient(message),
        Some(_) => StoreError::Fatal(message),
        None if matches!(error.kind(), ErrorKind::Io) => StoreError::Transient(message),
        None => StoreError::Fatal(message),
    }
}

#[async_trait]
impl DocumentStore for CosmosDbStore {
    async fn read_document(
        &self,
        link: &DocumentLink,
        partition_key: &str,
    ) -> StoreResult<StoredDocument> {
        let container = self.container(link.collection());
        let target = link.to_string();

        tracing::debug!(link = %target, partition_key = %partition_key, "Reading document");

        let response = self
            .call(
                "read",
                &target,
                container.read_item::<Value>(
                    PartitionKey::from(partition_key.to_string()),
                    link.id().as_str(),
                    None,
                ),
            )
            .await?;

        let body = response.into_body().map_err(|e| {
            StoreError::Fatal(format!("Failed to deserialize document {target}: {e}"))
        })?;

        // The stored id is canonical; it may differ in form from the requested one.
        let link = match document_id(&body) {
            Ok(id) => link.collection().document_link(&id),
            Err(_) => link.clone(),
        };

        Ok(StoredDocument { link, body })
    }

    async fn upsert_document(
        &self,
        collection: &CollectionPath,
        partition_key: &str,
        document: Value,
    ) -> StoreResult<StoredDocument> {
        let link = collection.document_link(&document_id(&document)?);
        let container = self.container(collection);
        let target = link.to_string();

        self.call(
            "upsert",
            &target,
            container.upsert_item(
                PartitionKey::from(partition_key.to_string()),
                &document,
                None,
            ),
        )
        .await?;

        Ok(StoredDocument {
            link,
            body: document,
        })
    }

    async fn delete_document(&self, link: &DocumentLink, partition_key: &str) -> StoreResult<u16> {
        let container = self.container(link.collection());
        let target = link.to_string();

        // The SDK surfaces every non-success status as an error, so a completed
        // call is the store's 204.
        self.call(
            "delete",
            &target,
            container.delete_item(
                PartitionKey::from(partition_key.to_string()),
                link.id().as_str(),
                None,
            ),
        )
        .await?;

        Ok(STATUS_NO_CONTENT)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
