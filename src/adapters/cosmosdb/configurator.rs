//! Client configurator
//!
//! Owns the one long-lived document store client. The configurator is created
//! explicitly and handed to whoever needs the client.

use super::client::CosmosDbStore;
use super::policy::ConnectionPolicy;
use crate::adapters::store::DocumentStore;
use crate::config::CosmosDbConfig;
use crate::domain::ids::CollectionPath;
use crate::domain::{ItemStoreError, Result};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Builds and holds the shared Cosmos DB client
///
/// # Example
///
/// ```rust,no_run
/// use itemstore::adapters::cosmosdb::ClientConfigurator;
/// use itemstore::config::load_config;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config("itemstore.toml")?;
/// let configurator = ClientConfigurator::new(config.cosmosdb);
/// configurator.initialize().await?;
/// let client = configurator.client()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientConfigurator {
    config: CosmosDbConfig,
    client: OnceCell<Arc<dyn DocumentStore>>,
}

impl ClientConfigurator {
    /// Create a configurator; no client is built until [`initialize`](Self::initialize)
    pub fn new(config: CosmosDbConfig) -> Self {
        tracing::debug!(endpoint = %config.endpoint, "Initialized Cosmos DB client configurator");
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// Build the shared client if it does not exist yet
    ///
    /// Calling this again after a successful initialization does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be constructed from the configured
    /// endpoint and key. There is no retry.
    pub async fn initialize(&self) -> Result<()> {
        if self.client.initialized() {
            tracing::debug!("Cosmos DB document client already initialized");
            return Ok(());
        }

        self.client
            .get_or_try_init(|| async {
                let policy = ConnectionPolicy::from_config(&self.config);

                tracing::info!(
                    endpoint = %self.config.endpoint,
                    connection_mode = %policy.connection_mode,
                    consistency_level = %policy.consistency_level,
                    max_pool_size = policy.max_pool_size,
                    idle_connection_timeout_ms = policy.idle_connection_timeout.as_millis() as u64,
                    media_request_timeout_ms = policy.media_request_timeout.as_millis() as u64,
                    preferred_locations = ?policy.preferred_locations,
                    "Building Cosmos DB document client"
                );

                let store = CosmosDbStore::connect(&self.config.endpoint, &self.config.key, policy)?;

                tracing::info!("Initialized Cosmos DB document client");
                Ok::<_, ItemStoreError>(Arc::new(store) as Arc<dyn DocumentStore>)
            })
            .await?;

        Ok(())
    }

    /// Returns true once [`initialize`](Self::initialize) has succeeded
    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }

    /// The shared client
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` if called before [`initialize`](Self::initialize).
    pub fn client(&self) -> Result<Arc<dyn DocumentStore>> {
        self.client.get().cloned().ok_or_else(|| {
            ItemStoreError::NotInitialized(
                "call initialize() before requesting the document client".to_string(),
            )
        })
    }

    /// Path of the configured collection
    pub fn collection_path(&self) -> CollectionPath {
        CollectionPath::new(&self.config.database_name, &self.config.collection_name)
    }

    /// Configuration the client is built from
    pub fn config(&self) -> &CosmosDbConfig {
        &self.config
    }
}
