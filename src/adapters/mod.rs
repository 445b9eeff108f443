//! External system integrations for itemstore.
//!
//! - [`store`] - Document store abstraction (trait-based) and the in-memory store
//! - [`cosmosdb`] - Azure Cosmos DB implementation and client configurator
//!
//! # Design Pattern
//!
//! The repository depends only on the [`store::DocumentStore`] trait, so tests run
//! against [`store::InMemoryStore`] and production runs against
//! [`cosmosdb::CosmosDbStore`].
//!
//! ```rust,no_run
//! use itemstore::adapters::cosmosdb::ClientConfigurator;
//! use itemstore::config::{secret_string, CosmosDbConfig, ConnectionMode, ConsistencyLevel};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CosmosDbConfig {
//!     endpoint: "https://account.documents.azure.com:443/".to_string(),
//!     key: secret_string("key".to_string()),
//!     database_name: "testdb".to_string(),
//!     collection_name: "orders".to_string(),
//!     consistency_level: ConsistencyLevel::BoundedStaleness,
//!     connection_mode: ConnectionMode::Gateway,
//!     max_pool_size: 10,
//!     idle_connection_timeout_ms: 6000,
//!     media_request_timeout_ms: 5000,
//!     preferred_locations: vec!["Central US".to_string()],
//! };
//!
//! let configurator = ClientConfigurator::new(config);
//! configurator.initialize().await?;
//! # Ok(())
//! # }
//! ```

pub mod cosmosdb;
pub mod store;
