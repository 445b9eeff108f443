//! Configuration management for itemstore.
//!
//! Configuration is read once at startup from a TOML file and is immutable
//! afterwards.
//!
//! # Overview
//!
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment overrides (`ITEMSTORE_<SECTION>_<KEY>`)
//! - Default values for the connection policy
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [cosmosdb]
//! endpoint = "https://your-account.documents.azure.com:443/"
//! key = "${ITEMSTORE_COSMOS_KEY}"
//! database_name = "testdb"
//! collection_name = "orders"
//! consistency_level = "bounded_staleness"
//! connection_mode = "gateway"
//! max_pool_size = 10
//! idle_connection_timeout_ms = 6000
//! media_request_timeout_ms = 5000
//! preferred_locations = ["Central US"]
//!
//! [logging]
//! local_enabled = false
//! ```
//!
//! ```rust,no_run
//! use itemstore::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("itemstore.toml")?;
//! println!("Collection: {}", config.cosmosdb.collection_name);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ConnectionMode, ConsistencyLevel, CosmosDbConfig, ItemStoreConfig,
    LoggingConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
