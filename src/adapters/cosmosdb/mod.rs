//! Azure Cosmos DB integration
//!
//! This module builds the Cosmos DB client from configuration and binds it to
//! the [`DocumentStore`](crate::adapters::store::DocumentStore) trait.

pub mod client;
pub mod configurator;
pub mod policy;

pub use client::CosmosDbStore;
pub use configurator::ClientConfigurator;
pub use policy::ConnectionPolicy;
