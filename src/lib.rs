// Itemstore - Azure Cosmos DB Item Repository
// Copyright (c) 2025 Itemstore Contributors
// Licensed under the MIT License

//! # Itemstore - Azure Cosmos DB Item Repository
//!
//! A thin persistence layer over one Azure Cosmos DB collection: read an item by
//! key, upsert an item, delete an item.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - The item repository
//! - [`adapters`] - Document store abstraction, Cosmos DB binding and client configurator
//! - [`domain`] - Items, keys, document addresses and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use itemstore::adapters::cosmosdb::ClientConfigurator;
//! use itemstore::config::load_config;
//! use itemstore::core::ItemRepository;
//! use itemstore::domain::{Item, ItemRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("itemstore.toml")?;
//!
//!     let configurator = ClientConfigurator::new(config.cosmosdb);
//!     configurator.initialize().await?;
//!     let repository = ItemRepository::from_configurator(&configurator)?;
//!
//!     let mut item = Item::new("order", "42").with_attribute("qty", 3);
//!     repository.upsert_item(&mut item).await?;
//!
//!     let found = repository.fetch_by_key(&ItemRequest::new("order", "42")).await?;
//!     println!("{found:?}");
//!
//!     repository.delete_item(&ItemRequest::new("order", "42")).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Operations return [`domain::Result`], an alias over [`domain::ItemStoreError`].
//! A read of a missing item is `Ok(None)`; every other failure is surfaced.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
