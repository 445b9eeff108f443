//! Core repository logic for itemstore.
//!
//! - [`repository`] - Item repository: fetch-by-key, upsert, delete
//!
//! # Example
//!
//! ```rust,no_run
//! use itemstore::adapters::cosmosdb::ClientConfigurator;
//! use itemstore::config::load_config;
//! use itemstore::core::ItemRepository;
//! use itemstore::domain::ItemRequest;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("itemstore.toml")?;
//! let configurator = ClientConfigurator::new(config.cosmosdb);
//! configurator.initialize().await?;
//!
//! let repository = Arc::new(ItemRepository::from_configurator(&configurator)?);
//! let item = repository.get_item(ItemRequest::new("order", "42")).await??;
//! println!("{item:?}");
//! # Ok(())
//! # }
//! ```

pub mod repository;

pub use repository::ItemRepository;
