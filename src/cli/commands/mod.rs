//! CLI command implementations
//!
//! Commands return process exit codes: 0 success, 2 configuration error,
//! 3 not found, 4 connection error, 5 fatal.

pub mod delete;
pub mod get;
pub mod upsert;
pub mod validate;

use crate::adapters::cosmosdb::ClientConfigurator;
use crate::config::load_config;
use crate::core::ItemRepository;
use crate::domain::ids::ItemKey;
use crate::domain::{ItemRequest, ItemStoreError, KeyedRequest, StoreError};
use clap::Args;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_NOT_FOUND: i32 = 3;
pub const EXIT_CONNECTION: i32 = 4;
pub const EXIT_FATAL: i32 = 5;

/// Item key given either whole or as its two parts
#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// Full item key, e.g. `order-42`
    #[arg(long, conflicts_with_all = ["item_type", "item_number"])]
    pub id: Option<String>,

    /// Item type, first half of the key
    #[arg(long = "type")]
    pub item_type: Option<String>,

    /// Item number, second half of the key
    #[arg(long = "number")]
    pub item_number: Option<String>,
}

impl KeyArgs {
    /// The request these arguments describe
    pub fn to_request(&self) -> Box<dyn KeyedRequest> {
        match &self.id {
            // An invalid id becomes an empty request so the repository reports it
            Some(id) => match ItemKey::new(id.as_str()) {
                Ok(key) => Box::new(key),
                Err(_) => Box::new(ItemRequest::default()),
            },
            None => Box::new(ItemRequest {
                item_type: self.item_type.clone(),
                item_number: self.item_number.clone(),
            }),
        }
    }
}

/// Load configuration, initialize the client and build a repository
///
/// On failure, prints the cause and returns the exit code to use.
pub(crate) async fn open_repository(config_path: &str) -> Result<ItemRepository, i32> {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            println!("❌ Failed to load configuration file");
            println!("   Error: {e}");
            return Err(EXIT_CONFIG);
        }
    };

    let configurator = ClientConfigurator::new(config.cosmosdb);
    if let Err(e) = configurator.initialize().await {
        println!("❌ Failed to connect to Cosmos DB");
        println!("   Error: {e}");
        return Err(EXIT_CONNECTION);
    }

    ItemRepository::from_configurator(&configurator).map_err(|e| {
        println!("❌ Failed to create repository");
        println!("   Error: {e}");
        EXIT_FATAL
    })
}

/// Exit code for an operation error
pub(crate) fn exit_code(error: &ItemStoreError) -> i32 {
    match error {
        ItemStoreError::Configuration(_) | ItemStoreError::Validation(_) => EXIT_CONFIG,
        ItemStoreError::NotFound(_) => EXIT_NOT_FOUND,
        ItemStoreError::Store(e) | ItemStoreError::DeleteFailed(e) => match e {
            StoreError::NotFound(_) => EXIT_NOT_FOUND,
            StoreError::Transient(_) => EXIT_CONNECTION,
            StoreError::Fatal(_) => EXIT_FATAL,
        },
        _ => EXIT_FATAL,
    }
}
