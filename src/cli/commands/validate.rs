//! Validate config command implementation
//!
//! This module implements the `validate-config` command. Loading already runs
//! validation, so a successful load means the file is valid.

use super::{EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        let cosmos = &config.cosmosdb;
        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Cosmos DB Endpoint: {}", cosmos.endpoint);
        println!("  Cosmos DB Database: {}", cosmos.database_name);
        println!("  Cosmos DB Collection: {}", cosmos.collection_name);
        println!("  Consistency Level: {}", cosmos.consistency_level);
        println!("  Connection Mode: {}", cosmos.connection_mode);
        println!("  Max Pool Size: {}", cosmos.max_pool_size);
        println!("  Request Timeout: {} ms", cosmos.media_request_timeout_ms);
        println!("  Preferred Locations: {:?}", cosmos.preferred_locations);
        println!("  Local File Logging: {}", config.logging.local_enabled);
        println!();
        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_config_is_config_error() {
        let args = ValidateArgs {};
        let code = args.execute("/nonexistent/itemstore.toml").await.unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
