//! Get command implementation
//!
//! Fetches one item through the deferred read and prints it as JSON.

use super::{exit_code, open_repository, KeyArgs, EXIT_FATAL, EXIT_NOT_FOUND, EXIT_SUCCESS};
use clap::Args;
use std::sync::Arc;

/// Arguments for the get command
#[derive(Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub key: KeyArgs,
}

impl GetArgs {
    /// Execute the get command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let request = self.key.to_request();
        tracing::info!(request = ?request, "Fetching item");

        let repository = match open_repository(config_path).await {
            Ok(r) => Arc::new(r),
            Err(code) => return Ok(code),
        };

        let result = match repository.get_item(request).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Fetch task did not complete");
                return Ok(EXIT_FATAL);
            }
        };

        match result {
            Ok(Some(item)) => {
                println!("{}", serde_json::to_string_pretty(&item)?);
                Ok(EXIT_SUCCESS)
            }
            Ok(None) => {
                println!("❌ Item not found");
                Ok(EXIT_NOT_FOUND)
            }
            Err(e) => {
                println!("❌ Failed to fetch item");
                println!("   Error: {e}");
                Ok(exit_code(&e))
            }
        }
    }
}
