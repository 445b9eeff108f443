//! Delete command implementation

use super::{exit_code, open_repository, KeyArgs, EXIT_SUCCESS};
use clap::Args;

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub key: KeyArgs,
}

impl DeleteArgs {
    /// Execute the delete command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let request = self.key.to_request();
        tracing::info!(request = ?request, "Deleting item");

        let repository = match open_repository(config_path).await {
            Ok(r) => r,
            Err(code) => return Ok(code),
        };

        match repository.delete_item(&request).await {
            Ok(()) => {
                println!("✅ Item deleted");
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to delete item");
                println!("   Error: {e}");
                Ok(exit_code(&e))
            }
        }
    }
}
