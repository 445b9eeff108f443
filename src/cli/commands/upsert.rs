//! Upsert command implementation

use super::{exit_code, open_repository, EXIT_CONFIG, EXIT_SUCCESS};
use crate::domain::Item;
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the upsert command
#[derive(Args, Debug)]
pub struct UpsertArgs {
    /// JSON file holding the item
    pub file: PathBuf,
}

impl UpsertArgs {
    /// Execute the upsert command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut item = match read_item(&self.file) {
            Ok(item) => item,
            Err(e) => {
                println!("❌ Failed to read item from {}", self.file.display());
                println!("   Error: {e:#}");
                return Ok(EXIT_CONFIG);
            }
        };

        let repository = match open_repository(config_path).await {
            Ok(r) => r,
            Err(code) => return Ok(code),
        };

        match repository.upsert_item(&mut item).await {
            Ok(()) => {
                println!("✅ Upserted item {}", item.id);
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to upsert item");
                println!("   Error: {e}");
                Ok(exit_code(&e))
            }
        }
    }
}

fn read_item(path: &Path) -> anyhow::Result<Item> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&content).context("file is not a valid item document")
}
