//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for itemstore using clap.

pub mod commands;

use crate::config::{load_config, LoggingConfig};
use clap::{Parser, Subcommand};

/// Itemstore - Azure Cosmos DB item repository
#[derive(Parser, Debug)]
#[command(name = "itemstore")]
#[command(version, about, long_about = None)]
#[command(author = "Itemstore Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "itemstore.toml", env = "ITEMSTORE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ITEMSTORE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level and logging settings for this run
    ///
    /// Taken from the configuration file, with `--log-level` overriding
    /// `[application].log_level`. When the file cannot be loaded, logging falls
    /// back to console output at `info` so the command can report the problem.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        match load_config(&self.config) {
            Ok(config) => {
                let level = self
                    .log_level
                    .clone()
                    .unwrap_or(config.application.log_level);
                (level, config.logging)
            }
            Err(_) => {
                let level = self.log_level.clone().unwrap_or_else(|| "info".to_string());
                (level, LoggingConfig::default())
            }
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one item by key and print it as JSON
    Get(commands::get::GetArgs),

    /// Insert or replace an item read from a JSON file
    Upsert(commands::upsert::UpsertArgs),

    /// Delete one item by key
    Delete(commands::delete::DeleteArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}
