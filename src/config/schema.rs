//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML file.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Read consistency requested from the document store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyLevel {
    /// Linearizable reads
    Strong,
    /// Reads lag writes by at most a configured window
    #[default]
    BoundedStaleness,
    /// Read-your-writes within a session
    Session,
    /// Reads never observe out-of-order writes
    ConsistentPrefix,
    /// No ordering guarantee
    Eventual,
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConsistencyLevel::Strong => "Strong",
            ConsistencyLevel::BoundedStaleness => "BoundedStaleness",
            ConsistencyLevel::Session => "Session",
            ConsistencyLevel::ConsistentPrefix => "ConsistentPrefix",
            ConsistencyLevel::Eventual => "Eventual",
        };
        f.write_str(name)
    }
}

/// How the client reaches the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionMode {
    /// All requests go through the account gateway
    #[default]
    Gateway,
    /// Requests go straight to the backend replicas
    Direct,
}

impl fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionMode::Gateway => f.write_str("Gateway"),
            ConnectionMode::Direct => f.write_str("Direct"),
        }
    }
}

/// Main itemstore configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemStoreConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Azure Cosmos DB configuration
    pub cosmosdb: CosmosDbConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ItemStoreConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.cosmosdb.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Azure Cosmos DB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosmosDbConfig {
    /// Cosmos DB endpoint URL
    pub endpoint: String,

    /// Cosmos DB access key
    /// Stored securely in memory and automatically zeroized on drop
    pub key: SecretString,

    /// Database name
    pub database_name: String,

    /// Collection (container) name
    pub collection_name: String,

    /// Read consistency level
    #[serde(default)]
    pub consistency_level: ConsistencyLevel,

    /// Gateway or direct connectivity
    #[serde(default)]
    pub connection_mode: ConnectionMode,

    /// Maximum number of concurrent requests
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: usize,

    /// Idle connection timeout in milliseconds
    #[serde(default = "default_idle_connection_timeout_ms")]
    pub idle_connection_timeout_ms: u64,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_media_request_timeout_ms")]
    pub media_request_timeout_ms: u64,

    /// Regions to prefer, in order
    #[serde(default = "default_preferred_locations")]
    pub preferred_locations: Vec<String>,
}

impl CosmosDbConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.endpoint.is_empty() {
            return Err("cosmosdb.endpoint cannot be empty".to_string());
        }

        if !self.endpoint.starts_with("https://") {
            return Err("cosmosdb.endpoint must start with https://".to_string());
        }

        let endpoint = url::Url::parse(&self.endpoint)
            .map_err(|e| format!("cosmosdb.endpoint is not a valid URL: {e}"))?;
        if endpoint.host_str().is_none() {
            return Err("cosmosdb.endpoint must include a host".to_string());
        }

        if self.key.expose_secret().is_empty() {
            return Err("cosmosdb.key cannot be empty".to_string());
        }

        validate_resource_name("cosmosdb.database_name", &self.database_name)?;
        validate_resource_name("cosmosdb.collection_name", &self.collection_name)?;

        if self.max_pool_size == 0 || self.max_pool_size > 1000 {
            return Err(format!(
                "cosmosdb.max_pool_size must be between 1 and 1000, got {}",
                self.max_pool_size
            ));
        }

        if self.idle_connection_timeout_ms == 0 {
            return Err("cosmosdb.idle_connection_timeout_ms must be > 0".to_string());
        }

        if self.media_request_timeout_ms == 0 {
            return Err("cosmosdb.media_request_timeout_ms must be > 0".to_string());
        }

        if self.preferred_locations.iter().any(|l| l.trim().is_empty()) {
            return Err("cosmosdb.preferred_locations cannot contain empty entries".to_string());
        }

        Ok(())
    }

    /// Idle connection timeout as a duration
    pub fn idle_connection_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_connection_timeout_ms)
    }

    /// Per-request timeout as a duration
    pub fn media_request_timeout(&self) -> Duration {
        Duration::from_millis(self.media_request_timeout_ms)
    }
}

fn validate_resource_name(field: &str, name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    if name.contains(['/', '\\', '?', '#']) {
        return Err(format!(
            "{field} '{name}' cannot contain '/', '\\', '?' or '#'"
        ));
    }
    Ok(())
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Silence the Azure SDK transport loggers
    #[serde(default = "default_true")]
    pub suppress_sdk_logs: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            suppress_sdk_logs: true,
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_pool_size() -> usize {
    10
}

fn default_idle_connection_timeout_ms() -> u64 {
    6000
}

fn default_media_request_timeout_ms() -> u64 {
    5000
}

fn default_preferred_locations() -> Vec<String> {
    vec!["Central US".to_string()]
}

fn default_local_path() -> String {
    "/var/log/itemstore".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
