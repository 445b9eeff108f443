//! Connection policy for the Cosmos DB client

use crate::config::{ConnectionMode, ConsistencyLevel, CosmosDbConfig};
use std::time::Duration;

/// Settings the client is built with
///
/// Built once from configuration and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionPolicy {
    pub connection_mode: ConnectionMode,
    pub consistency_level: ConsistencyLevel,
    /// Upper bound on concurrently in-flight requests
    pub max_pool_size: usize,
    pub idle_connection_timeout: Duration,
    /// Upper bound on a single request, enforced per call
    pub media_request_timeout: Duration,
    pub preferred_locations: Vec<String>,
}

impl ConnectionPolicy {
    /// Build the policy from validated configuration
    pub fn from_config(config: &CosmosDbConfig) -> Self {
        Self {
            connection_mode: config.connection_mode,
            consistency_level: config.consistency_level,
            max_pool_size: config.max_pool_size,
            idle_connection_timeout: config.idle_connection_timeout(),
            media_request_timeout: config.media_request_timeout(),
            preferred_locations: config.preferred_locations.clone(),
        }
    }
}

impl Default for ConnectionPolicy {
    fn default() -> Self {
        Self {
            connection_mode: ConnectionMode::Gateway,
            consistency_level: ConsistencyLevel::BoundedStaleness,
            max_pool_size: 10,
            idle_connection_timeout: Duration::from_millis(6000),
            media_request_timeout: Duration::from_millis(5000),
            preferred_locations: vec!["Central US".to_string()],
        }
    }
}
