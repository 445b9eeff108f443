//! Domain error types
//!
//! This module defines the error hierarchy for itemstore. Storage bindings report
//! failures as [`StoreError`], a typed classification that the repository matches
//! structurally. Everything surfaced to callers is an [`ItemStoreError`].

use thiserror::Error;

/// Main itemstore error type
///
/// This is the primary error type used throughout the crate.
#[derive(Debug, Error)]
pub enum ItemStoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The shared client was requested before it was initialized
    #[error("Client not initialized: {0}")]
    NotInitialized(String),

    /// Target document does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other failure reported by the document store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Transport or server failure while deleting a document
    #[error("Error deleting document: {0}")]
    DeleteFailed(#[source] StoreError),

    /// The store answered the delete with an unexpected status
    #[error("Error deleting document: unexpected status {status}")]
    DeleteRejected { status: u16 },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl ItemStoreError {
    /// Returns true if the error means the target document is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, ItemStoreError::NotFound(_))
    }
}

/// Document store errors
///
/// Typed outcome of a failed storage call. Bindings classify the vendor error once,
/// from its status, and never expose third-party error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The addressed document does not exist
    #[error("Entity does not exist: {0}")]
    NotFound(String),

    /// Throttling, timeouts and other conditions that may clear on their own
    #[error("Transient failure: {0}")]
    Transient(String),

    /// Authentication, malformed requests and all other failures
    #[error("Request failed: {0}")]
    Fatal(String),
}

impl StoreError {
    /// Returns true for [`StoreError::NotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// Returns true for [`StoreError::Transient`]
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }
}

impl From<std::io::Error> for ItemStoreError {
    fn from(err: std::io::Error) -> Self {
        ItemStoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ItemStoreError {
    fn from(err: serde_json::Error) -> Self {
        ItemStoreError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ItemStoreError {
    fn from(err: toml::de::Error) -> Self {
        ItemStoreError::Configuration(format!("TOML parse error: {err}"))
    }
}
