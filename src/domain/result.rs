//! Result type alias for itemstore

use super::errors::ItemStoreError;

/// Result type alias for itemstore operations
///
/// # Examples
///
/// ```
/// use itemstore::domain::result::Result;
/// use itemstore::domain::errors::ItemStoreError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ItemStoreError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ItemStoreError>;

/// Result type returned by document store bindings
pub type StoreResult<T> = std::result::Result<T, super::errors::StoreError>;
