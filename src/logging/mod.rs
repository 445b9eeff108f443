//! Logging and observability
//!
//! Structured logging via `tracing`: console output, optional JSON file logs with
//! rotation, and a switch that silences the Azure SDK's own log targets.
//!
//! # Example
//!
//! ```no_run
//! use itemstore::config::LoggingConfig;
//! use itemstore::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use itemstore::domain::ItemStoreError;
/// use itemstore::log_error_with_context;
///
/// let error = ItemStoreError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
