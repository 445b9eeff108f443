//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ItemStoreConfig;
use super::secret::secret_string;
use crate::domain::errors::ItemStoreError;
use crate::domain::result::Result;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// Prefix of environment variables that override file settings
pub const ENV_PREFIX: &str = "ITEMSTORE";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ItemStoreConfig
/// 4. Applies environment variable overrides (ITEMSTORE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced environment variable
/// is unset, the TOML does not parse, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use itemstore::config::loader::load_config;
///
/// let config = load_config("itemstore.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ItemStoreConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ItemStoreError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ItemStoreError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ItemStoreConfig = toml::from_str(&contents)
        .map_err(|e| ItemStoreError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ItemStoreError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_pattern();
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ItemStoreError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_override(name: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Override parsed with `FromStr`; unparseable values are logged and ignored
fn parsed_override<T: FromStr>(name: &str) -> Option<T> {
    let raw = env_override(name)?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        tracing::warn!(variable = %format!("{ENV_PREFIX}_{name}"), value = %raw, "Ignoring unparseable override");
    }
    parsed
}

/// Override for a serde enum, spelled as in the TOML file
fn enum_override<T: DeserializeOwned>(name: &str) -> Option<T> {
    let raw = env_override(name)?;
    let parsed = serde_json::from_value(Value::String(raw.trim().to_string())).ok();
    if parsed.is_none() {
        tracing::warn!(variable = %format!("{ENV_PREFIX}_{name}"), value = %raw, "Ignoring unparseable override");
    }
    parsed
}

/// Applies environment variable overrides using ITEMSTORE_* prefix
///
/// Variables follow the pattern `ITEMSTORE_<SECTION>_<KEY>`, for example
/// `ITEMSTORE_COSMOSDB_ENDPOINT`. Every key of the file can be overridden.
/// Values that do not parse as the key's type are ignored.
fn apply_env_overrides(config: &mut ItemStoreConfig) {
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    let cosmos = &mut config.cosmosdb;
    if let Some(val) = env_override("COSMOSDB_ENDPOINT") {
        cosmos.endpoint = val;
    }
    if let Some(val) = env_override("COSMOSDB_KEY") {
        cosmos.key = secret_string(val);
    }
    if let Some(val) = env_override("COSMOSDB_DATABASE_NAME") {
        cosmos.database_name = val;
    }
    if let Some(val) = env_override("COSMOSDB_COLLECTION_NAME") {
        cosmos.collection_name = val;
    }
    if let Some(level) = enum_override("COSMOSDB_CONSISTENCY_LEVEL") {
        cosmos.consistency_level = level;
    }
    if let Some(mode) = enum_override("COSMOSDB_CONNECTION_MODE") {
        cosmos.connection_mode = mode;
    }
    if let Some(size) = parsed_override("COSMOSDB_MAX_POOL_SIZE") {
        cosmos.max_pool_size = size;
    }
    if let Some(ms) = parsed_override("COSMOSDB_IDLE_CONNECTION_TIMEOUT_MS") {
        cosmos.idle_connection_timeout_ms = ms;
    }
    if let Some(ms) = parsed_override("COSMOSDB_MEDIA_REQUEST_TIMEOUT_MS") {
        cosmos.media_request_timeout_ms = ms;
    }
    if let Some(val) = env_override("COSMOSDB_PREFERRED_LOCATIONS") {
        cosmos.preferred_locations = val
            .split(',')
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
    }

    let logging = &mut config.logging;
    if let Some(enabled) = parsed_override("LOGGING_LOCAL_ENABLED") {
        logging.local_enabled = enabled;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        logging.local_path = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_ROTATION") {
        logging.local_rotation = val;
    }
    if let Some(suppress) = parsed_override("LOGGING_SUPPRESS_SDK_LOGS") {
        logging.suppress_sdk_logs = suppress;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("ITEMSTORE_LOADER_TEST_VAR", "test_value");
        let input = "key = \"${ITEMSTORE_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "key = \"test_value\"\n");
        std::env::remove_var("ITEMSTORE_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("ITEMSTORE_LOADER_MISSING_VAR");
        let input = "key = \"${ITEMSTORE_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("ITEMSTORE_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("ITEMSTORE_LOADER_COMMENTED_VAR");
        let input = "# key = \"${ITEMSTORE_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(ItemStoreError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[cosmosdb]
endpoint = "https://test.documents.azure.com:443/"
key = "test-key"
database_name = "testdb"
collection_name = "orders"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.cosmosdb.database_name, "testdb");
        assert_eq!(config.cosmosdb.collection_name, "orders");
        assert_eq!(config.cosmosdb.max_pool_size, 10);
    }
}
