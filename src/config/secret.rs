//! In-memory protection for the store access key
//!
//! The key is wrapped in a `secrecy::Secret`, which zeroes the memory on drop,
//! redacts `Debug` output and requires an explicit `expose_secret()` call.
//!
//! # Example
//!
//! ```rust
//! use itemstore::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let key = secret_string("primary-key".to_string());
//! assert_eq!(key.expose_secret(), "primary-key");
//! assert!(!format!("{key:?}").contains("primary-key"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String payload that satisfies the trait bounds `Secret` needs
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of the secret for handing to an SDK credential type
    pub fn to_plain(&self) -> String {
        self.0.clone()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string used for credentials in configuration
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string as a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("test-key".to_string());
        assert_eq!(secret.expose_secret(), "test-key");
        assert_eq!(secret.expose_secret().to_plain(), "test-key");
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-data".to_string());
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("sensitive-data"));
    }

    #[test]
    fn test_secret_deserializes_from_plain_string() {
        #[derive(Deserialize)]
        struct KeyHolder {
            key: SecretString,
        }

        let holder: KeyHolder = toml::from_str("key = \"abc\"").unwrap();
        assert_eq!(holder.key.expose_secret(), "abc");
        assert!(!holder.key.expose_secret().is_empty());
    }
}
