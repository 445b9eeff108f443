//! Item documents and lookup requests
//!
//! An [`Item`] is an opaque JSON document with an `id` and two optional key fields.
//! An [`ItemRequest`] carries the same two key fields and derives the lookup key.
//! Both derive keys the same way, so an item written with key fields is found by the
//! matching request.

use super::errors::ItemStoreError;
use super::ids::ItemKey;
use super::result::Result;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt;

/// Separator between the type and number parts of a derived key
const KEY_SEPARATOR: char = '-';

/// Prefix of properties the document store manages (`_rid`, `_self`, `_etag`, ...)
const SYSTEM_PROPERTY_PREFIX: char = '_';

/// Anything that can name a single item
pub trait KeyedRequest: fmt::Debug + Send + Sync {
    /// Derives the item key, or `None` when the request does not determine one
    fn generate_key(&self) -> Option<ItemKey>;
}

/// Joins trimmed, non-blank parts as `{item_type}-{item_number}`
fn key_candidate(item_type: Option<&str>, item_number: Option<&str>) -> Option<String> {
    let item_type = item_type.map(str::trim).filter(|s| !s.is_empty())?;
    let item_number = item_number.map(str::trim).filter(|s| !s.is_empty())?;
    Some(format!("{item_type}{KEY_SEPARATOR}{item_number}"))
}

/// Derives the key from both parts, `None` when a part is missing or the key is invalid
fn derive_key(item_type: Option<&str>, item_number: Option<&str>) -> Option<ItemKey> {
    key_candidate(item_type, item_number).and_then(|key| ItemKey::new(key).ok())
}

/// Reads a key field from any JSON scalar; numbers and booleans become their text
fn scalar_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "key field must be a string, number or boolean, found {other}"
        ))),
    }
}

/// Lookup descriptor for a single item
///
/// # Examples
///
/// ```
/// use itemstore::domain::{ItemRequest, KeyedRequest};
///
/// let request = ItemRequest::new("order", "42");
/// assert_eq!(request.generate_key().unwrap().as_str(), "order-42");
///
/// let incomplete = ItemRequest::default();
/// assert!(incomplete.generate_key().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    /// Item category, first half of the key
    pub item_type: Option<String>,

    /// Item number within the category, second half of the key
    pub item_number: Option<String>,
}

impl ItemRequest {
    /// Creates a request with both key parts set
    pub fn new(item_type: impl Into<String>, item_number: impl Into<String>) -> Self {
        Self {
            item_type: Some(item_type.into()),
            item_number: Some(item_number.into()),
        }
    }
}

impl KeyedRequest for ItemRequest {
    fn generate_key(&self) -> Option<ItemKey> {
        derive_key(self.item_type.as_deref(), self.item_number.as_deref())
    }
}

impl<T: KeyedRequest + ?Sized> KeyedRequest for Box<T> {
    fn generate_key(&self) -> Option<ItemKey> {
        (**self).generate_key()
    }
}

impl KeyedRequest for ItemKey {
    fn generate_key(&self) -> Option<ItemKey> {
        Some(self.clone())
    }
}

/// Application document stored in the collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Document id, assigned by [`Item::assign_id`] before every write
    #[serde(default)]
    pub id: String,

    /// Item category
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub item_type: Option<String>,

    /// Item number within the category
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub item_number: Option<String>,

    /// Remaining document properties
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Item {
    /// Creates an item with both key fields set and no attributes
    pub fn new(item_type: impl Into<String>, item_number: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            item_type: Some(item_type.into()),
            item_number: Some(item_number.into()),
            attributes: Map::new(),
        }
    }

    /// Adds an attribute, replacing any previous value
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the attribute with the given name
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Assigns the document id and returns it as a key
    ///
    /// The id is the derived key when both key fields are present, the existing id
    /// when one was supplied, and otherwise a SHA-256 digest of the item content.
    /// Calling this again on unchanged content yields the same id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the key fields form an invalid key, or if a
    /// supplied id is not a valid key.
    pub fn assign_id(&mut self) -> Result<ItemKey> {
        let key = match key_candidate(self.item_type.as_deref(), self.item_number.as_deref()) {
            Some(candidate) => ItemKey::new(candidate).map_err(ItemStoreError::Validation)?,
            None if !self.id.trim().is_empty() => {
                ItemKey::new(self.id.as_str()).map_err(ItemStoreError::Validation)?
            }
            None => ItemKey::new(self.content_digest()?).map_err(ItemStoreError::Validation)?,
        };
        self.id = key.as_str().to_string();
        Ok(key)
    }

    /// Hex SHA-256 over the canonical JSON of everything except `id` and store
    /// system properties
    fn content_digest(&self) -> Result<String> {
        let mut content = Map::new();
        if let Some(item_type) = &self.item_type {
            content.insert("item_type".to_string(), Value::from(item_type.as_str()));
        }
        if let Some(item_number) = &self.item_number {
            content.insert("item_number".to_string(), Value::from(item_number.as_str()));
        }
        for (name, value) in &self.attributes {
            if !name.starts_with(SYSTEM_PROPERTY_PREFIX) {
                content.insert(name.clone(), value.clone());
            }
        }

        let bytes = serde_json::to_vec(&canonicalize(&Value::Object(content)))?;
        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }
}

impl KeyedRequest for Item {
    fn generate_key(&self) -> Option<ItemKey> {
        derive_key(self.item_type.as_deref(), self.item_number.as_deref())
            .or_else(|| ItemKey::new(self.id.as_str()).ok())
    }
}

/// Rebuilds objects with keys in sorted order, independent of map ordering features
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut names: Vec<&String> = map.keys().collect();
            names.sort();
            let mut sorted = Map::new();
            for name in names {
                sorted.insert(name.clone(), canonicalize(&map[name.as_str()]));
            }
            Value::Object(sorted)
        }
        Value::Array(values) => Value::Array(values.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
