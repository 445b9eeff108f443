//! Item keys and document addresses
//!
//! This module provides the newtype for item keys and the two resource links the
//! repository works with: the collection path and the per-document link.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Characters the document store rejects in resource ids
const FORBIDDEN_ID_CHARS: [char; 4] = ['/', '\\', '?', '#'];

/// Item key newtype wrapper
///
/// The key doubles as the document id and the partition key value.
///
/// # Examples
///
/// ```
/// use itemstore::domain::ids::ItemKey;
///
/// let key = ItemKey::new("order-42").unwrap();
/// assert_eq!(key.as_str(), "order-42");
/// assert!(ItemKey::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey(String);

impl ItemKey {
    /// Creates a new ItemKey from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(ItemKey)` if the key is non-blank and free of characters the
    /// store rejects in ids, `Err` otherwise
    pub fn new(key: impl Into<String>) -> Result<Self, String> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err("Item key cannot be empty".to_string());
        }
        if let Some(c) = key.chars().find(|c| FORBIDDEN_ID_CHARS.contains(c)) {
            return Err(format!("Item key '{key}' contains forbidden character '{c}'"));
        }
        Ok(Self(key))
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ItemKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Address of a collection: `/dbs/{database}/colls/{collection}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    database: String,
    collection: String,
}

impl CollectionPath {
    /// Creates a collection path from database and collection names
    pub fn new(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collection: collection.into(),
        }
    }

    /// Database name
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Collection name
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Link of the document with the given id inside this collection
    pub fn document_link(&self, id: &ItemKey) -> DocumentLink {
        DocumentLink {
            collection: self.clone(),
            id: id.clone(),
        }
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/dbs/{}/colls/{}", self.database, self.collection)
    }
}

/// Address of a single document: `/dbs/{database}/colls/{collection}/docs/{id}`
///
/// # Examples
///
/// ```
/// use itemstore::domain::ids::{CollectionPath, ItemKey};
///
/// let path = CollectionPath::new("testdb", "orders");
/// let link = path.document_link(&ItemKey::new("order-42").unwrap());
/// assert_eq!(link.to_string(), "/dbs/testdb/colls/orders/docs/order-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentLink {
    collection: CollectionPath,
    id: ItemKey,
}

impl DocumentLink {
    /// The collection that holds the document
    pub fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    /// Document id
    pub fn id(&self) -> &ItemKey {
        &self.id
    }
}

impl fmt::Display for DocumentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/docs/{}", self.collection, self.id)
    }
}
