//! Domain models and types for itemstore.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Items and requests** ([`Item`], [`ItemRequest`], [`KeyedRequest`])
//! - **Strongly-typed addresses** ([`ItemKey`], [`CollectionPath`], [`DocumentLink`])
//! - **Error types** ([`ItemStoreError`], [`StoreError`])
//! - **Result type aliases** ([`Result`], [`StoreResult`])
//!
//! # Addressing
//!
//! Every document address derives from the database, the collection and the key:
//!
//! ```rust
//! use itemstore::domain::{CollectionPath, ItemRequest, KeyedRequest};
//!
//! let collection = CollectionPath::new("testdb", "orders");
//! let key = ItemRequest::new("order", "42").generate_key().unwrap();
//! assert_eq!(
//!     collection.document_link(&key).to_string(),
//!     "/dbs/testdb/colls/orders/docs/order-42"
//! );
//! ```

pub mod errors;
pub mod ids;
pub mod item;
pub mod result;

pub use errors::{ItemStoreError, StoreError};
pub use ids::{CollectionPath, DocumentLink, ItemKey};
pub use item::{Item, ItemRequest, KeyedRequest};
pub use result::{Result, StoreResult};
