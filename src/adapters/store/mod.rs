//! Document store abstraction and the in-memory implementation

pub mod memory;
pub mod traits;

pub use memory::{CallCounts, InMemoryStore};
pub use traits::{DocumentStore, StoredDocument, STATUS_NOT_FOUND, STATUS_NO_CONTENT};
