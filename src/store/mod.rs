//! Item stores - the persistence collaborator behind the status engine.
//!
//! The engine never touches storage; it is handed a snapshot and returns a
//! patch. An `ItemStore` loads those snapshots, persists the patched item and
//! answers the collection-wide scans the priority allocator needs.
//!
//! Writes are last-write-wins. There are no transactions: two requests that
//! patch the same item concurrently both succeed and the later save is kept.
//!
//! ## Example
//!
//! ```
//! use hangar::{CollectionItem, InMemoryItemStore, ItemStore};
//!
//! let store = InMemoryItemStore::new();
//! store.insert(&CollectionItem::new("ncc-1701")).unwrap();
//!
//! let loaded = store.get("ncc-1701").unwrap().unwrap();
//! assert!(loaded.is_neutral());
//! ```

mod in_memory;

use thiserror::Error;

use crate::item::CollectionItem;

/// Error type for item store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A writer panicked while holding the storage lock.
    #[error("item store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// Document encode/decode failed.
    #[error("item serialization error: {0}")]
    Serde(String),
    /// Insert of an id that is already stored.
    #[error("item already exists: {id}")]
    AlreadyExists { id: String },
    /// Failure reported by an external storage backend.
    #[error("item storage backend error: {0}")]
    Backend(String),
}

/// Abstract document storage for collection items, keyed by item id.
pub trait ItemStore: Send + Sync {
    /// Get an item by id. Returns `None` if not found.
    fn get(&self, id: &str) -> Result<Option<CollectionItem>, StoreError>;

    /// Insert a new item. Fails with `AlreadyExists` if the id is taken.
    fn insert(&self, item: &CollectionItem) -> Result<(), StoreError>;

    /// Upsert an item.
    fn save(&self, item: &CollectionItem) -> Result<(), StoreError>;

    /// Delete an item by id. Returns true if it existed.
    fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Find items matching a predicate, in no particular order.
    fn find(
        &self,
        predicate: &dyn Fn(&CollectionItem) -> bool,
    ) -> Result<Vec<CollectionItem>, StoreError>;
}

impl<S: ItemStore + ?Sized> ItemStore for std::sync::Arc<S> {
    fn get(&self, id: &str) -> Result<Option<CollectionItem>, StoreError> {
        (**self).get(id)
    }

    fn insert(&self, item: &CollectionItem) -> Result<(), StoreError> {
        (**self).insert(item)
    }

    fn save(&self, item: &CollectionItem) -> Result<(), StoreError> {
        (**self).save(item)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        (**self).delete(id)
    }

    fn find(
        &self,
        predicate: &dyn Fn(&CollectionItem) -> bool,
    ) -> Result<Vec<CollectionItem>, StoreError> {
        (**self).find(predicate)
    }
}

impl<S: ItemStore + ?Sized> ItemStore for &S {
    fn get(&self, id: &str) -> Result<Option<CollectionItem>, StoreError> {
        (**self).get(id)
    }

    fn insert(&self, item: &CollectionItem) -> Result<(), StoreError> {
        (**self).insert(item)
    }

    fn save(&self, item: &CollectionItem) -> Result<(), StoreError> {
        (**self).save(item)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        (**self).delete(id)
    }

    fn find(
        &self,
        predicate: &dyn Fn(&CollectionItem) -> bool,
    ) -> Result<Vec<CollectionItem>, StoreError> {
        (**self).find(predicate)
    }
}

pub use in_memory::InMemoryItemStore;
