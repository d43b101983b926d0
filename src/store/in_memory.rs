//! InMemoryItemStore - HashMap-backed item store for the server binary and tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{ItemStore, StoreError};
use crate::item::CollectionItem;

/// In-memory item store.
///
/// Items are kept as serialized JSON documents, keyed by id, so every read
/// hands out an independent snapshot. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryItemStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryItemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored items.
    pub fn len(&self) -> Result<usize, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("len"))?;
        Ok(storage.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn encode(item: &CollectionItem) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec(item).map_err(|e| StoreError::Serde(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> Result<CollectionItem, StoreError> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serde(e.to_string()))
    }
}

impl ItemStore for InMemoryItemStore {
    fn get(&self, id: &str) -> Result<Option<CollectionItem>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        storage.get(id).map(|bytes| Self::decode(bytes)).transpose()
    }

    fn insert(&self, item: &CollectionItem) -> Result<(), StoreError> {
        let bytes = Self::encode(item)?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("insert"))?;

        if storage.contains_key(item.id()) {
            return Err(StoreError::AlreadyExists {
                id: item.id().to_string(),
            });
        }

        storage.insert(item.id().to_string(), bytes);
        Ok(())
    }

    fn save(&self, item: &CollectionItem) -> Result<(), StoreError> {
        let bytes = Self::encode(item)?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        storage.insert(item.id().to_string(), bytes);
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("delete"))?;

        Ok(storage.remove(id).is_some())
    }

    fn find(
        &self,
        predicate: &dyn Fn(&CollectionItem) -> bool,
    ) -> Result<Vec<CollectionItem>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        let mut results = Vec::new();
        for bytes in storage.values() {
            let item = Self::decode(bytes)?;
            if predicate(&item) {
                results.push(item);
            }
        }

        Ok(results)
    }
}
