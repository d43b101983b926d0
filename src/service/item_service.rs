//! Item service - load, transition, persist.
//!
//! `ItemService` owns the storage handle, the priority allocator and the
//! status engine. It is built once per process and shared by the request
//! handlers; there is no global connection state.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::error::ServiceError;
use crate::config::Config;
use crate::item::{CollectionItem, InitialStatus, Status};
use crate::lifecycle::{
    Clock, Direction, LifecycleError, OrderInput, Patch, StatusEngine, SystemClock,
};
use crate::priority::{
    sort_by_priority, AllocatorKind, CounterAllocator, PriorityAllocator, PriorityUpdate,
    ScanAllocator,
};
use crate::stats::StatusCounts;
use crate::store::{ItemStore, StoreError};

/// The item as persisted after an operation, plus a description of what
/// happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub item: CollectionItem,
    pub message: &'static str,
}

/// Payload for creating a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub id: String,
    #[serde(default)]
    pub retail_price: Option<f64>,
}

impl NewItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            retail_price: None,
        }
    }

    pub fn with_retail_price(mut self, price: f64) -> Self {
        self.retail_price = Some(price);
        self
    }
}

/// Status operations over an item store.
pub struct ItemService<S, C = SystemClock> {
    store: Arc<S>,
    allocator: Box<dyn PriorityAllocator>,
    engine: StatusEngine<C>,
    default_status: InitialStatus,
}

impl<S: ItemStore + 'static> ItemService<S, SystemClock> {
    /// A service with the scanning allocator and neutral new items.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            allocator: Box::new(ScanAllocator::new(store.clone())),
            store,
            engine: StatusEngine::new(),
            default_status: InitialStatus::default(),
        }
    }

    /// A service configured from `config`. The counter allocator is seeded
    /// from the store, so this reads the wishlist once.
    pub fn from_config(store: Arc<S>, config: &Config) -> Result<Self, ServiceError> {
        let service = Self::new(store).with_default_status(config.items.default_status);
        match config.priority.allocator {
            AllocatorKind::Scan => Ok(service),
            AllocatorKind::Counter => {
                let counter = CounterAllocator::seeded(&*service.store)?;
                Ok(service.with_allocator(counter))
            }
        }
    }
}

impl<S: ItemStore + 'static, C: Clock> ItemService<S, C> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ItemService<S, C2> {
        ItemService {
            store: self.store,
            allocator: self.allocator,
            engine: StatusEngine::with_clock(clock),
            default_status: self.default_status,
        }
    }

    pub fn with_allocator(mut self, allocator: impl PriorityAllocator + 'static) -> Self {
        self.allocator = Box::new(allocator);
        self
    }

    pub fn with_default_status(mut self, status: InitialStatus) -> Self {
        self.default_status = status;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn allocator(&self) -> &dyn PriorityAllocator {
        self.allocator.as_ref()
    }

    pub fn engine(&self) -> &StatusEngine<C> {
        &self.engine
    }

    pub fn get(&self, id: &str) -> Result<CollectionItem, ServiceError> {
        self.store
            .get(id)?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Items in `status` (all items when `None`). The wishlist comes back in
    /// rank order, everything else by id.
    pub fn list(&self, status: Option<Status>) -> Result<Vec<CollectionItem>, ServiceError> {
        let mut items = match status {
            Some(status) => self.store.find(&|item| item.status() == status)?,
            None => self.store.find(&|_| true)?,
        };

        if status == Some(Status::Wishlist) {
            sort_by_priority(&mut items);
        } else {
            items.sort_by(|a, b| a.id().cmp(b.id()));
        }
        Ok(items)
    }

    pub fn counts(&self) -> Result<StatusCounts, ServiceError> {
        let items = self.store.find(&|_| true)?;
        Ok(StatusCounts::tally(&items))
    }

    /// Create a catalog item in the configured default status.
    pub fn create(&self, draft: NewItem) -> Result<CollectionItem, ServiceError> {
        let mut item = CollectionItem::with_initial_status(draft.id, self.default_status);
        if let Some(price) = draft.retail_price {
            item = item.with_retail_price(price);
        }
        item.validate()?;

        self.store.insert(&item).map_err(already_exists_is_invalid)?;
        info!(item_id = %item.id(), status = %item.status(), "item created");
        Ok(item)
    }

    /// Store a batch of catalog documents. Every document is validated before
    /// anything is written; neutral documents get the default status.
    pub fn import(&self, items: Vec<CollectionItem>) -> Result<usize, ServiceError> {
        let mut seen = HashSet::new();
        let mut prepared = Vec::with_capacity(items.len());
        for item in items {
            item.validate()?;
            if !seen.insert(item.id().to_string()) {
                return Err(ServiceError::InvalidArgument(format!(
                    "duplicate item id in import: {}",
                    item.id()
                )));
            }
            if self.store.get(item.id())?.is_some() {
                return Err(ServiceError::InvalidArgument(format!(
                    "item already exists: {}",
                    item.id()
                )));
            }

            let item = match (item.is_neutral(), self.default_status) {
                (true, InitialStatus::NotInterested) => item.not_interested(),
                _ => item,
            };
            prepared.push(item);
        }

        for item in &prepared {
            self.store.insert(item).map_err(already_exists_is_invalid)?;
        }
        info!(count = prepared.len(), "items imported");
        Ok(prepared.len())
    }

    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if self.store.delete(id)? {
            info!(item_id = %id, "item deleted");
            Ok(())
        } else {
            Err(ServiceError::NotFound(id.to_string()))
        }
    }

    pub fn toggle_owned(&self, id: &str) -> Result<Outcome, ServiceError> {
        self.transition(id, |item| Ok(self.engine.toggle_owned(item)))
    }

    pub fn toggle_wishlist(&self, id: &str) -> Result<Outcome, ServiceError> {
        self.transition(id, |item| {
            self.engine.toggle_wishlist(item, self.allocator.as_ref())
        })
    }

    pub fn toggle_on_order(&self, id: &str, input: &OrderInput) -> Result<Outcome, ServiceError> {
        input.validate()?;
        self.transition(id, |item| {
            self.engine
                .toggle_on_order(item, input, self.allocator.as_ref())
        })
    }

    pub fn cycle_status(&self, id: &str, direction: Direction) -> Result<Outcome, ServiceError> {
        self.transition(id, |item| {
            self.engine
                .cycle_status(item, direction, self.allocator.as_ref())
        })
    }

    pub fn mark_received(&self, id: &str) -> Result<Outcome, ServiceError> {
        self.transition(id, |item| self.engine.mark_received(item))
    }

    pub fn set_wishlist_priority(&self, id: &str, priority: u32) -> Result<Outcome, ServiceError> {
        let outcome =
            self.transition(id, |item| self.engine.set_wishlist_priority(item, priority))?;
        self.allocator.observe(priority);
        Ok(outcome)
    }

    /// Reassign wishlist priorities in bulk. All updates are checked before
    /// any is written, and a failed save puts back the items already written.
    /// Returns how many items actually changed rank.
    pub fn reorder_wishlist(&self, updates: &[PriorityUpdate]) -> Result<usize, ServiceError> {
        if updates.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "reorder needs at least one item".into(),
            ));
        }

        let mut seen = HashSet::new();
        let mut staged = Vec::with_capacity(updates.len());
        for update in updates {
            if !seen.insert(update.id.as_str()) {
                return Err(ServiceError::InvalidArgument(format!(
                    "duplicate item id in reorder: {}",
                    update.id
                )));
            }
            let item = self.get(&update.id)?;
            let patch = self.engine.set_wishlist_priority(&item, update.priority)?;
            staged.push((item, patch));
        }

        // Snapshots of the items already written, for rollback.
        let mut saved: Vec<CollectionItem> = Vec::new();
        let mut applied = Vec::new();
        for (item, patch) in staged {
            if item.wishlist_priority() == Some(patch.priority) {
                continue;
            }
            let mut next = item.clone();
            patch.apply_to(&mut next);
            if let Err(err) = self.store.save(&next) {
                self.restore(&saved);
                return Err(err.into());
            }
            saved.push(item);
            applied.push(patch.priority);
        }

        for priority in &applied {
            self.allocator.observe(*priority);
        }
        let modified = applied.len();

        info!(requested = updates.len(), modified, "wishlist reordered");
        Ok(modified)
    }

    // Put back the snapshots taken before a bulk write that failed partway.
    fn restore(&self, originals: &[CollectionItem]) {
        for original in originals.iter().rev() {
            if let Err(err) = self.store.save(original) {
                error!(item_id = %original.id(), error = %err, "failed to roll back wishlist reorder");
            }
        }
        warn!(restored = originals.len(), "wishlist reorder rolled back");
    }

    fn transition<P, F>(&self, id: &str, compute: F) -> Result<Outcome, ServiceError>
    where
        P: Patch,
        F: FnOnce(&CollectionItem) -> Result<P, LifecycleError>,
    {
        let mut item = self.get(id)?;
        if let Err(err) = item.validate() {
            // Legacy documents are still transitioned; the entry helpers
            // bring them back to a single status.
            warn!(item_id = %id, error = %err, "transitioning item that violates status invariants");
        }

        let from = item.status();
        let patch = compute(&item)?;
        patch.apply_to(&mut item);
        self.store.save(&item)?;

        info!(item_id = %id, %from, to = %item.status(), message = patch.message(), "status transition");
        Ok(Outcome {
            item,
            message: patch.message(),
        })
    }
}

fn already_exists_is_invalid(err: StoreError) -> ServiceError {
    match err {
        StoreError::AlreadyExists { id } => {
            ServiceError::InvalidArgument(format!("item already exists: {id}"))
        }
        other => ServiceError::Storage(other),
    }
}
