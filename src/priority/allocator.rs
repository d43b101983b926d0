use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::{ItemStore, StoreError};

/// Source of wishlist priorities, injected into the status engine.
pub trait PriorityAllocator: Send + Sync {
    /// The largest priority among wishlisted items, or 0 when the wishlist is
    /// empty.
    fn highest_priority(&self) -> Result<u32, StoreError>;

    /// The priority for the next item appended to the wishlist.
    fn next(&self) -> Result<u32, StoreError> {
        Ok(self.highest_priority()?.saturating_add(1))
    }

    /// Record a priority assigned outside the allocator (manual reorder).
    fn observe(&self, _priority: u32) {}
}

/// Which allocator a service is built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocatorKind {
    #[default]
    Scan,
    Counter,
}

/// Read-the-maximum-then-add-one allocator.
///
/// Each call scans the whole store. Not atomic across concurrent callers.
pub struct ScanAllocator<S> {
    store: S,
}

impl<S: ItemStore> ScanAllocator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: ItemStore> PriorityAllocator for ScanAllocator<S> {
    fn highest_priority(&self) -> Result<u32, StoreError> {
        let wishlisted = self.store.find(&|item| item.is_wishlisted())?;
        let highest = wishlisted
            .iter()
            .filter_map(|item| item.wishlist_priority())
            .max()
            .unwrap_or(0);
        debug!(highest, wishlisted = wishlisted.len(), "scanned wishlist priorities");
        Ok(highest)
    }
}

/// Atomic counter allocator.
///
/// `next` is a single atomic update, so concurrent callers in the same process
/// always get distinct priorities.
#[derive(Debug, Default)]
pub struct CounterAllocator {
    counter: AtomicU32,
}

impl CounterAllocator {
    /// Start counting after `highest`.
    pub fn starting_after(highest: u32) -> Self {
        Self {
            counter: AtomicU32::new(highest),
        }
    }

    /// Seed the counter from the current wishlist in `store`.
    pub fn seeded<S: ItemStore>(store: &S) -> Result<Self, StoreError> {
        let highest = ScanAllocator::new(store).highest_priority()?;
        Ok(Self::starting_after(highest))
    }
}

impl PriorityAllocator for CounterAllocator {
    fn highest_priority(&self) -> Result<u32, StoreError> {
        Ok(self.counter.load(Ordering::SeqCst))
    }

    fn next(&self) -> Result<u32, StoreError> {
        let previous = self
            .counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(current.saturating_add(1))
            })
            .unwrap_or_else(|current| current);
        Ok(previous.saturating_add(1))
    }

    fn observe(&self, priority: u32) {
        self.counter.fetch_max(priority, Ordering::SeqCst);
    }
}
