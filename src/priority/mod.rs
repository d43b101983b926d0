//! Wishlist priorities.
//!
//! Lower numbers rank higher. New wishlist entries are appended at the end:
//! they get `highest_priority() + 1`. Two allocators are provided:
//!
//! - [`ScanAllocator`] scans the store for the current maximum on every call.
//!   Two concurrent allocations can read the same maximum and hand out the
//!   same number; ties are left as they are.
//! - [`CounterAllocator`] keeps an atomic counter seeded from one scan, so
//!   concurrent allocations in one process never collide.

mod allocator;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::item::CollectionItem;

pub use allocator::{AllocatorKind, CounterAllocator, PriorityAllocator, ScanAllocator};

/// One entry of a bulk wishlist reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityUpdate {
    pub id: String,
    pub priority: u32,
}

/// Sort wishlist items by rank, highest rank (lowest number) first.
///
/// Items without a priority go last; equal priorities fall back to id order
/// so listings are stable.
pub fn sort_by_priority(items: &mut [CollectionItem]) {
    items.sort_by(|a, b| {
        match (a.wishlist_priority(), b.wishlist_priority()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| a.id().cmp(b.id()))
    });
}
