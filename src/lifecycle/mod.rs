//! Status lifecycle engine.
//!
//! Given an item snapshot and a requested operation, the engine computes a
//! typed patch describing the new flag values and derived fields. It does no
//! I/O of its own: the caller loads the item, applies the patch and saves it.
//!
//! ## Example
//!
//! ```
//! use hangar::lifecycle::{Direction, Patch, StatusEngine};
//! use hangar::priority::CounterAllocator;
//! use hangar::CollectionItem;
//!
//! let engine = StatusEngine::new();
//! let allocator = CounterAllocator::starting_after(3);
//!
//! let mut item = CollectionItem::new("ncc-1701").not_interested();
//! let result = engine.cycle_status(&item, Direction::Forward, &allocator).unwrap();
//! result.apply_to(&mut item);
//!
//! assert_eq!(result.message(), "Added to wishlist");
//! assert_eq!(item.wishlist_priority(), Some(4));
//! ```

mod clock;
mod direction;
mod engine;
mod error;
mod input;
mod patch;

pub use clock::{Clock, FixedClock, SystemClock};
pub use direction::Direction;
pub use engine::StatusEngine;
pub use error::LifecycleError;
pub use input::{parse_order_date, CycleInput, OrderInput};
pub use patch::{
    CycleResult, OnOrderPatch, OwnedPatch, Patch, PriorityPatch, ReceivedPatch, Transition,
    WishlistPatch,
};
