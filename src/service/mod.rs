//! Item service - the storage-facing side of the status engine.
//!
//! `ItemService<S>` holds an item store and a priority allocator. Each
//! operation loads one item, asks the engine for a patch, applies it and
//! saves the result, returning the persisted item with a message.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use hangar::service::{ItemService, NewItem};
//! use hangar::InMemoryItemStore;
//!
//! let service = ItemService::new(Arc::new(InMemoryItemStore::new()));
//! service.create(NewItem::new("ncc-1701").with_retail_price(19.99)).unwrap();
//!
//! let outcome = service.toggle_wishlist("ncc-1701").unwrap();
//! assert_eq!(outcome.message, "Added to wishlist");
//! assert_eq!(outcome.item.wishlist_priority(), Some(1));
//! ```

mod error;
mod item_service;

pub use error::ServiceError;
pub use item_service::{ItemService, NewItem, Outcome};
