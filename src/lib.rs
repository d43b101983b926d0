//! hangar - status lifecycle engine for a personal collectibles inventory.
//!
//! Items move between five states: neutral, not interested, wishlist, on
//! order and owned. The [`lifecycle`] engine computes typed patches for
//! every transition, the [`priority`] allocator ranks the wishlist, and the
//! [`service`] layer persists the result through an [`ItemStore`].

pub mod config;
pub mod item;
pub mod lifecycle;
pub mod priority;
pub mod service;
pub mod stats;
pub mod store;

#[cfg(feature = "http")]
pub mod http;

pub use config::{Config, ConfigError};
pub use item::{CollectionItem, InitialStatus, ItemError, Status};
pub use lifecycle::{Direction, LifecycleError, OrderInput, Patch, StatusEngine};
pub use priority::{CounterAllocator, PriorityAllocator, ScanAllocator};
pub use service::{ItemService, NewItem, Outcome, ServiceError};
pub use stats::StatusCounts;
pub use store::{InMemoryItemStore, ItemStore, StoreError};
