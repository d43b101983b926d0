use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use hangar::lifecycle::FixedClock;
use hangar::{CollectionItem, InMemoryItemStore, ItemService};

pub type TestService = ItemService<InMemoryItemStore, FixedClock>;

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// A service over a fresh store holding `items`, with the clock frozen at
/// [`now`].
pub fn service_with(items: Vec<CollectionItem>) -> TestService {
    let service = ItemService::new(Arc::new(InMemoryItemStore::new())).with_clock(FixedClock(now()));
    service.import(items).unwrap();
    service
}
