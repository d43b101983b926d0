use std::sync::Arc;

use chrono::{TimeZone, Utc};
use hangar::lifecycle::FixedClock;
use hangar::{http, CollectionItem, InMemoryItemStore, ItemService, ItemStore, StoreError};
use serde_json::Value;

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
}

/// Serve a service holding `items` on port 0 and return its base URL.
pub async fn start_server(items: Vec<CollectionItem>) -> String {
    let service = ItemService::new(Arc::new(InMemoryItemStore::new())).with_clock(clock());
    service.import(items).unwrap();
    serve(service).await
}

/// Serve a service whose store fails every call.
pub async fn start_broken_server() -> String {
    serve(ItemService::new(Arc::new(BrokenStore)).with_clock(clock())).await
}

async fn serve<S: ItemStore + 'static>(service: ItemService<S, FixedClock>) -> String {
    let app = http::router(Arc::new(service));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Send `request` and return the status code with the decoded JSON body.
pub async fn send(request: reqwest::RequestBuilder) -> (u16, Value) {
    let resp = request.send().await.unwrap();
    let status = resp.status().as_u16();
    let body = resp.json().await.unwrap();
    (status, body)
}

/// A store whose backend is unreachable.
pub struct BrokenStore;

fn offline() -> StoreError {
    StoreError::Backend("database offline".into())
}

impl ItemStore for BrokenStore {
    fn get(&self, _id: &str) -> Result<Option<CollectionItem>, StoreError> {
        Err(offline())
    }

    fn insert(&self, _item: &CollectionItem) -> Result<(), StoreError> {
        Err(offline())
    }

    fn save(&self, _item: &CollectionItem) -> Result<(), StoreError> {
        Err(offline())
    }

    fn delete(&self, _id: &str) -> Result<bool, StoreError> {
        Err(offline())
    }

    fn find(
        &self,
        _predicate: &dyn Fn(&CollectionItem) -> bool,
    ) -> Result<Vec<CollectionItem>, StoreError> {
        Err(offline())
    }
}
