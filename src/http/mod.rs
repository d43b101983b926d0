//! HTTP transport - maps item endpoints onto `ItemService` calls.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health` - health check returning `{ "ok": true }`.
//! - `GET /items?status=` - list items, the wishlist in rank order.
//! - `POST /items` - create a catalog item. Body `{ id, retailPrice? }`.
//! - `GET /items/counts` - status counts.
//! - `PUT /items/wishlist-priorities` - bulk reorder. Body `{ items: [{ id, priority }] }`.
//! - `GET /items/:id`, `DELETE /items/:id`.
//! - `PUT /items/:id/toggle-owned`, `PUT /items/:id/toggle-wishlist`.
//! - `PUT /items/:id/toggle-order` - body `{ onOrder, pricePaid?, orderDate? }`.
//! - `PUT /items/:id/cycle-status` - body `{ direction? }`, forward by default.
//! - `PUT /items/:id/mark-received`.
//! - `PUT /items/:id/wishlist-priority` - body `{ priority }`.
//!
//! Every response is `{ success, data?, message?, error? }`: 200 on success,
//! 404 for a missing item, 400 for bad input, 500 when storage fails.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hangar::{http, InMemoryItemStore, ItemService};
//!
//! let service = Arc::new(ItemService::new(Arc::new(InMemoryItemStore::new())));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone());
//!
//! // Or serve directly
//! http::serve(service, "0.0.0.0:3000").await?;
//! ```

mod response;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::item::{CollectionItem, Status};
use crate::lifecycle::{Clock, CycleInput, OrderInput};
use crate::priority::PriorityUpdate;
use crate::service::{ItemService, NewItem, ServiceError};
use crate::stats::StatusCounts;
use crate::store::ItemStore;

pub use response::{ApiError, Envelope, ItemView};

type Shared<S, C> = State<Arc<ItemService<S, C>>>;
type ItemResult = Result<Envelope<ItemView>, ApiError>;

/// Build an axum `Router` serving the item endpoints.
pub fn router<S, C>(service: Arc<ItemService<S, C>>) -> Router
where
    S: ItemStore + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/items",
            get(list_handler::<S, C>).post(create_handler::<S, C>),
        )
        .route("/items/counts", get(counts_handler::<S, C>))
        .route("/items/wishlist-priorities", put(reorder_handler::<S, C>))
        .route(
            "/items/:id",
            get(get_handler::<S, C>).delete(delete_handler::<S, C>),
        )
        .route("/items/:id/toggle-owned", put(toggle_owned_handler::<S, C>))
        .route(
            "/items/:id/toggle-wishlist",
            put(toggle_wishlist_handler::<S, C>),
        )
        .route("/items/:id/toggle-order", put(toggle_order_handler::<S, C>))
        .route("/items/:id/cycle-status", put(cycle_status_handler::<S, C>))
        .route("/items/:id/mark-received", put(mark_received_handler::<S, C>))
        .route(
            "/items/:id/wishlist-priority",
            put(set_priority_handler::<S, C>),
        )
        .with_state(service)
}

/// Serve the item endpoints at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<S, C>(service: Arc<ItemService<S, C>>, addr: &str) -> Result<(), std::io::Error>
where
    S: ItemStore + 'static,
    C: Clock + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "serving item endpoints");
    axum::serve(listener, app).await
}

/// `GET /health`
async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    status: Option<String>,
}

/// `GET /items?status=wishlist`
async fn list_handler<S: ItemStore + 'static, C: Clock + 'static>(
    State(service): Shared<S, C>,
    Query(query): Query<ListQuery>,
) -> Result<Envelope<Vec<ItemView>>, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<Status>)
        .transpose()
        .map_err(ServiceError::from)?;
    let items = service.list(status)?;
    Ok(Envelope::data(items.into_iter().map(ItemView::from).collect()))
}

/// `POST /items`
async fn create_handler<S: ItemStore + 'static, C: Clock + 'static>(
    State(service): Shared<S, C>,
    body: Bytes,
) -> ItemResult {
    let draft: NewItem = decode(&body, "create item")?;
    let item = service.create(draft)?;
    Ok(Envelope::data(ItemView::from(item)).with_message("Item created"))
}

/// `GET /items/counts`
async fn counts_handler<S: ItemStore + 'static, C: Clock + 'static>(
    State(service): Shared<S, C>,
) -> Result<Envelope<StatusCounts>, ApiError> {
    Ok(Envelope::data(service.counts()?))
}

#[derive(Debug, Deserialize)]
struct ReorderBody {
    items: Vec<PriorityUpdate>,
}

/// `PUT /items/wishlist-priorities`
async fn reorder_handler<S: ItemStore + 'static, C: Clock + 'static>(
    State(service): Shared<S, C>,
    body: Bytes,
) -> Result<Envelope<Value>, ApiError> {
    let body: ReorderBody = decode(&body, "wishlist reorder")?;
    let modified = service.reorder_wishlist(&body.items)?;
    Ok(Envelope::data(json!({ "modifiedCount": modified }))
        .with_message("Wishlist priorities updated"))
}

/// `GET /items/:id`
async fn get_handler<S: ItemStore + 'static, C: Clock + 'static>(
    State(service): Shared<S, C>,
    Path(id): Path<String>,
) -> ItemResult {
    let item: CollectionItem = service.get(&id)?;
    Ok(Envelope::data(ItemView::from(item)))
}

/// `DELETE /items/:id`
async fn delete_handler<S: ItemStore + 'static, C: Clock + 'static>(
    State(service): Shared<S, C>,
    Path(id): Path<String>,
) -> Result<Envelope<()>, ApiError> {
    service.delete(&id)?;
    Ok(Envelope::message("Item deleted"))
}

/// `PUT /items/:id/toggle-owned`
async fn toggle_owned_handler<S: ItemStore + 'static, C: Clock + 'static>(
    State(service): Shared<S, C>,
    Path(id): Path<String>,
) -> ItemResult {
    Ok(service.toggle_owned(&id)?.into())
}

/// `PUT /items/:id/toggle-wishlist`
async fn toggle_wishlist_handler<S: ItemStore + 'static, C: Clock + 'static>(
    State(service): Shared<S, C>,
    Path(id): Path<String>,
) -> ItemResult {
    Ok(service.toggle_wishlist(&id)?.into())
}

/// `PUT /items/:id/toggle-order`
async fn toggle_order_handler<S: ItemStore + 'static, C: Clock + 'static>(
    State(service): Shared<S, C>,
    Path(id): Path<String>,
    body: Bytes,
) -> ItemResult {
    let input = OrderInput::from_json(json_body(&body)?).map_err(ServiceError::from)?;
    Ok(service.toggle_on_order(&id, &input)?.into())
}

/// `PUT /items/:id/cycle-status`
async fn cycle_status_handler<S: ItemStore + 'static, C: Clock + 'static>(
    State(service): Shared<S, C>,
    Path(id): Path<String>,
    body: Bytes,
) -> ItemResult {
    let direction = CycleInput::from_json(json_body(&body)?)
        .and_then(|input| input.direction())
        .map_err(ServiceError::from)?;
    Ok(service.cycle_status(&id, direction)?.into())
}

/// `PUT /items/:id/mark-received`
async fn mark_received_handler<S: ItemStore + 'static, C: Clock + 'static>(
    State(service): Shared<S, C>,
    Path(id): Path<String>,
) -> ItemResult {
    Ok(service.mark_received(&id)?.into())
}

#[derive(Debug, Deserialize)]
struct PriorityBody {
    priority: u32,
}

/// `PUT /items/:id/wishlist-priority`
async fn set_priority_handler<S: ItemStore + 'static, C: Clock + 'static>(
    State(service): Shared<S, C>,
    Path(id): Path<String>,
    body: Bytes,
) -> ItemResult {
    let body: PriorityBody = decode(&body, "wishlist priority")?;
    Ok(service.set_wishlist_priority(&id, body.priority)?.into())
}

/// Parse a request body as JSON. An empty body reads as `{}`.
fn json_body(body: &Bytes) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }
    serde_json::from_slice(body).map_err(|e| {
        ApiError(ServiceError::InvalidArgument(format!(
            "malformed JSON body: {e}"
        )))
    })
}

fn decode<T: serde::de::DeserializeOwned>(body: &Bytes, what: &str) -> Result<T, ApiError> {
    serde_json::from_value(json_body(body)?).map_err(|e| {
        ApiError(ServiceError::InvalidArgument(format!(
            "malformed {what} payload: {e}"
        )))
    })
}
