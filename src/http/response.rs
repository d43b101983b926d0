//! The `{ success, data?, message?, error? }` envelope every endpoint returns.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::item::{CollectionItem, Status};
use crate::service::{Outcome, ServiceError};

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// An item as returned over HTTP: the stored document plus its derived
/// status.
#[derive(Debug, Serialize)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: CollectionItem,
    pub status: Status,
}

impl From<CollectionItem> for ItemView {
    fn from(item: CollectionItem) -> Self {
        let status = item.status();
        Self { item, status }
    }
}

impl From<Outcome> for Envelope<ItemView> {
    fn from(outcome: Outcome) -> Self {
        Envelope::data(ItemView::from(outcome.item)).with_message(outcome.message)
    }
}

/// A `ServiceError` rendered as an error envelope with the matching status
/// code.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }

        let body = Envelope::<()> {
            success: false,
            data: None,
            message: None,
            error: Some(self.0.to_string()),
        };
        (status, Json(body)).into_response()
    }
}
