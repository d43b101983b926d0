use thiserror::Error;

/// A document that breaks one of the status invariants, or a status name
/// that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("item id must not be empty")]
    EmptyId,
    #[error("item {id} has conflicting statuses: {flags}")]
    ConflictingStatus { id: String, flags: String },
    #[error("item {id} has a wishlist priority but is not on the wishlist")]
    StrayPriority { id: String },
    #[error("item {id} has {field} set but is not on order")]
    StrayOrderDetail { id: String, field: &'static str },
    #[error("item {id} has a negative {field}")]
    NegativePrice { id: String, field: &'static str },
    #[error("unknown status: {0}")]
    UnknownStatus(String),
}
