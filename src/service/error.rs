//! Error types for item service operations.

use thiserror::Error;

use crate::item::ItemError;
use crate::lifecycle::LifecycleError;
use crate::store::StoreError;

/// Error type for item service operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The referenced item does not exist.
    #[error("item not found: {0}")]
    NotFound(String),
    /// Malformed input or a transition the item cannot take.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The store failed to read or write.
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl From<LifecycleError> for ServiceError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::InvalidArgument(message) => ServiceError::InvalidArgument(message),
            LifecycleError::Allocation(store) => ServiceError::Storage(store),
        }
    }
}

impl From<ItemError> for ServiceError {
    fn from(err: ItemError) -> Self {
        ServiceError::InvalidArgument(err.to_string())
    }
}

impl ServiceError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::InvalidArgument(_) => 400,
            ServiceError::Storage(_) => 500,
        }
    }
}
