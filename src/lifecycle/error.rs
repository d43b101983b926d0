use thiserror::Error;

use crate::store::StoreError;

/// Errors raised while computing a transition. Nothing has been written when
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// Malformed direction, payload or a transition the item cannot take.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The priority allocator could not read the wishlist.
    #[error("priority allocation failed: {0}")]
    Allocation(#[from] StoreError),
}
