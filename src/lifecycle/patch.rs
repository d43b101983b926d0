//! Typed results of the status transitions.
//!
//! Each operation has its own patch type, so a caller can only apply the
//! changes that operation is allowed to make. Applying a patch always goes
//! through the item's exclusive `enter_*` helpers.

use chrono::{DateTime, Utc};

use crate::item::{CollectionItem, Status};

use super::direction::Direction;

/// A computed change to one item.
pub trait Patch {
    /// Apply the change to the snapshot it was computed from.
    fn apply_to(&self, item: &mut CollectionItem);

    /// The status the item is in after `apply_to`.
    fn target(&self) -> Status;

    /// Human-readable description of the outcome.
    fn message(&self) -> &'static str;
}

/// Result of `toggle_owned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedPatch {
    Acquire,
    Release,
}

impl Patch for OwnedPatch {
    fn apply_to(&self, item: &mut CollectionItem) {
        match self {
            OwnedPatch::Acquire => item.enter_owned(None),
            OwnedPatch::Release => item.enter_neutral(),
        }
    }

    fn target(&self) -> Status {
        match self {
            OwnedPatch::Acquire => Status::Owned,
            OwnedPatch::Release => Status::Neutral,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            OwnedPatch::Acquire => "Marked as owned",
            OwnedPatch::Release => "Unmarked as owned",
        }
    }
}

/// Result of `toggle_wishlist`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistPatch {
    Add { priority: u32 },
    Remove,
}

impl Patch for WishlistPatch {
    fn apply_to(&self, item: &mut CollectionItem) {
        match self {
            WishlistPatch::Add { priority } => item.enter_wishlist(*priority),
            WishlistPatch::Remove => item.enter_neutral(),
        }
    }

    fn target(&self) -> Status {
        match self {
            WishlistPatch::Add { .. } => Status::Wishlist,
            WishlistPatch::Remove => Status::Neutral,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            WishlistPatch::Add { .. } => "Added to wishlist",
            WishlistPatch::Remove => "Removed from wishlist",
        }
    }
}

/// Result of `toggle_on_order`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OnOrderPatch {
    Place {
        order_date: DateTime<Utc>,
        price_paid: Option<f64>,
    },
    /// Off order and back onto the wishlist at `priority`.
    Cancel { priority: u32 },
}

impl Patch for OnOrderPatch {
    fn apply_to(&self, item: &mut CollectionItem) {
        match self {
            OnOrderPatch::Place {
                order_date,
                price_paid,
            } => item.enter_on_order(*order_date, *price_paid),
            OnOrderPatch::Cancel { priority } => item.enter_wishlist(*priority),
        }
    }

    fn target(&self) -> Status {
        match self {
            OnOrderPatch::Place { .. } => Status::OnOrder,
            OnOrderPatch::Cancel { .. } => Status::Wishlist,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            OnOrderPatch::Place { .. } => "Marked as on order",
            OnOrderPatch::Cancel { .. } => "Removed from orders and added to wishlist",
        }
    }
}

/// Result of `mark_received`: the order arrived. What was paid becomes the
/// purchase price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReceivedPatch {
    pub price_paid: Option<f64>,
}

impl Patch for ReceivedPatch {
    fn apply_to(&self, item: &mut CollectionItem) {
        receive(item, self.price_paid);
    }

    fn target(&self) -> Status {
        Status::Owned
    }

    fn message(&self) -> &'static str {
        "Marked as received and added to collection"
    }
}

/// Result of `set_wishlist_priority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityPatch {
    pub priority: u32,
}

impl Patch for PriorityPatch {
    fn apply_to(&self, item: &mut CollectionItem) {
        item.set_wishlist_priority(self.priority);
    }

    fn target(&self) -> Status {
        Status::Wishlist
    }

    fn message(&self) -> &'static str {
        "Wishlist priority updated"
    }
}

/// One step around the status ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    MarkNotInterested,
    AddToWishlist {
        priority: u32,
    },
    PlaceOrder {
        order_date: DateTime<Utc>,
        price_paid: Option<f64>,
    },
    Receive {
        price_paid: Option<f64>,
    },
    ClearNotInterested,
    ReleaseOwned,
    ReturnToWishlist {
        priority: u32,
    },
    Acquire,
}

/// Result of `cycle_status`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleResult {
    pub direction: Direction,
    pub from: Status,
    pub transition: Transition,
}

impl Patch for CycleResult {
    fn apply_to(&self, item: &mut CollectionItem) {
        match self.transition {
            Transition::MarkNotInterested => item.enter_not_interested(),
            Transition::AddToWishlist { priority } | Transition::ReturnToWishlist { priority } => {
                item.enter_wishlist(priority)
            }
            Transition::PlaceOrder {
                order_date,
                price_paid,
            } => item.enter_on_order(order_date, price_paid),
            Transition::Receive { price_paid } => receive(item, price_paid),
            Transition::ClearNotInterested | Transition::ReleaseOwned => item.enter_neutral(),
            Transition::Acquire => item.enter_owned(None),
        }
    }

    fn target(&self) -> Status {
        match self.transition {
            Transition::MarkNotInterested => Status::NotInterested,
            Transition::AddToWishlist { .. } | Transition::ReturnToWishlist { .. } => {
                Status::Wishlist
            }
            Transition::PlaceOrder { .. } => Status::OnOrder,
            Transition::Receive { .. } | Transition::Acquire => Status::Owned,
            Transition::ClearNotInterested | Transition::ReleaseOwned => Status::Neutral,
        }
    }

    fn message(&self) -> &'static str {
        match self.transition {
            Transition::MarkNotInterested => "Marked as not interested",
            Transition::AddToWishlist { .. } => "Added to wishlist",
            Transition::PlaceOrder { .. } => "Marked as on order",
            Transition::Receive { .. } | Transition::Acquire => "Marked as owned",
            Transition::ClearNotInterested => "Removed from not interested",
            Transition::ReleaseOwned => "Unmarked as owned",
            Transition::ReturnToWishlist { .. } => "Moved back to wishlist",
        }
    }
}

fn receive(item: &mut CollectionItem, price_paid: Option<f64>) {
    item.enter_owned(price_paid);
    if let Some(price) = price_paid {
        item.set_purchase_price(price);
    }
}
