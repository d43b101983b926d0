//! Collection items - the documents the status engine moves between states.
//!
//! A `CollectionItem` carries four acquisition flags (`owned`, `wishlist`,
//! `onOrder`, `notInterested`) plus the fields derived from them. At most one
//! flag is ever set; every state change goes through one of the `enter_*`
//! helpers below, which reset the others first.
//!
//! ## Example
//!
//! ```
//! use hangar::{CollectionItem, Status};
//!
//! let item = CollectionItem::new("ncc-1701").with_retail_price(19.99).wishlisted(3);
//! assert_eq!(item.status(), Status::Wishlist);
//! assert_eq!(item.wishlist_priority(), Some(3));
//! assert!(item.validate().is_ok());
//! ```

mod error;
mod status;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use error::ItemError;
pub use status::{InitialStatus, Status};

/// A catalog item tracked in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    id: String,
    #[serde(default)]
    owned: bool,
    #[serde(default)]
    wishlist: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wishlist_priority: Option<u32>,
    #[serde(default)]
    on_order: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price_paid: Option<f64>,
    #[serde(default)]
    not_interested: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    retail_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    purchase_price: Option<f64>,
}

impl CollectionItem {
    /// Create a neutral item with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owned: false,
            wishlist: false,
            wishlist_priority: None,
            on_order: false,
            order_date: None,
            price_paid: None,
            not_interested: false,
            retail_price: None,
            purchase_price: None,
        }
    }

    /// Create an item in the configured starting status.
    pub fn with_initial_status(id: impl Into<String>, initial: InitialStatus) -> Self {
        let item = Self::new(id);
        match initial {
            InitialStatus::Neutral => item,
            InitialStatus::NotInterested => item.not_interested(),
        }
    }

    pub fn with_retail_price(mut self, price: f64) -> Self {
        self.retail_price = Some(price);
        self
    }

    // Builder-style seeds. Each goes through the matching `enter_*` helper so
    // a seeded item satisfies the same invariants as a transitioned one.

    pub fn not_interested(mut self) -> Self {
        self.enter_not_interested();
        self
    }

    pub fn wishlisted(mut self, priority: u32) -> Self {
        self.enter_wishlist(priority);
        self
    }

    pub fn ordered(mut self, order_date: DateTime<Utc>, price_paid: Option<f64>) -> Self {
        self.enter_on_order(order_date, price_paid);
        self
    }

    pub fn acquired(mut self, price_paid: Option<f64>) -> Self {
        self.enter_owned(price_paid);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_owned(&self) -> bool {
        self.owned
    }

    pub fn is_wishlisted(&self) -> bool {
        self.wishlist
    }

    pub fn wishlist_priority(&self) -> Option<u32> {
        self.wishlist_priority
    }

    pub fn is_on_order(&self) -> bool {
        self.on_order
    }

    pub fn order_date(&self) -> Option<DateTime<Utc>> {
        self.order_date
    }

    pub fn price_paid(&self) -> Option<f64> {
        self.price_paid
    }

    pub fn is_not_interested(&self) -> bool {
        self.not_interested
    }

    pub fn retail_price(&self) -> Option<f64> {
        self.retail_price
    }

    pub fn purchase_price(&self) -> Option<f64> {
        self.purchase_price
    }

    /// The state the item occupies.
    ///
    /// For a document that breaks exclusivity (only possible for data that
    /// skipped `validate`), the strongest flag wins: owned, then on order,
    /// then wishlist, then not interested.
    pub fn status(&self) -> Status {
        if self.owned {
            Status::Owned
        } else if self.on_order {
            Status::OnOrder
        } else if self.wishlist {
            Status::Wishlist
        } else if self.not_interested {
            Status::NotInterested
        } else {
            Status::Neutral
        }
    }

    pub fn is_neutral(&self) -> bool {
        !self.owned && !self.wishlist && !self.on_order && !self.not_interested
    }

    /// Number of acquisition flags currently set.
    pub fn active_flags(&self) -> usize {
        [self.owned, self.wishlist, self.on_order, self.not_interested]
            .iter()
            .filter(|flag| **flag)
            .count()
    }

    /// Check every status invariant.
    ///
    /// Documents coming from outside the engine (imports, API payloads) are
    /// run through this before they are stored.
    pub fn validate(&self) -> Result<(), ItemError> {
        if self.id.trim().is_empty() {
            return Err(ItemError::EmptyId);
        }

        if self.active_flags() > 1 {
            let flags = [
                ("owned", self.owned),
                ("wishlist", self.wishlist),
                ("onOrder", self.on_order),
                ("notInterested", self.not_interested),
            ]
            .iter()
            .filter(|(_, set)| *set)
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ");
            return Err(ItemError::ConflictingStatus {
                id: self.id.clone(),
                flags,
            });
        }

        if !self.wishlist && self.wishlist_priority.is_some() {
            return Err(ItemError::StrayPriority {
                id: self.id.clone(),
            });
        }

        if !self.on_order {
            if self.order_date.is_some() {
                return Err(ItemError::StrayOrderDetail {
                    id: self.id.clone(),
                    field: "orderDate",
                });
            }
            // A received order keeps what was paid for it.
            if self.price_paid.is_some() && !self.owned {
                return Err(ItemError::StrayOrderDetail {
                    id: self.id.clone(),
                    field: "pricePaid",
                });
            }
        }

        for (field, price) in [
            ("pricePaid", self.price_paid),
            ("retailPrice", self.retail_price),
            ("purchasePrice", self.purchase_price),
        ] {
            if price.is_some_and(|p| p < 0.0 || p.is_nan()) {
                return Err(ItemError::NegativePrice {
                    id: self.id.clone(),
                    field,
                });
            }
        }

        Ok(())
    }

    // State entry. Every helper clears all acquisition state before setting
    // its own, so exclusivity holds no matter which entry point ran.

    pub(crate) fn enter_neutral(&mut self) {
        self.owned = false;
        self.wishlist = false;
        self.wishlist_priority = None;
        self.on_order = false;
        self.order_date = None;
        self.price_paid = None;
        self.not_interested = false;
    }

    pub(crate) fn enter_not_interested(&mut self) {
        self.enter_neutral();
        self.not_interested = true;
    }

    pub(crate) fn enter_wishlist(&mut self, priority: u32) {
        self.enter_neutral();
        self.wishlist = true;
        self.wishlist_priority = Some(priority);
    }

    pub(crate) fn enter_on_order(&mut self, order_date: DateTime<Utc>, price_paid: Option<f64>) {
        self.enter_neutral();
        self.on_order = true;
        self.order_date = Some(order_date);
        self.price_paid = price_paid;
    }

    pub(crate) fn enter_owned(&mut self, price_paid: Option<f64>) {
        self.enter_neutral();
        self.owned = true;
        self.price_paid = price_paid;
    }

    pub(crate) fn set_purchase_price(&mut self, price: f64) {
        self.purchase_price = Some(price);
    }

    /// Only meaningful while wishlisted; callers check first.
    pub(crate) fn set_wishlist_priority(&mut self, priority: u32) {
        self.wishlist_priority = Some(priority);
    }
}
