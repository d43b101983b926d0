use tracing::debug;

use crate::item::{CollectionItem, Status};
use crate::priority::PriorityAllocator;

use super::clock::{Clock, SystemClock};
use super::direction::Direction;
use super::error::LifecycleError;
use super::input::OrderInput;
use super::patch::{
    CycleResult, OnOrderPatch, OwnedPatch, PriorityPatch, ReceivedPatch, Transition,
    WishlistPatch,
};

/// Computes status transitions for collection items.
///
/// The engine is pure apart from reading the clock and asking the allocator
/// for a priority: it takes a snapshot, returns a patch, and leaves
/// persistence to the caller.
#[derive(Debug, Clone, Default)]
pub struct StatusEngine<C = SystemClock> {
    clock: C,
}

impl StatusEngine<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> StatusEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Flip `owned`. Acquiring clears every other state; releasing leaves the
    /// item neutral.
    pub fn toggle_owned(&self, item: &CollectionItem) -> OwnedPatch {
        if item.is_owned() {
            OwnedPatch::Release
        } else {
            OwnedPatch::Acquire
        }
    }

    /// Flip `wishlist`. Adding appends the item to the end of the wishlist
    /// and clears owned, on order and not interested.
    pub fn toggle_wishlist<A>(
        &self,
        item: &CollectionItem,
        allocator: &A,
    ) -> Result<WishlistPatch, LifecycleError>
    where
        A: PriorityAllocator + ?Sized,
    {
        if item.status() == Status::Wishlist {
            return Ok(WishlistPatch::Remove);
        }

        let priority = match item.wishlist_priority() {
            Some(priority) => priority,
            None => allocator.next()?,
        };
        Ok(WishlistPatch::Add { priority })
    }

    /// Put the item on order, or take it off order and back onto the
    /// wishlist.
    ///
    /// When placing, `pricePaid` is exactly what the caller supplied and
    /// `orderDate` falls back to now.
    pub fn toggle_on_order<A>(
        &self,
        item: &CollectionItem,
        input: &OrderInput,
        allocator: &A,
    ) -> Result<OnOrderPatch, LifecycleError>
    where
        A: PriorityAllocator + ?Sized,
    {
        input.validate()?;
        debug!(item_id = %item.id(), from = %item.status(), on_order = input.on_order, "order toggle computed");

        if input.on_order {
            Ok(OnOrderPatch::Place {
                order_date: input.order_date.unwrap_or_else(|| self.clock.now()),
                price_paid: input.price_paid,
            })
        } else {
            Ok(OnOrderPatch::Cancel {
                priority: allocator.next()?,
            })
        }
    }

    /// Walk one step around the status ring.
    ///
    /// Forward: neutral -> not interested -> wishlist -> on order -> owned ->
    /// not interested. Backward: not interested -> neutral, owned -> neutral,
    /// on order -> wishlist, wishlist -> not interested, neutral -> owned.
    pub fn cycle_status<A>(
        &self,
        item: &CollectionItem,
        direction: Direction,
        allocator: &A,
    ) -> Result<CycleResult, LifecycleError>
    where
        A: PriorityAllocator + ?Sized,
    {
        let from = item.status();
        let transition = match direction {
            Direction::Forward => self.forward(item, allocator)?,
            Direction::Backward => self.backward(item, allocator)?,
        };
        debug!(item_id = %item.id(), %from, %direction, ?transition, "cycle computed");

        Ok(CycleResult {
            direction,
            from,
            transition,
        })
    }

    // Dispatch goes through `status()`, so a legacy document with more than
    // one flag resolves the same way it is listed and counted.
    fn forward<A>(&self, item: &CollectionItem, allocator: &A) -> Result<Transition, LifecycleError>
    where
        A: PriorityAllocator + ?Sized,
    {
        let transition = match item.status() {
            Status::Neutral | Status::Owned => Transition::MarkNotInterested,
            Status::NotInterested => Transition::AddToWishlist {
                priority: allocator.next()?,
            },
            Status::OnOrder => Transition::Receive {
                price_paid: item.price_paid(),
            },
            Status::Wishlist => Transition::PlaceOrder {
                order_date: self.clock.now(),
                price_paid: item.retail_price(),
            },
        };
        Ok(transition)
    }

    fn backward<A>(&self, item: &CollectionItem, allocator: &A) -> Result<Transition, LifecycleError>
    where
        A: PriorityAllocator + ?Sized,
    {
        let transition = match item.status() {
            Status::NotInterested => Transition::ClearNotInterested,
            Status::Owned => Transition::ReleaseOwned,
            Status::OnOrder => Transition::ReturnToWishlist {
                priority: allocator.next()?,
            },
            Status::Wishlist => Transition::MarkNotInterested,
            Status::Neutral => Transition::Acquire,
        };
        Ok(transition)
    }

    /// The order arrived: on order -> owned, keeping what was paid.
    pub fn mark_received(&self, item: &CollectionItem) -> Result<ReceivedPatch, LifecycleError> {
        if item.status() != Status::OnOrder {
            return Err(LifecycleError::InvalidArgument(format!(
                "item {} is not on order",
                item.id()
            )));
        }

        Ok(ReceivedPatch {
            price_paid: item.price_paid(),
        })
    }

    /// Move a wishlisted item to `priority`.
    pub fn set_wishlist_priority(
        &self,
        item: &CollectionItem,
        priority: u32,
    ) -> Result<PriorityPatch, LifecycleError> {
        if !item.is_wishlisted() {
            return Err(LifecycleError::InvalidArgument(format!(
                "item {} is not on the wishlist",
                item.id()
            )));
        }

        Ok(PriorityPatch { priority })
    }
}
