//! Invariants that hold for every item and every sequence of operations.

use std::sync::Arc;

use hangar::lifecycle::FixedClock;
use hangar::priority::PriorityAllocator;
use hangar::{
    CollectionItem, CounterAllocator, Direction, InMemoryItemStore, ItemStore, OrderInput, Patch,
    ScanAllocator, Status, StatusEngine,
};
use proptest::prelude::*;

use crate::support::now;

#[derive(Debug, Clone)]
enum Op {
    ToggleOwned,
    ToggleWishlist,
    PlaceOrder(Option<f64>),
    CancelOrder,
    Cycle(Direction),
    Receive,
    SetPriority(u32),
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Forward), Just(Direction::Backward)]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::ToggleOwned),
        Just(Op::ToggleWishlist),
        proptest::option::of(0.0f64..1_000.0).prop_map(Op::PlaceOrder),
        Just(Op::CancelOrder),
        arb_direction().prop_map(Op::Cycle),
        Just(Op::Receive),
        (1u32..50).prop_map(Op::SetPriority),
    ]
}

fn arb_item() -> impl Strategy<Value = CollectionItem> {
    (
        0usize..5,
        proptest::option::of(0.0f64..500.0),
        1u32..100,
        proptest::option::of(0.0f64..500.0),
    )
        .prop_map(|(status, retail, priority, paid)| {
            let mut item = CollectionItem::new("item");
            if let Some(retail) = retail {
                item = item.with_retail_price(retail);
            }
            match status {
                0 => item,
                1 => item.not_interested(),
                2 => item.wishlisted(priority),
                3 => item.ordered(now(), paid),
                _ => item.acquired(paid),
            }
        })
}

fn run(item: &mut CollectionItem, patch: impl Patch) -> Status {
    patch.apply_to(item);
    patch.target()
}

/// Apply `op` to `item`. Returns the status the patch promised, or `None`
/// when the engine rejected the operation.
fn step(
    engine: &StatusEngine<FixedClock>,
    allocator: &CounterAllocator,
    item: &mut CollectionItem,
    op: &Op,
) -> Option<Status> {
    let snapshot = item.clone();
    let target = match op {
        Op::ToggleOwned => run(item, engine.toggle_owned(&snapshot)),
        Op::ToggleWishlist => run(item, engine.toggle_wishlist(&snapshot, allocator).ok()?),
        Op::PlaceOrder(price) => {
            let mut input = OrderInput::place();
            input.price_paid = *price;
            run(item, engine.toggle_on_order(&snapshot, &input, allocator).ok()?)
        }
        Op::CancelOrder => run(
            item,
            engine
                .toggle_on_order(&snapshot, &OrderInput::cancel(), allocator)
                .ok()?,
        ),
        Op::Cycle(direction) => run(
            item,
            engine.cycle_status(&snapshot, *direction, allocator).ok()?,
        ),
        Op::Receive => run(item, engine.mark_received(&snapshot).ok()?),
        Op::SetPriority(priority) => run(
            item,
            engine.set_wishlist_priority(&snapshot, *priority).ok()?,
        ),
    };
    Some(target)
}

fn engine() -> StatusEngine<FixedClock> {
    StatusEngine::with_clock(FixedClock(now()))
}

proptest! {
    #[test]
    fn every_sequence_keeps_one_status(
        start in arb_item(),
        ops in proptest::collection::vec(arb_op(), 0..25),
    ) {
        let engine = engine();
        let allocator = CounterAllocator::starting_after(100);
        let mut item = start;

        for op in &ops {
            let before = item.clone();
            match step(&engine, &allocator, &mut item, op) {
                Some(target) => prop_assert_eq!(item.status(), target),
                None => prop_assert_eq!(&item, &before),
            }
            prop_assert!(item.active_flags() <= 1);
            prop_assert!(item.validate().is_ok(), "{:?} after {:?}", item, op);
            prop_assert_eq!(item.is_wishlisted(), item.wishlist_priority().is_some());
            prop_assert_eq!(item.is_on_order(), item.order_date().is_some());
        }
    }

    #[test]
    fn rejected_operations_only_target_the_wrong_state(start in arb_item(), op in arb_op()) {
        let engine = engine();
        let allocator = CounterAllocator::default();
        let mut item = start.clone();

        if step(&engine, &allocator, &mut item, &op).is_none() {
            match op {
                Op::Receive => prop_assert_ne!(start.status(), Status::OnOrder),
                Op::SetPriority(_) => prop_assert_ne!(start.status(), Status::Wishlist),
                other => prop_assert!(false, "{:?} should never be rejected", other),
            }
        }
    }

    #[test]
    fn cycling_there_and_back_restores_ring_states(
        wishlisted in any::<bool>(),
        first in arb_direction(),
        priority in 1u32..20,
    ) {
        let engine = engine();
        let allocator = CounterAllocator::starting_after(20);
        let start = if wishlisted {
            CollectionItem::new("item").wishlisted(priority)
        } else {
            CollectionItem::new("item").not_interested()
        };

        let mut item = start.clone();
        step(&engine, &allocator, &mut item, &Op::Cycle(first));
        step(&engine, &allocator, &mut item, &Op::Cycle(first.reverse()));

        prop_assert_eq!(item.status(), start.status());
    }

    #[test]
    fn double_toggle_owned_is_identity_on_status(start in arb_item()) {
        let engine = engine();
        let allocator = CounterAllocator::default();
        let mut item = start.clone();

        step(&engine, &allocator, &mut item, &Op::ToggleOwned);
        step(&engine, &allocator, &mut item, &Op::ToggleOwned);

        let expected = if start.is_owned() { Status::Owned } else { Status::Neutral };
        prop_assert_eq!(item.status(), expected);
    }

    #[test]
    fn scan_allocator_appends_after_highest(
        priorities in proptest::collection::vec(1u32..1_000, 0..20),
    ) {
        let store = Arc::new(InMemoryItemStore::new());
        for (index, priority) in priorities.iter().enumerate() {
            store
                .insert(&CollectionItem::new(format!("w{index}")).wishlisted(*priority))
                .unwrap();
        }
        store.insert(&CollectionItem::new("owned").acquired(None)).unwrap();

        let allocator = ScanAllocator::new(store);
        let highest = priorities.iter().copied().max().unwrap_or(0);

        prop_assert_eq!(allocator.highest_priority().unwrap(), highest);
        prop_assert_eq!(allocator.next().unwrap(), highest + 1);
        // Nothing was written, so asking again gives the same answer.
        prop_assert_eq!(allocator.next().unwrap(), highest + 1);
    }

    #[test]
    fn counter_allocator_never_repeats(
        seed in 0u32..1_000,
        observed in proptest::collection::vec(0u32..2_000, 0..10),
    ) {
        let allocator = CounterAllocator::starting_after(seed);
        let mut last = seed;

        for priority in observed {
            allocator.observe(priority);
            let next = allocator.next().unwrap();
            prop_assert!(next > last);
            prop_assert!(next > priority);
            last = next;
        }
    }
}
