//! The worked examples of the status ring, one test each.

use hangar::lifecycle::parse_order_date;
use hangar::{CollectionItem, Direction, OrderInput, Status};

use crate::support::{now, service_with};

#[test]
fn neutral_forward_is_not_interested() {
    let service = service_with(vec![CollectionItem::new("a")]);

    let outcome = service.cycle_status("a", Direction::Forward).unwrap();

    assert_eq!(outcome.message, "Marked as not interested");
    assert!(outcome.item.is_not_interested());
    assert_eq!(outcome.item.active_flags(), 1);
}

#[test]
fn not_interested_forward_appends_to_wishlist() {
    let service = service_with(vec![
        CollectionItem::new("a").not_interested(),
        CollectionItem::new("b").wishlisted(1),
        CollectionItem::new("c").wishlisted(3),
    ]);

    let outcome = service.cycle_status("a", Direction::Forward).unwrap();

    assert_eq!(outcome.message, "Added to wishlist");
    assert!(!outcome.item.is_not_interested());
    assert!(outcome.item.is_wishlisted());
    assert_eq!(outcome.item.wishlist_priority(), Some(4));
}

#[test]
fn wishlist_forward_places_order_at_retail() {
    let service = service_with(vec![CollectionItem::new("a")
        .with_retail_price(19.99)
        .wishlisted(4)]);

    let outcome = service.cycle_status("a", Direction::Forward).unwrap();

    assert_eq!(outcome.message, "Marked as on order");
    let item = outcome.item;
    assert!(!item.is_wishlisted());
    assert_eq!(item.wishlist_priority(), None);
    assert!(item.is_on_order());
    assert_eq!(item.order_date(), Some(now()));
    assert_eq!(item.price_paid(), Some(19.99));
}

#[test]
fn on_order_backward_returns_to_end_of_wishlist() {
    let ordered = parse_order_date("2024-01-01").unwrap();
    let service = service_with(vec![
        CollectionItem::new("a").ordered(ordered, Some(19.99)),
        CollectionItem::new("b").wishlisted(7),
    ]);

    let outcome = service.cycle_status("a", Direction::Backward).unwrap();

    assert_eq!(outcome.message, "Moved back to wishlist");
    let item = outcome.item;
    assert!(!item.is_on_order());
    assert_eq!(item.order_date(), None);
    assert_eq!(item.price_paid(), None);
    assert!(item.is_wishlisted());
    assert_eq!(item.wishlist_priority(), Some(8));
}

#[test]
fn toggle_owned_releases_owned_item() {
    let service = service_with(vec![CollectionItem::new("a").acquired(Some(12.0))]);

    let outcome = service.toggle_owned("a").unwrap();

    assert_eq!(outcome.message, "Unmarked as owned");
    assert_eq!(outcome.item.status(), Status::Neutral);
    assert_eq!(outcome.item.active_flags(), 0);
    assert_eq!(outcome.item.price_paid(), None);
}

#[test]
fn cancelling_order_moves_item_to_wishlist() {
    let service = service_with(vec![
        CollectionItem::new("a").ordered(now(), Some(30.0)),
        CollectionItem::new("b").wishlisted(2),
    ]);

    let outcome = service.toggle_on_order("a", &OrderInput::cancel()).unwrap();

    assert_eq!(outcome.message, "Removed from orders and added to wishlist");
    let item = outcome.item;
    assert!(!item.is_on_order());
    assert_eq!(item.order_date(), None);
    assert_eq!(item.price_paid(), None);
    assert!(item.is_wishlisted());
    assert_eq!(item.wishlist_priority(), Some(3));
}

#[test]
fn forward_ring_walk() {
    let service = service_with(vec![CollectionItem::new("a").with_retail_price(45.0)]);

    let expected = [
        (Status::NotInterested, "Marked as not interested"),
        (Status::Wishlist, "Added to wishlist"),
        (Status::OnOrder, "Marked as on order"),
        (Status::Owned, "Marked as owned"),
        (Status::NotInterested, "Marked as not interested"),
    ];
    for (status, message) in expected {
        let outcome = service.cycle_status("a", Direction::Forward).unwrap();
        assert_eq!(outcome.item.status(), status);
        assert_eq!(outcome.message, message);
        assert!(outcome.item.validate().is_ok());
    }
}

#[test]
fn received_order_keeps_what_was_paid() {
    let service = service_with(vec![CollectionItem::new("a").ordered(now(), Some(27.5))]);

    let outcome = service.mark_received("a").unwrap();

    assert_eq!(outcome.message, "Marked as received and added to collection");
    assert!(outcome.item.is_owned());
    assert_eq!(outcome.item.price_paid(), Some(27.5));
    assert_eq!(outcome.item.purchase_price(), Some(27.5));
    assert_eq!(service.get("a").unwrap(), outcome.item);
}
