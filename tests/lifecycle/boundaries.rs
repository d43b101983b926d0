use hangar::{CollectionItem, Direction, OrderInput, ServiceError, Status};

use crate::support::{now, service_with};

#[test]
fn neutral_backward_is_owned() {
    let service = service_with(vec![CollectionItem::new("a")]);

    let outcome = service.cycle_status("a", Direction::Backward).unwrap();

    assert_eq!(outcome.item.status(), Status::Owned);
    assert_eq!(outcome.message, "Marked as owned");
}

#[test]
fn placing_order_without_any_price_leaves_price_empty() {
    let service = service_with(vec![CollectionItem::new("a").wishlisted(1)]);

    let outcome = service.toggle_on_order("a", &OrderInput::place()).unwrap();

    assert!(outcome.item.is_on_order());
    assert_eq!(outcome.item.price_paid(), None);
    assert_eq!(outcome.item.order_date(), Some(now()));
}

#[test]
fn placing_order_ignores_retail_price() {
    let service = service_with(vec![CollectionItem::new("a")
        .with_retail_price(19.99)
        .wishlisted(1)]);

    let outcome = service.toggle_on_order("a", &OrderInput::place()).unwrap();

    assert!(outcome.item.is_on_order());
    assert_eq!(outcome.item.price_paid(), None);
    assert_eq!(outcome.item.retail_price(), Some(19.99));
    assert_eq!(service.get("a").unwrap().price_paid(), None);
}

#[test]
fn explicit_order_details_win_over_defaults() {
    let service = service_with(vec![CollectionItem::new("a").with_retail_price(50.0)]);
    let date = hangar::lifecycle::parse_order_date("2024-03-15T09:30:00Z").unwrap();

    let input = OrderInput::place().with_price_paid(41.0).with_order_date(date);
    let outcome = service.toggle_on_order("a", &input).unwrap();

    assert_eq!(outcome.item.price_paid(), Some(41.0));
    assert_eq!(outcome.item.order_date(), Some(date));
}

#[test]
fn adding_to_wishlist_clears_owned() {
    let service = service_with(vec![CollectionItem::new("a").acquired(None)]);

    let outcome = service.toggle_wishlist("a").unwrap();

    assert_eq!(outcome.item.status(), Status::Wishlist);
    assert!(!outcome.item.is_owned());
    assert_eq!(outcome.item.active_flags(), 1);
}

#[test]
fn first_wishlist_entry_gets_priority_one() {
    let service = service_with(vec![CollectionItem::new("a")]);

    let outcome = service.toggle_wishlist("a").unwrap();

    assert_eq!(outcome.item.wishlist_priority(), Some(1));
}

#[test]
fn unknown_item_is_not_found() {
    let service = service_with(vec![]);

    let err = service.cycle_status("ghost", Direction::Forward).unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(ref id) if id == "ghost"));
    assert_eq!(err.status_code(), 404);
}

#[test]
fn negative_price_is_rejected_before_loading() {
    let service = service_with(vec![CollectionItem::new("a").wishlisted(1)]);

    let err = service
        .toggle_on_order("a", &OrderInput::place().with_price_paid(-1.0))
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidArgument(_)));
    assert!(service.get("a").unwrap().is_wishlisted());
}

#[test]
fn receiving_an_item_not_on_order_fails() {
    let service = service_with(vec![CollectionItem::new("a").wishlisted(1)]);

    let err = service.mark_received("a").unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert_eq!(service.get("a").unwrap().wishlist_priority(), Some(1));
}
