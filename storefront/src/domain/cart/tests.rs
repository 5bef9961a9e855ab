//! Unit tests for cart state and its invariants.

use rstest::rstest;
use rust_decimal::Decimal;

use super::{AdjustOutcome, Cart, CartLineItem, CartValidationError, DishId, Quantity};
use crate::domain::catalog::{DishDraft, DishRecord};

fn dish(id: u32, name: &str, price: i64) -> DishRecord {
    DishRecord::new(DishDraft {
        id: DishId::new(id).expect("positive id"),
        name: name.to_owned(),
        description: String::new(),
        category: "Rolls".to_owned(),
        price: Decimal::from(price),
        image: format!("https://cdn.example/{id}.jpg"),
        ingredients: Vec::new(),
    })
    .expect("valid dish")
}

fn qty(raw: u32) -> Quantity {
    Quantity::new(raw).expect("positive quantity")
}

fn id(raw: u32) -> DishId {
    DishId::new(raw).expect("positive id")
}

#[test]
fn adding_the_same_dish_merges_into_one_line_item() {
    let mut cart = Cart::new();
    let philadelphia = dish(1, "Philadelphia", 450);

    cart.add_or_increment(&philadelphia, qty(2));
    cart.add_or_increment(&philadelphia, qty(3));

    assert_eq!(cart.len(), 1);
    let item = cart.find(id(1)).expect("line item exists");
    assert_eq!(item.quantity(), qty(5));
}

#[test]
fn quantities_sum_per_dish_across_interleaved_adds() {
    let mut cart = Cart::new();
    let philadelphia = dish(1, "Philadelphia", 450);
    let california = dish(2, "California", 380);

    cart.add_or_increment(&philadelphia, qty(1));
    cart.add_or_increment(&california, qty(2));
    cart.add_or_increment(&philadelphia, qty(4));

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.find(id(1)).map(CartLineItem::quantity), Some(qty(5)));
    assert_eq!(cart.find(id(2)).map(CartLineItem::quantity), Some(qty(2)));
    assert_eq!(cart.total_quantity(), 7);
}

#[test]
fn new_dishes_append_at_the_end_in_insertion_order() {
    let mut cart = Cart::new();
    cart.add_or_increment(&dish(3, "Dragon", 520), qty(1));
    cart.add_or_increment(&dish(1, "Philadelphia", 450), qty(1));

    let names: Vec<&str> = cart.items().iter().map(CartLineItem::name).collect();
    assert_eq!(names, vec!["Dragon", "Philadelphia"]);
}

#[test]
fn snapshots_are_self_contained() {
    let mut cart = Cart::new();
    cart.add_or_increment(&dish(1, "Philadelphia", 450), qty(2));

    let item = cart.find(id(1)).expect("line item exists");
    assert_eq!(item.name(), "Philadelphia");
    assert_eq!(item.price(), Decimal::from(450));
    assert_eq!(item.image(), "https://cdn.example/1.jpg");
    assert_eq!(item.line_total(), Decimal::from(900));
}

#[rstest]
#[case(-1)]
#[case(-5)]
fn adjusting_to_zero_or_below_removes_the_line(#[case] delta: i32) {
    let mut cart = Cart::new();
    cart.add_or_increment(&dish(1, "Philadelphia", 450), qty(1));
    cart.add_or_increment(&dish(2, "California", 380), qty(1));
    cart.add_or_increment(&dish(3, "Dragon", 520), qty(1));

    let outcome = cart.adjust(id(2), delta).expect("dish 2 is present");
    let AdjustOutcome::Removed(removed) = outcome else {
        panic!("expected removal, got {outcome:?}");
    };
    assert_eq!(removed.dish_id(), id(2));

    // Exactly one line gone; the tail shifted down to close the gap.
    assert_eq!(cart.len(), 2);
    let ids: Vec<DishId> = cart.items().iter().map(CartLineItem::dish_id).collect();
    assert_eq!(ids, vec![id(1), id(3)]);
}

#[test]
fn adjusting_above_zero_updates_the_quantity_in_place() {
    let mut cart = Cart::new();
    cart.add_or_increment(&dish(1, "Philadelphia", 450), qty(2));

    let outcome = cart.adjust(id(1), 1).expect("dish 1 is present");
    assert_eq!(outcome, AdjustOutcome::Updated(qty(3)));
    assert_eq!(cart.len(), 1);
}

#[test]
fn adjusting_an_absent_dish_reports_none() {
    let mut cart = Cart::new();
    assert!(cart.adjust(id(9), 1).is_none());
}

#[test]
fn removing_a_line_compacts_the_sequence() {
    let mut cart = Cart::new();
    cart.add_or_increment(&dish(1, "Philadelphia", 450), qty(1));
    cart.add_or_increment(&dish(2, "California", 380), qty(1));

    let removed = cart.remove(id(1)).expect("dish 1 is present");
    assert_eq!(removed.name(), "Philadelphia");
    assert_eq!(cart.len(), 1);
    assert!(cart.remove(id(1)).is_none());
}

#[test]
fn subtotal_sums_price_times_quantity() {
    let mut cart = Cart::new();
    cart.add_or_increment(&dish(1, "Philadelphia", 450), qty(2));
    cart.add_or_increment(&dish(2, "California", 380), qty(1));

    assert_eq!(cart.subtotal(), Decimal::from(1280));
}

#[test]
fn from_items_merges_duplicate_dish_ids() {
    let mut source = Cart::new();
    source.add_or_increment(&dish(1, "Philadelphia", 450), qty(2));
    let duplicate = CartLineItem::snapshot(&dish(1, "Philadelphia", 450), qty(3));

    let mut items = source.items().to_vec();
    items.push(duplicate);
    let merged = Cart::from_items(items);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged.total_quantity(), 5);
}

#[test]
fn serializes_to_the_persisted_array_layout() {
    let mut cart = Cart::new();
    cart.add_or_increment(&dish(1, "Philadelphia", 450), qty(2));

    let value = serde_json::to_value(&cart).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!([{
            "dishId": 1,
            "name": "Philadelphia",
            "price": 450.0,
            "quantity": 2,
            "image": "https://cdn.example/1.jpg",
        }])
    );
}

#[test]
fn deserialization_rejects_zero_quantities() {
    let json = r#"[{"dishId": 1, "name": "Philadelphia", "price": 450,
                    "quantity": 0, "image": ""}]"#;
    assert!(serde_json::from_str::<Cart>(json).is_err());
}

#[test]
fn deserialization_rejects_zero_dish_ids() {
    let json = r#"[{"dishId": 0, "name": "Philadelphia", "price": 450,
                    "quantity": 1, "image": ""}]"#;
    assert!(serde_json::from_str::<Cart>(json).is_err());
}

#[test]
fn validation_errors_name_the_broken_invariant() {
    assert_eq!(
        DishId::new(0).expect_err("zero id rejected"),
        CartValidationError::ZeroDishId
    );
    assert_eq!(
        Quantity::new(0).expect_err("zero quantity rejected"),
        CartValidationError::ZeroQuantity
    );
}
