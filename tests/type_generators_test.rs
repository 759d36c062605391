//! Tests for unordered literal collections used as expected shapes.

use serde_json::json;
use shapecheck::{contains, ContainsError, Shape, TypeExpr, UnorderedLiteralCollection, Value};

fn message(result: Result<(), ContainsError>) -> String {
    match result {
        Err(ContainsError::Mismatch(errors)) => errors.first().message.clone(),
        other => panic!("expected a mismatch, got {:?}", other),
    }
}

fn collection() -> UnorderedLiteralCollection {
    UnorderedLiteralCollection::new([1, 2])
}

#[test]
fn test_order_does_not_matter() {
    assert!(contains(json!([2, 1]), collection()).is_ok());
    assert!(contains(json!([1, 2]), collection()).is_ok());
}

#[test]
fn test_repeats_policy() {
    assert_eq!(
        message(contains(json!([1, 2, 2]), collection())),
        "Value error, repeating items found: {2}"
    );
    assert!(contains(json!([1, 2, 2]), collection().check_repeats(false)).is_ok());
}

#[test]
fn test_missing_items_are_always_reported() {
    let lenient = collection().check_extra(false).check_repeats(false);
    assert_eq!(
        message(contains(json!([1]), lenient)),
        "Value error, items missing: {2}"
    );
    assert_eq!(
        message(contains(json!([1]), collection())),
        "Value error, items missing: {2}"
    );
}

#[test]
fn test_extra_policy() {
    assert_eq!(
        message(contains(json!([1, 2, 3]), collection())),
        "Value error, extra items found: {3}"
    );
    assert!(contains(json!([1, 2, 3]), collection().check_extra(false)).is_ok());
}

#[test]
fn test_missing_is_reported_before_extra_and_repeats() {
    assert_eq!(
        message(contains(json!([1, 1, 3]), collection())),
        "Value error, items missing: {2}"
    );
}

#[test]
fn test_string_items_render_quoted() {
    let expected = Shape::map([("tags", UnorderedLiteralCollection::new(["hey", "you"]))]);
    let result = contains(json!({"tags": ["you"]}), expected);

    let Err(ContainsError::Mismatch(errors)) = result else {
        panic!("expected a mismatch");
    };
    let error = errors.first();
    assert_eq!(error.location.to_string(), "tags");
    assert_eq!(error.kind, "value_error");
    assert_eq!(error.message, "Value error, items missing: {'hey'}");
}

#[test]
fn test_non_literal_items_are_reported_by_index() {
    let result = contains(json!([1, 2, [3]]), collection());
    let Err(ContainsError::Mismatch(errors)) = result else {
        panic!("expected a mismatch");
    };
    assert!(errors.iter().all(|error| error.location.to_string().starts_with("[2].")));
    assert_eq!(errors.len(), 6);
}

#[test]
fn test_unhashable_items_with_any_item_type() {
    let result = contains(json!([1, 2, [3]]), collection().item_type(TypeExpr::Any));
    assert_eq!(message(result), "Value error, unhashable items found: {[3]}");
}

#[test]
fn test_numbers_compare_by_value() {
    assert!(contains(json!([true, 2]), collection()).is_ok());
    assert!(contains(json!([1.0, 2]), collection()).is_ok());
    assert_eq!(
        message(contains(json!([1, true, 2]), collection())),
        "Value error, repeating items found: {True}"
    );
}

#[test]
fn test_non_list_fails_data_type() {
    let result = contains(json!({"a": 1}), collection());
    let Err(ContainsError::Mismatch(errors)) = result else {
        panic!("expected a mismatch");
    };
    assert_eq!(errors.first().kind, "list_type");
}

#[test]
fn test_item_type_coerces_before_checking() {
    let ints = collection().item_type(TypeExpr::Int);
    assert!(contains(Value::list(["1", "2"]), ints).is_ok());
}
