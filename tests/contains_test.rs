//! End-to-end tests for contains checks.

use shapecheck::{
    assert_contains, contains, ContainsError, EnumType, Location, ObjectValue, PathSegment, Shape,
    TypeExpr, ValidationErrors, Value,
};
use serde_json::json;

fn expected() -> Shape {
    Shape::map([
        ("a", Shape::from("3")),
        ("b", Shape::from(3)),
        (
            "c",
            Shape::list([Shape::map([
                ("d", Shape::from(TypeExpr::Int)),
                ("e", Shape::nothing()),
            ])]),
        ),
        (
            "e",
            Shape::map([
                ("g", Shape::from(TypeExpr::Str)),
                ("b", Shape::something()),
                ("e", Shape::anything()),
            ]),
        ),
    ])
}

fn unwrap_mismatch(result: Result<(), ContainsError>) -> ValidationErrors {
    match result {
        Err(ContainsError::Mismatch(errors)) => errors,
        other => panic!("expected a mismatch, got {:?}", other),
    }
}

fn loc(segments: &[&str]) -> Location {
    segments
        .iter()
        .map(|segment| match segment.parse::<usize>() {
            Ok(idx) => PathSegment::index(idx),
            Err(_) => PathSegment::field(*segment),
        })
        .collect()
}

#[test]
fn test_nested_shape_is_contained() {
    let actual = Value::map([
        ("a", Value::from("3")),
        ("b", Value::from(3)),
        ("c", Value::list([Value::map([("d", 4)])])),
        (
            "e",
            Value::map([
                ("g", Value::from("ger")),
                ("b", Value::from(ObjectValue::new("object"))),
            ]),
        ),
    ]);

    assert_contains(actual, expected());
}

#[test]
fn test_every_mismatch_is_reported() {
    let actual = Value::map([
        ("a", Value::from("5")),
        ("b", Value::from(6)),
        (
            "c",
            Value::list([Value::map([("d", Value::from("4")), ("e", Value::from(4))])]),
        ),
        ("e", Value::map([("g", 5)])),
    ]);

    let errors = unwrap_mismatch(contains(actual, expected()));
    let report = errors.report();

    assert_eq!(report.len(), 5);
    assert_eq!(errors.len(), 5);

    assert_eq!(report[&loc(&["a"])][0].kind, "literal_error");
    assert_eq!(report[&loc(&["a"])][0].message, "Input should be '3'");
    assert_eq!(report[&loc(&["b"])][0].kind, "literal_error");
    assert_eq!(report[&loc(&["b"])][0].message, "Input should be 3");
    assert_eq!(report[&loc(&["c", "0", "e"])][0].kind, "none_required");
    assert_eq!(report[&loc(&["c", "0", "e"])][0].message, "Input should be None");
    assert_eq!(report[&loc(&["e", "g"])][0].kind, "string_type");
    assert_eq!(report[&loc(&["e", "g"])][0].message, "Input should be a valid string");
    assert_eq!(report[&loc(&["e", "b"])][0].kind, "missing");
    assert_eq!(report[&loc(&["e", "b"])][0].message, "Field required");
}

#[test]
fn test_literals_are_type_exact() {
    let samples = [
        Value::Bool(true),
        Value::Int(1),
        Value::Float(1.0),
        Value::from("1"),
        Value::bytes("1"),
    ];

    for (i, actual) in samples.iter().enumerate() {
        for (j, expected) in samples.iter().enumerate() {
            let result = contains(actual.clone(), Shape::from(expected.clone()));
            assert_eq!(
                result.is_ok(),
                i == j,
                "contains({}, {}) should be {}",
                actual,
                expected,
                i == j
            );
        }
    }
}

#[test]
fn test_true_does_not_contain_one() {
    assert!(contains(Value::Bool(true), Shape::from(1)).is_err());
    assert!(contains(Value::Int(1), Shape::from(true)).is_err());
}

#[test]
fn test_extra_keys_are_ignored() {
    assert!(contains(json!({"a": 1, "b": 2}), json!({"a": 1})).is_ok());
    assert!(contains(json!({"x": {"a": 1, "z": 0}}), json!({"x": {"a": 1}})).is_ok());
}

#[test]
fn test_missing_required_field() {
    let expected = Shape::map([("a", Shape::from(1)), ("b", Shape::from(TypeExpr::Int))]);
    let errors = unwrap_mismatch(contains(json!({"a": 1}), expected));

    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().location, loc(&["b"]));
    assert_eq!(errors.first().kind, "missing");
}

#[test]
fn test_sequences_need_exact_length() {
    let one = Shape::list([Shape::from(TypeExpr::Int)]);
    let two = Shape::list([Shape::from(TypeExpr::Int), Shape::from(TypeExpr::Int)]);

    let errors = unwrap_mismatch(contains(json!([1, 2]), one));
    assert_eq!(errors.first().kind, "too_long");
    assert_eq!(errors.first().location, loc(&["1"]));

    assert!(contains(json!([1, 2]), two.clone()).is_ok());

    let errors = unwrap_mismatch(contains(json!([1]), two));
    assert_eq!(errors.first().kind, "missing");
}

#[test]
fn test_list_values_are_sequence_shapes() {
    assert!(contains(json!([1, "a"]), Value::from(json!([1, "a"]))).is_ok());
    assert!(contains(json!(["a", 1]), Value::from(json!([1, "a"]))).is_err());
}

#[test]
fn test_wildcards() {
    let nothing = Shape::map([("x", Shape::nothing())]);
    assert!(contains(json!({}), nothing.clone()).is_ok());
    assert!(contains(json!({"x": null}), nothing.clone()).is_ok());
    assert!(contains(json!({"x": 0}), nothing).is_err());

    let something = Shape::map([("x", Shape::something())]);
    assert!(contains(json!({"x": null}), something.clone()).is_ok());
    assert!(contains(json!({}), something).is_err());

    let anything = Shape::map([("x", Shape::anything())]);
    assert!(contains(json!({}), anything.clone()).is_ok());
    assert!(contains(json!({"x": [1, {"y": 2}]}), anything).is_ok());
}

#[test]
fn test_none_at_root_requires_null() {
    assert!(contains(Value::Null, Shape::nothing()).is_ok());
    let errors = unwrap_mismatch(contains(Value::Int(0), Shape::nothing()));
    assert!(errors.first().location.is_root());
}

#[test]
fn test_types_coerce_laxly() {
    let expected = Shape::map([("n", Shape::from(TypeExpr::Int))]);
    assert!(contains(json!({"n": "4"}), expected.clone()).is_ok());
    assert!(contains(json!({"n": 4.0}), expected.clone()).is_ok());
    assert!(contains(json!({"n": "four"}), expected).is_err());
}

#[test]
fn test_objects_are_read_by_attribute() {
    let user = ObjectValue::new("User")
        .with_attribute("name", "Ann")
        .with_attribute("age", 31);

    assert_contains(user.clone(), json!({"name": "Ann"}));
    assert!(contains(user, json!({"name": "Bob"})).is_err());
}

#[test]
fn test_enum_members_are_literals() {
    let color = EnumType::new("Color", [("RED", 1), ("GREEN", 2)]);
    let red = color.member("RED").unwrap();

    assert!(contains(red.clone(), Shape::from(red.clone())).is_ok());
    assert!(contains(Value::Int(1), Shape::from(red.clone())).is_err());
    assert!(contains(red, Shape::from(TypeExpr::Enum(color))).is_ok());
}

#[test]
fn test_mismatch_report_exports_json() {
    let errors = unwrap_mismatch(contains(json!({"a": "x"}), json!({"a": "y"})));
    let records = errors.to_json();

    assert_eq!(records[0]["loc"], json!(["a"]));
    assert_eq!(records[0]["type"], "literal_error");
    assert_eq!(records[0]["msg"], "Input should be 'y'");
}

#[test]
fn test_conversion_error_for_malformed_shape() {
    let result = contains(json!({"a": 1}), Shape::map([("a", Shape::from(f64::NAN))]));
    let Err(ContainsError::Conversion(error)) = result else {
        panic!("expected a conversion error");
    };
    assert_eq!(error.location, loc(&["a"]));
}

#[test]
#[should_panic(expected = "Validation failed with 1 error(s)")]
fn test_assert_contains_renders_report() {
    assert_contains(json!({"a": 1}), json!({"a": 1, "b": 2}));
}
