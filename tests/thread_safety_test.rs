//! Tests for sharing a contains model across threads.

use std::sync::Arc;
use std::thread;

use serde_json::json;
use shapecheck::{ContainsModel, Shape, TypeExpr, Value};

fn expected() -> Shape {
    Shape::map([
        ("id", Shape::from(TypeExpr::Int)),
        ("tags", Shape::list([Shape::from("a"), Shape::something()])),
    ])
}

#[test]
fn test_model_is_shared_across_threads() {
    let model = Arc::new(ContainsModel::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let model = Arc::clone(&model);
            thread::spawn(move || {
                let actual = Value::from(json!({"id": i, "tags": ["a", i]}));
                model.contains(&actual, &expected()).is_ok()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert!(model.registry().cached_len() > 0);
}

#[test]
fn test_failures_are_independent_per_thread() {
    let model = Arc::new(ContainsModel::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let model = Arc::clone(&model);
            thread::spawn(move || {
                let actual = Value::from(json!({"id": "x", "tags": ["b", "b"]}));
                let error = model.contains(&actual, &expected()).unwrap_err();
                (i, error.mismatches().map(|errors| errors.len()))
            })
        })
        .collect();

    for handle in handles {
        let (_, count) = handle.join().unwrap();
        assert_eq!(count, Some(2));
    }
}

#[test]
fn test_compiled_schema_is_shared_across_threads() {
    let schema = Arc::new(ContainsModel::new().compile(&expected()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let actual = Value::from(json!({"id": i, "tags": ["a", null]}));
                schema.check(&actual).is_ok()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
