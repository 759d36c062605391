//! The data model for expected shapes.
//!
//! A [`Shape`] is what the user writes down to describe a matching value. It
//! mixes plain values (matched exactly), type expressions (matched by type),
//! wildcards, type generators and nested lists and mappings of all of these.

use std::fmt::{self, Display};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::generators::TypeGenerator;
use crate::schema::TypeExpr;
use crate::value::{EnumMember, ObjectValue, Value};

/// An expected shape.
///
/// | shape | matches |
/// |---|---|
/// | `Value(Null)` | only `None`; an absent field is fine |
/// | `Ellipsis` | any value, which must be present |
/// | `Type(TypeExpr::Any)` | any value, or nothing at all |
/// | `Value(scalar)` | exactly this scalar, of exactly its type |
/// | `Value(date / time / object)` | a value equal to this constant |
/// | `Type(t)` | any value of type `t` |
/// | `Generator(g)` | whatever the generator's check accepts |
/// | `List(..)` / `Value(List)` | a list of exactly this length, element-wise |
/// | `Dict(..)` / `Value(Map)` | a mapping containing at least these keys |
///
/// # Example
///
/// ```rust
/// use shapecheck::{Shape, TypeExpr};
///
/// let expected = Shape::map([
///     ("a", Shape::from("3")),
///     ("c", Shape::list([Shape::map([("d", Shape::from(TypeExpr::Int))])])),
///     ("e", Shape::map([("b", Shape::something()), ("e", Shape::anything())])),
/// ]);
///
/// assert_eq!(
///     expected.to_string(),
///     "{'a': '3', 'c': [{'d': int}], 'e': {'b': Ellipsis, 'e': Any}}"
/// );
/// ```
#[derive(Debug, Clone)]
pub enum Shape {
    Value(Value),
    Ellipsis,
    Type(TypeExpr),
    Generator(Arc<dyn TypeGenerator>),
    List(Vec<Shape>),
    Dict(Vec<(Value, Shape)>),
}

impl Shape {
    /// Only `None` is accepted, and the field may be absent.
    pub fn nothing() -> Self {
        Shape::Value(Value::Null)
    }

    /// Any value is accepted, but it must be present.
    pub fn something() -> Self {
        Shape::Ellipsis
    }

    /// Any value is accepted, and the field may be absent.
    pub fn anything() -> Self {
        Shape::Type(TypeExpr::Any)
    }

    /// A mapping shape from `(key, shape)` pairs, in the given order.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Shape>,
    {
        Shape::Dict(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// A sequence shape, one element shape per position.
    pub fn list<T: Into<Shape>>(items: impl IntoIterator<Item = T>) -> Self {
        Shape::List(items.into_iter().map(Into::into).collect())
    }

    /// A shape checked by a custom type generator.
    pub fn generator(generator: impl TypeGenerator + 'static) -> Self {
        Shape::Generator(Arc::new(generator))
    }

    /// Returns a structural fingerprint of the shape for memoisation.
    ///
    /// Shapes carrying generators or custom validators have no fingerprint:
    /// their behaviour is not visible in their structure.
    pub fn cache_key(&self) -> Option<String> {
        if self.is_structural() {
            Some(format!("{:?}", self))
        } else {
            None
        }
    }

    fn is_structural(&self) -> bool {
        match self {
            Shape::Value(_) | Shape::Ellipsis => true,
            Shape::Type(type_expr) => type_expr.is_structural(),
            Shape::Generator(_) => false,
            Shape::List(items) => items.iter().all(Shape::is_structural),
            Shape::Dict(entries) => entries.iter().all(|(_, shape)| shape.is_structural()),
        }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Value(value) => write!(f, "{}", value),
            Shape::Ellipsis => f.write_str("Ellipsis"),
            Shape::Type(type_expr) => write!(f, "{}", type_expr),
            Shape::Generator(generator) => write!(f, "{:?}", generator),
            Shape::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Shape::Dict(entries) => {
                f.write_str("{")?;
                for (i, (key, shape)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, shape)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<Value> for Shape {
    fn from(value: Value) -> Self {
        Shape::Value(value)
    }
}

impl From<TypeExpr> for Shape {
    fn from(type_expr: TypeExpr) -> Self {
        Shape::Type(type_expr)
    }
}

impl From<Vec<Shape>> for Shape {
    fn from(items: Vec<Shape>) -> Self {
        Shape::List(items)
    }
}

impl From<Arc<dyn TypeGenerator>> for Shape {
    fn from(generator: Arc<dyn TypeGenerator>) -> Self {
        Shape::Generator(generator)
    }
}

macro_rules! shape_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Shape {
                fn from(value: $ty) -> Self {
                    Shape::Value(Value::from(value))
                }
            }
        )*
    };
}

shape_from_value!(
    bool,
    i64,
    i32,
    u32,
    f64,
    &str,
    String,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    EnumMember,
    ObjectValue,
);

impl From<serde_json::Value> for Shape {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Array(items) => Shape::List(items.into_iter().map(Shape::from).collect()),
            Json::Object(entries) => Shape::Dict(
                entries
                    .into_iter()
                    .map(|(k, v)| (Value::Str(k), Shape::from(v)))
                    .collect(),
            ),
            scalar => Shape::Value(Value::from(scalar)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wildcard_constructors() {
        assert!(matches!(Shape::nothing(), Shape::Value(Value::Null)));
        assert!(matches!(Shape::something(), Shape::Ellipsis));
        assert!(matches!(Shape::anything(), Shape::Type(TypeExpr::Any)));
    }

    #[test]
    fn test_from_json_builds_nested_shapes() {
        let shape = Shape::from(json!({"a": "3", "c": [{"e": null}]}));

        let Shape::Dict(entries) = shape else {
            panic!("expected a mapping shape");
        };
        assert_eq!(entries[0].0, Value::from("a"));
        assert!(matches!(entries[1].1, Shape::List(_)));
    }

    #[test]
    fn test_display_is_python_like() {
        let shape = Shape::map([
            ("a", Shape::from(TypeExpr::Str)),
            ("b", Shape::list([Shape::from(1), Shape::nothing()])),
        ]);
        assert_eq!(shape.to_string(), "{'a': str, 'b': [1, None]}");
    }

    #[test]
    fn test_cache_key_distinguishes_types_and_values() {
        let int_type = Shape::from(TypeExpr::Int).cache_key();
        let one = Shape::from(1).cache_key();
        let one_float = Shape::from(1.0).cache_key();
        let truth = Shape::from(true).cache_key();

        assert!(int_type.is_some());
        assert_ne!(int_type, one);
        assert_ne!(one, one_float);
        assert_ne!(one, truth);
        assert_eq!(one, Shape::from(1).cache_key());
    }
}
