//! Type generators: custom checks usable as expected shapes.
//!
//! A [`TypeGenerator`] contributes a data type, which the actual value is
//! validated against first, and a check that runs on the validated value.
//! Put one in an expected shape with [`Shape::generator`](crate::Shape::generator).

mod collections;

pub use collections::UnorderedLiteralCollection;

use std::fmt::Debug;
use std::sync::Arc;

use crate::schema::{AfterValidator, TypeExpr};
use crate::value::Value;

/// A custom check with an underlying data type.
///
/// # Example
///
/// ```rust
/// use shapecheck::{assert_contains, Shape, TypeExpr, TypeGenerator, Value};
///
/// #[derive(Debug)]
/// struct NonEmptyText;
///
/// impl TypeGenerator for NonEmptyText {
///     fn data_type(&self) -> TypeExpr {
///         TypeExpr::Str
///     }
///
///     fn check(&self, value: &Value) -> Result<(), String> {
///         match value {
///             Value::Str(s) if !s.is_empty() => Ok(()),
///             _ => Err("text is empty".to_string()),
///         }
///     }
/// }
///
/// assert_contains(
///     Value::map([("name", "Ann")]),
///     Shape::map([("name", Shape::generator(NonEmptyText))]),
/// );
/// ```
pub trait TypeGenerator: Debug + Send + Sync {
    /// The type the actual value is validated against before `check`.
    fn data_type(&self) -> TypeExpr;

    /// Checks an already validated value, returning a message on failure.
    fn check(&self, value: &Value) -> Result<(), String>;

    /// A short name for the generated validator.
    fn name(&self) -> &str {
        "type_generator"
    }
}

/// Builds the annotated type a generator stands for.
pub fn generated_type(generator: &Arc<dyn TypeGenerator>) -> TypeExpr {
    let check = Arc::clone(generator);
    let validator = AfterValidator::new(generator.name(), move |value| {
        check.check(value).map(|()| value.clone())
    });
    TypeExpr::annotated(generator.data_type(), [validator])
}
