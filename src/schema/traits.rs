//! Traits for schema polymorphism.
//!
//! [`SchemaLike`] is implemented by every compiled validator: type
//! expressions, models and root schemas. It is the boundary between the
//! conversion engine, which only builds schemas, and validation, which only
//! runs them.

use stillwater::Validation;

use crate::error::ValidationErrors;
use crate::path::Location;
use crate::value::Value;

/// A compiled validator for actual values.
///
/// Implementations accumulate every mismatch they find instead of stopping at
/// the first one, and attach each to the location where it occurred.
///
/// The `Send + Sync` bounds allow schemas to be shared across threads and
/// cached by the conversion registry.
///
/// # Example
///
/// ```rust
/// use shapecheck::{Location, SchemaLike, TypeExpr, Value};
///
/// let schema = TypeExpr::list(TypeExpr::Int);
///
/// let result = schema.validate(&Value::list(["1", "x"]), &Location::root());
/// let errors = result.into_result().unwrap_err();
///
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.first().location, Location::from_index(1));
/// ```
pub trait SchemaLike: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    /// Validates a value against this schema.
    ///
    /// Returns `Validation::Success` with the normalised value on success,
    /// or `Validation::Failure` with accumulated errors on failure.
    fn validate(&self, value: &Value, location: &Location)
        -> Validation<Self::Output, ValidationErrors>;

    /// Validates a value and returns the output as a [`Value`].
    fn validate_to_value(&self, value: &Value, location: &Location)
        -> Validation<Value, ValidationErrors>;
}
