//! Contains checks: does an actual value contain an expected shape?
//!
//! [`ContainsModel`] converts the expected shape with its registry, compiles
//! the resulting rule and validates the actual value, reporting every
//! mismatch by location. [`contains`] and [`assert_contains`] do the same
//! with a shared default model.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::convert::{ConversionRegistry, Rule};
use crate::error::{ContainsError, ConversionError};
use crate::schema::{RootSchema, TypeExpr};
use crate::shape::Shape;
use crate::value::Value;

static DEFAULT_MODEL: Lazy<ContainsModel> = Lazy::new(ContainsModel::new);

/// Runs contains checks with a given conversion registry.
///
/// # Example
///
/// ```rust
/// use shapecheck::{ContainsModel, Shape, TypeExpr, Value};
///
/// let model = ContainsModel::new();
/// let expected = Shape::map([("id", Shape::from(TypeExpr::Int))]);
///
/// assert!(model.contains(&Value::map([("id", 7), ("name", 1)]), &expected).is_ok());
///
/// let error = model.contains(&Value::map([("name", 1)]), &expected).unwrap_err();
/// assert_eq!(error.mismatches().unwrap().first().kind, "missing");
/// ```
#[derive(Debug, Default)]
pub struct ContainsModel {
    registry: ConversionRegistry,
}

impl ContainsModel {
    /// Creates a model with the standard registry.
    pub fn new() -> Self {
        Self::with_registry(ConversionRegistry::contains())
    }

    pub fn with_registry(registry: ConversionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ConversionRegistry {
        &self.registry
    }

    pub fn convert_to_field(&self, expected: &Shape) -> Result<Rule, ConversionError> {
        self.registry.convert_to_field(expected)
    }

    pub fn convert_to_type(&self, expected: &Shape) -> Result<TypeExpr, ConversionError> {
        self.registry.convert_to_type(expected)
    }

    /// Compiles an expected shape into a reusable validator.
    pub fn compile(&self, expected: &Shape) -> Result<RootSchema, ConversionError> {
        self.registry
            .convert(expected)
            .map(|rule| rule.root_schema())
    }

    /// Checks that `actual` contains `expected`.
    ///
    /// # Errors
    ///
    /// - `ContainsError::Conversion` if `expected` cannot be converted
    /// - `ContainsError::Mismatch` with every mismatch found otherwise
    pub fn contains(&self, actual: &Value, expected: &Shape) -> Result<(), ContainsError> {
        let schema = self.compile(expected)?;
        schema.check(actual).map(|_| ()).map_err(|errors| {
            debug!(errors = errors.len(), "actual value does not contain expected shape");
            ContainsError::Mismatch(errors)
        })
    }
}

/// Checks that `actual` contains `expected`, using the default model.
///
/// # Example
///
/// ```rust
/// use shapecheck::{contains, Shape, Value};
/// use serde_json::json;
///
/// assert!(contains(json!({"a": 1, "b": 2}), json!({"a": 1})).is_ok());
/// assert!(contains(json!({"a": 1}), json!({"a": 1, "b": 2})).is_err());
/// assert!(contains(Value::Bool(true), Shape::from(1)).is_err());
/// ```
pub fn contains(actual: impl Into<Value>, expected: impl Into<Shape>) -> Result<(), ContainsError> {
    DEFAULT_MODEL.contains(&actual.into(), &expected.into())
}

/// Asserts that `actual` contains `expected`, using the default model.
///
/// # Panics
///
/// Panics with the full mismatch report if `actual` does not contain
/// `expected`, and with the conversion error if `expected` is malformed.
///
/// # Example
///
/// ```rust
/// use shapecheck::{assert_contains, Shape, TypeExpr, Value};
///
/// assert_contains(
///     Value::map([("a", Value::from("3")), ("b", Value::from(3))]),
///     Shape::map([("a", Shape::from("3")), ("b", Shape::from(TypeExpr::Int))]),
/// );
/// ```
#[track_caller]
pub fn assert_contains(actual: impl Into<Value>, expected: impl Into<Shape>) {
    match contains(actual, expected) {
        Ok(()) => {}
        Err(ContainsError::Mismatch(errors)) => {
            panic!("actual value does not contain expected shape\n{}", errors)
        }
        Err(ContainsError::Conversion(error)) => panic!("{}", error),
    }
}
