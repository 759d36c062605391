//! Root schemas: a single rule applied to a whole value.

use stillwater::Validation;

use super::traits::SchemaLike;
use super::type_expr::TypeExpr;
use crate::error::ValidationErrors;
use crate::path::Location;
use crate::value::Value;

/// A compiled validator for a whole actual value.
///
/// Errors are located relative to the value's root, so a mismatch in the
/// first element of field `c` is reported at `c[0]`.
///
/// # Example
///
/// ```rust
/// use shapecheck::{RootSchema, TypeExpr, Value};
///
/// let schema = RootSchema::new(TypeExpr::list(TypeExpr::Int));
///
/// assert!(schema.check(&Value::list([1, 2])).is_ok());
///
/// let errors = schema.check(&Value::list(["x"])).unwrap_err();
/// assert_eq!(errors.first().location.to_string(), "[0]");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RootSchema {
    type_expr: TypeExpr,
}

impl RootSchema {
    pub fn new(type_expr: TypeExpr) -> Self {
        Self { type_expr }
    }

    pub fn type_expr(&self) -> &TypeExpr {
        &self.type_expr
    }

    /// Validates a value from the root location.
    pub fn check(&self, value: &Value) -> Result<Value, ValidationErrors> {
        self.type_expr.validate(value, &Location::root()).into_result()
    }
}

impl SchemaLike for RootSchema {
    type Output = Value;

    fn validate(&self, value: &Value, location: &Location) -> Validation<Value, ValidationErrors> {
        self.type_expr.validate(value, location)
    }

    fn validate_to_value(
        &self,
        value: &Value,
        location: &Location,
    ) -> Validation<Value, ValidationErrors> {
        self.type_expr.validate(value, location)
    }
}
