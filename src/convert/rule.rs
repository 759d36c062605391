//! Rules: the compiled form of an expected shape.

use crate::schema::{FieldInfo, RootSchema, TypeExpr};
use crate::value::Value;

/// A type expression paired with field metadata.
///
/// The type expression decides which values match; the field metadata
/// decides what happens when a mapping lacks the field altogether.
///
/// # Example
///
/// ```rust
/// use shapecheck::{FieldInfo, Rule, TypeExpr, Value};
///
/// let rule = Rule::new(TypeExpr::None, FieldInfo::optional(Value::Null));
/// assert!(!rule.is_required());
/// assert_eq!(rule.default_value(), Some(&Value::Null));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    type_expr: TypeExpr,
    info: FieldInfo,
}

impl Rule {
    pub fn new(type_expr: TypeExpr, info: FieldInfo) -> Self {
        Self { type_expr, info }
    }

    /// A rule whose field must be present.
    pub fn required(type_expr: TypeExpr) -> Self {
        Self::new(type_expr, FieldInfo::required())
    }

    pub fn type_expr(&self) -> &TypeExpr {
        &self.type_expr
    }

    pub fn info(&self) -> &FieldInfo {
        &self.info
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.info.default_value()
    }

    pub fn alias(&self) -> Option<&str> {
        self.info.alias()
    }

    pub fn is_required(&self) -> bool {
        self.info.is_required()
    }

    /// Returns the rule read under `alias` in mappings.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.info = self.info.with_alias(alias);
        self
    }

    /// Drops the field metadata.
    pub fn into_type_expr(self) -> TypeExpr {
        self.type_expr
    }

    pub fn into_parts(self) -> (TypeExpr, FieldInfo) {
        (self.type_expr, self.info)
    }

    /// Compiles the rule into a validator for a whole value.
    pub fn root_schema(&self) -> RootSchema {
        RootSchema::new(self.type_expr.clone())
    }
}
