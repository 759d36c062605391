//! Model schemas: named sets of typed fields.
//!
//! A [`ModelSchema`] validates mappings and attribute-bearing objects field by
//! field, accumulating every field error. Fields the model does not declare
//! are ignored, which is what gives contains checks their "at least these
//! keys" behaviour.

use indexmap::IndexMap;
use stillwater::Validation;

use super::coerce::mismatch;
use super::traits::SchemaLike;
use super::type_expr::TypeExpr;
use crate::convert::Rule;
use crate::error::{ModelError, ValidationError, ValidationErrors};
use crate::path::Location;
use crate::value::Value;

/// Metadata of a field: its default and the alias it is read under.
///
/// A field without a default is required.
///
/// # Example
///
/// ```rust
/// use shapecheck::{FieldInfo, Value};
///
/// let info = FieldInfo::optional(Value::Null).with_alias("userName");
/// assert!(!info.is_required());
/// assert_eq!(info.alias(), Some("userName"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldInfo {
    default: Option<Value>,
    alias: Option<String>,
}

impl FieldInfo {
    /// A field that must be present.
    pub fn required() -> Self {
        Self::default()
    }

    /// A field that takes `default` when absent.
    pub fn optional(default: impl Into<Value>) -> Self {
        Self {
            default: Some(default.into()),
            alias: None,
        }
    }

    /// Sets the name the field is read under and returns self for chaining.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Definition of a field within a model.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    type_expr: TypeExpr,
    info: FieldInfo,
}

impl FieldDef {
    pub fn type_expr(&self) -> &TypeExpr {
        &self.type_expr
    }

    pub fn info(&self) -> &FieldInfo {
        &self.info
    }
}

/// A schema for mappings and objects with a declared set of fields.
///
/// Field lookup tries the field's alias first, then its name, reading keys
/// from maps and attributes from objects. A missing field takes its default
/// or, if it has none, is reported as `missing` at its own location. All
/// field errors are accumulated rather than short-circuiting.
///
/// # Example
///
/// ```rust
/// use shapecheck::{FieldInfo, Location, ModelSchema, TypeExpr, Value};
///
/// let model = ModelSchema::new("User")
///     .field("name", TypeExpr::Str, FieldInfo::required())
///     .field("age", TypeExpr::Int, FieldInfo::optional(Value::Null));
///
/// let result = model.validate(&Value::map([("name", "Ann"), ("extra", "x")]), &Location::root());
/// let fields = result.into_result().unwrap();
/// assert_eq!(fields["age"], Value::Null);
/// assert!(!fields.contains_key("extra"));
///
/// let missing = model.validate(&Value::map([("age", 3)]), &Location::root());
/// let errors = missing.into_result().unwrap_err();
/// assert_eq!(errors.first().kind, "missing");
/// assert_eq!(errors.first().location, Location::from_field("name"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchema {
    name: String,
    fields: IndexMap<String, FieldDef>,
}

impl ModelSchema {
    /// Creates a model with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Adds a field, replacing any earlier field of the same name.
    pub fn field(mut self, name: impl Into<String>, type_expr: TypeExpr, info: FieldInfo) -> Self {
        self.fields.insert(name.into(), FieldDef { type_expr, info });
        self
    }

    /// Builds a model from `(key, rule)` pairs, keeping their order.
    ///
    /// Every key must be a string and appear once; otherwise no model can be
    /// built from the pairs.
    pub fn try_from_rules(
        name: impl Into<String>,
        rules: impl IntoIterator<Item = (Value, Rule)>,
    ) -> Result<Self, ModelError> {
        let mut model = Self::new(name);
        for (key, rule) in rules {
            let Value::Str(field_name) = key else {
                return Err(ModelError::InvalidFieldName {
                    key: key.to_string(),
                });
            };
            if model.fields.contains_key(&field_name) {
                return Err(ModelError::DuplicateField { name: field_name });
            }
            let (type_expr, info) = rule.into_parts();
            model.fields.insert(field_name, FieldDef { type_expr, info });
        }
        Ok(model)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDef)> {
        self.fields.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates a value against this model.
    ///
    /// Returns the declared fields, defaults filled in, on success.
    pub fn validate(
        &self,
        value: &Value,
        location: &Location,
    ) -> Validation<IndexMap<String, Value>, ValidationErrors> {
        if !value.has_fields() {
            return Validation::Failure(ValidationErrors::single(
                mismatch(
                    location,
                    "model_type",
                    format!(
                        "Input should be a valid dictionary or instance of {}",
                        self.name
                    ),
                    value,
                )
                .with_expected(self.name.clone()),
            ));
        }

        let mut errors = Vec::new();
        let mut validated = IndexMap::with_capacity(self.fields.len());

        for (name, def) in &self.fields {
            let alias = def.info.alias();
            let field_location = location.push_field(alias.unwrap_or(name));
            let found = alias
                .and_then(|alias| value.get_field(alias))
                .or_else(|| value.get_field(name));

            match found {
                Some(field_value) => match def.type_expr.validate(field_value, &field_location) {
                    Validation::Success(v) => {
                        validated.insert(name.clone(), v);
                    }
                    Validation::Failure(e) => errors.extend(e),
                },
                None => match def.info.default_value() {
                    Some(default) => {
                        validated.insert(name.clone(), default.clone());
                    }
                    None => errors.push(
                        ValidationError::new(field_location, "Field required")
                            .with_kind("missing")
                            .with_expected(def.type_expr.to_string()),
                    ),
                },
            }
        }

        ValidationErrors::collect(validated, errors)
    }
}

impl SchemaLike for ModelSchema {
    type Output = IndexMap<String, Value>;

    fn validate(
        &self,
        value: &Value,
        location: &Location,
    ) -> Validation<Self::Output, ValidationErrors> {
        self.validate(value, location)
    }

    fn validate_to_value(
        &self,
        value: &Value,
        location: &Location,
    ) -> Validation<Value, ValidationErrors> {
        self.validate(value, location).map(Value::Map)
    }
}
