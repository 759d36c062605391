//! Type expressions and their validation.
//!
//! A [`TypeExpr`] describes which actual values are acceptable: scalar types
//! with lax coercion, literals, enums, containers, optionals, unions,
//! annotated types with after-validators, and models.

use std::fmt::{self, Debug, Display};
use std::sync::Arc;

use stillwater::Validation;

use super::coerce::{self, mismatch, one_of};
use super::model::ModelSchema;
use super::traits::SchemaLike;
use crate::error::{ValidationError, ValidationErrors};
use crate::path::Location;
use crate::value::{EnumType, Literal, Value};

type ValidatorFn = dyn Fn(&Value) -> Result<Value, String> + Send + Sync;

/// A named check that runs after the type part of an annotated type.
///
/// The function receives the already-coerced value and returns the value to
/// keep or a message. A message becomes a `value_error` at the value's
/// location, prefixed with `Value error, `.
///
/// # Example
///
/// ```rust
/// use shapecheck::{AfterValidator, Location, SchemaLike, TypeExpr, Value};
///
/// let positive = AfterValidator::new("positive", |value| match value {
///     Value::Int(i) if *i > 0 => Ok(value.clone()),
///     _ => Err("must be positive".to_string()),
/// });
/// let schema = TypeExpr::annotated(TypeExpr::Int, [positive]);
///
/// let errors = schema
///     .validate(&Value::from(-1), &Location::root())
///     .into_result()
///     .unwrap_err();
/// assert_eq!(errors.first().message, "Value error, must be positive");
/// ```
#[derive(Clone)]
pub struct AfterValidator {
    name: String,
    func: Arc<ValidatorFn>,
}

impl AfterValidator {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the check against an already validated value.
    pub fn apply(&self, value: &Value, location: &Location) -> Result<Value, ValidationError> {
        (self.func)(value).map_err(|message| {
            ValidationError::new(location.clone(), format!("Value error, {}", message))
                .with_kind("value_error")
                .with_got(value.to_string())
        })
    }
}

impl Debug for AfterValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AfterValidator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for AfterValidator {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.func, &other.func)
    }
}

/// A type expression: the compiled form of every rule.
///
/// Scalar types coerce laxly (`"4"` is a valid `Int`), while `Literal`
/// matching is type-exact (`Literal([1])` rejects `true`).
///
/// # Example
///
/// ```rust
/// use shapecheck::{Location, SchemaLike, TypeExpr, Value};
///
/// let schema = TypeExpr::tuple([TypeExpr::Int, TypeExpr::optional(TypeExpr::Str)]);
///
/// let ok = schema.validate(&Value::list([Value::from("4"), Value::Null]), &Location::root());
/// assert_eq!(ok.into_result().unwrap(), Value::list([Value::from(4), Value::Null]));
///
/// let short = schema.validate(&Value::list([1]), &Location::root());
/// let errors = short.into_result().unwrap_err();
/// assert_eq!(errors.first().kind, "missing");
/// assert_eq!(errors.first().location, Location::from_index(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Any,
    None,
    Bool,
    Int,
    Float,
    Bytes,
    Str,
    Date,
    Time,
    DateTime,
    Enum(Arc<EnumType>),
    /// A member of any enum.
    AnyEnum,
    /// Values whose runtime type has this name.
    Instance(String),
    Literal(Vec<Literal>),
    List(Box<TypeExpr>),
    /// A fixed-length list, validated position by position.
    Tuple(Vec<TypeExpr>),
    /// A mapping with string keys and values of one type.
    Dict(Box<TypeExpr>),
    Optional(Box<TypeExpr>),
    Union(Vec<TypeExpr>),
    Annotated(Box<TypeExpr>, Vec<AfterValidator>),
    Model(Arc<ModelSchema>),
}

impl TypeExpr {
    pub fn list(item: TypeExpr) -> Self {
        TypeExpr::List(Box::new(item))
    }

    pub fn tuple(items: impl IntoIterator<Item = TypeExpr>) -> Self {
        TypeExpr::Tuple(items.into_iter().collect())
    }

    pub fn dict(value: TypeExpr) -> Self {
        TypeExpr::Dict(Box::new(value))
    }

    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::Optional(Box::new(inner))
    }

    pub fn union(members: impl IntoIterator<Item = TypeExpr>) -> Self {
        TypeExpr::Union(members.into_iter().collect())
    }

    pub fn literal<L: Into<Literal>>(values: impl IntoIterator<Item = L>) -> Self {
        TypeExpr::Literal(values.into_iter().map(Into::into).collect())
    }

    /// `Union[bool, int, float, bytes, str, Enum]`: every literal type.
    pub fn literal_type() -> Self {
        TypeExpr::union([
            TypeExpr::Bool,
            TypeExpr::Int,
            TypeExpr::Float,
            TypeExpr::Bytes,
            TypeExpr::Str,
            TypeExpr::AnyEnum,
        ])
    }

    pub fn instance(type_name: impl Into<String>) -> Self {
        TypeExpr::Instance(type_name.into())
    }

    pub fn annotated(
        inner: TypeExpr,
        validators: impl IntoIterator<Item = AfterValidator>,
    ) -> Self {
        TypeExpr::Annotated(Box::new(inner), validators.into_iter().collect())
    }

    pub fn model(schema: ModelSchema) -> Self {
        TypeExpr::Model(Arc::new(schema))
    }

    /// Returns the type that a value is an instance of.
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Null => TypeExpr::None,
            Value::Bool(_) => TypeExpr::Bool,
            Value::Int(_) => TypeExpr::Int,
            Value::Float(_) => TypeExpr::Float,
            Value::Bytes(_) => TypeExpr::Bytes,
            Value::Str(_) => TypeExpr::Str,
            Value::Date(_) => TypeExpr::Date,
            Value::Time(_) => TypeExpr::Time,
            Value::DateTime(_) => TypeExpr::DateTime,
            Value::List(_) => TypeExpr::list(TypeExpr::Any),
            Value::Map(_) => TypeExpr::dict(TypeExpr::Any),
            Value::Enum(_) | Value::Object(_) => TypeExpr::Instance(value.type_name().to_string()),
        }
    }

    /// Returns true if the type is fully described by its structure.
    ///
    /// Annotated types carry opaque validator functions and are not.
    pub fn is_structural(&self) -> bool {
        match self {
            TypeExpr::Annotated(..) => false,
            TypeExpr::List(inner) | TypeExpr::Dict(inner) | TypeExpr::Optional(inner) => {
                inner.is_structural()
            }
            TypeExpr::Tuple(items) | TypeExpr::Union(items) => {
                items.iter().all(TypeExpr::is_structural)
            }
            TypeExpr::Model(model) => model
                .fields()
                .all(|(_, field)| field.type_expr().is_structural()),
            _ => true,
        }
    }

    /// Returns true if `value` already has this type without any coercion.
    fn is_exact_instance(&self, value: &Value) -> bool {
        match (self, value) {
            (TypeExpr::Any, _) => true,
            (TypeExpr::None, Value::Null)
            | (TypeExpr::Bool, Value::Bool(_))
            | (TypeExpr::Int, Value::Int(_))
            | (TypeExpr::Float, Value::Float(_))
            | (TypeExpr::Bytes, Value::Bytes(_))
            | (TypeExpr::Str, Value::Str(_))
            | (TypeExpr::Date, Value::Date(_))
            | (TypeExpr::Time, Value::Time(_))
            | (TypeExpr::DateTime, Value::DateTime(_))
            | (TypeExpr::List(_), Value::List(_))
            | (TypeExpr::Tuple(_), Value::List(_))
            | (TypeExpr::Dict(_), Value::Map(_))
            | (TypeExpr::Model(_), Value::Map(_) | Value::Object(_)) => true,
            (TypeExpr::Enum(enum_type), Value::Enum(member)) => enum_type.contains(member),
            (TypeExpr::AnyEnum, Value::Enum(_)) => true,
            (TypeExpr::Instance(name), value) => value.type_name() == name.as_str(),
            (TypeExpr::Literal(literals), value) => literals.iter().any(|l| l.matches(value)),
            (TypeExpr::Optional(inner), value) => {
                value.is_null() || inner.is_exact_instance(value)
            }
            (TypeExpr::Union(members), value) => {
                members.iter().any(|member| member.is_exact_instance(value))
            }
            (TypeExpr::Annotated(inner, _), value) => inner.is_exact_instance(value),
            _ => false,
        }
    }

    fn validate_scalar(
        value: &Value,
        location: &Location,
        convert: fn(&Value, &Location) -> Result<Value, ValidationError>,
    ) -> Validation<Value, ValidationErrors> {
        match convert(value, location) {
            Ok(v) => Validation::Success(v),
            Err(error) => Validation::Failure(ValidationErrors::single(error)),
        }
    }

    fn validate_literal(
        literals: &[Literal],
        value: &Value,
        location: &Location,
    ) -> Validation<Value, ValidationErrors> {
        if literals.iter().any(|literal| literal.matches(value)) {
            return Validation::Success(value.clone());
        }
        let expected = one_of(literals.iter().map(ToString::to_string));
        Validation::Failure(ValidationErrors::single(
            mismatch(
                location,
                "literal_error",
                format!("Input should be {}", expected),
                value,
            )
            .with_expected(expected),
        ))
    }

    fn validate_list(
        item: &TypeExpr,
        value: &Value,
        location: &Location,
    ) -> Validation<Value, ValidationErrors> {
        let Some(items) = value.as_list() else {
            return Validation::Failure(ValidationErrors::single(mismatch(
                location,
                "list_type",
                "Input should be a valid list",
                value,
            )));
        };

        let mut errors = Vec::new();
        let mut validated = Vec::with_capacity(items.len());
        for (idx, element) in items.iter().enumerate() {
            match item.validate(element, &location.push_index(idx)) {
                Validation::Success(v) => validated.push(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        ValidationErrors::collect(Value::List(validated), errors)
    }

    fn validate_tuple(
        positions: &[TypeExpr],
        value: &Value,
        location: &Location,
    ) -> Validation<Value, ValidationErrors> {
        let Some(items) = value.as_list() else {
            return Validation::Failure(ValidationErrors::single(mismatch(
                location,
                "tuple_type",
                "Input should be a valid tuple",
                value,
            )));
        };

        let mut errors = Vec::new();
        let mut validated = Vec::with_capacity(positions.len());
        for (idx, position) in positions.iter().enumerate() {
            let position_location = location.push_index(idx);
            match items.get(idx) {
                Some(element) => match position.validate(element, &position_location) {
                    Validation::Success(v) => validated.push(v),
                    Validation::Failure(e) => errors.extend(e),
                },
                None => errors.push(
                    ValidationError::new(position_location, "Field required")
                        .with_kind("missing")
                        .with_expected(position.to_string()),
                ),
            }
        }

        for (idx, extra) in items.iter().enumerate().skip(positions.len()) {
            errors.push(mismatch(
                &location.push_index(idx),
                "too_long",
                format!(
                    "Tuple should have at most {} items after validation, not {}",
                    positions.len(),
                    items.len()
                ),
                extra,
            ));
        }

        ValidationErrors::collect(Value::List(validated), errors)
    }

    fn validate_dict(
        item: &TypeExpr,
        value: &Value,
        location: &Location,
    ) -> Validation<Value, ValidationErrors> {
        let Some(entries) = value.as_map() else {
            return Validation::Failure(ValidationErrors::single(mismatch(
                location,
                "dict_type",
                "Input should be a valid dictionary",
                value,
            )));
        };

        let mut errors = Vec::new();
        let mut validated = indexmap::IndexMap::with_capacity(entries.len());
        for (key, element) in entries {
            match item.validate(element, &location.push_field(key)) {
                Validation::Success(v) => {
                    validated.insert(key.clone(), v);
                }
                Validation::Failure(e) => errors.extend(e),
            }
        }

        ValidationErrors::collect(Value::Map(validated), errors)
    }

    fn validate_union(
        members: &[TypeExpr],
        value: &Value,
        location: &Location,
    ) -> Validation<Value, ValidationErrors> {
        // Exact type matches first, so `1` stays an int under `Union[str, int]`.
        for member in members.iter().filter(|m| m.is_exact_instance(value)) {
            if let Validation::Success(v) = member.validate(value, location) {
                return Validation::Success(v);
            }
        }

        let mut errors = Vec::new();
        for member in members {
            match member.validate(value, &location.push_field(member.to_string())) {
                Validation::Success(v) => return Validation::Success(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        ValidationErrors::collect(value.clone(), errors)
    }

    fn validate_annotated(
        inner: &TypeExpr,
        validators: &[AfterValidator],
        value: &Value,
        location: &Location,
    ) -> Validation<Value, ValidationErrors> {
        let mut current = match inner.validate(value, location) {
            Validation::Success(v) => v,
            failure => return failure,
        };
        for validator in validators {
            match validator.apply(&current, location) {
                Ok(v) => current = v,
                Err(error) => return Validation::Failure(ValidationErrors::single(error)),
            }
        }
        Validation::Success(current)
    }
}

impl SchemaLike for TypeExpr {
    type Output = Value;

    fn validate(&self, value: &Value, location: &Location) -> Validation<Value, ValidationErrors> {
        match self {
            TypeExpr::Any => Validation::Success(value.clone()),
            TypeExpr::None => Self::validate_scalar(value, location, coerce::to_none),
            TypeExpr::Bool => Self::validate_scalar(value, location, coerce::to_bool),
            TypeExpr::Int => Self::validate_scalar(value, location, coerce::to_int),
            TypeExpr::Float => Self::validate_scalar(value, location, coerce::to_float),
            TypeExpr::Bytes => Self::validate_scalar(value, location, coerce::to_bytes),
            TypeExpr::Str => Self::validate_scalar(value, location, coerce::to_str),
            TypeExpr::Date => Self::validate_scalar(value, location, coerce::to_date),
            TypeExpr::Time => Self::validate_scalar(value, location, coerce::to_time),
            TypeExpr::DateTime => Self::validate_scalar(value, location, coerce::to_datetime),
            TypeExpr::Enum(enum_type) => match coerce::to_enum(enum_type, value, location) {
                Ok(v) => Validation::Success(v),
                Err(error) => Validation::Failure(ValidationErrors::single(error)),
            },
            TypeExpr::AnyEnum => match value {
                Value::Enum(_) => Validation::Success(value.clone()),
                _ => Validation::Failure(ValidationErrors::single(
                    mismatch(
                        location,
                        "is_instance_of",
                        "Input should be an instance of Enum",
                        value,
                    )
                    .with_expected("Enum"),
                )),
            },
            TypeExpr::Instance(name) => {
                if value.type_name() == name.as_str() {
                    Validation::Success(value.clone())
                } else {
                    Validation::Failure(ValidationErrors::single(
                        mismatch(
                            location,
                            "is_instance_of",
                            format!("Input should be an instance of {}", name),
                            value,
                        )
                        .with_expected(name.clone()),
                    ))
                }
            }
            TypeExpr::Literal(literals) => Self::validate_literal(literals, value, location),
            TypeExpr::List(item) => Self::validate_list(item, value, location),
            TypeExpr::Tuple(positions) => Self::validate_tuple(positions, value, location),
            TypeExpr::Dict(item) => Self::validate_dict(item, value, location),
            TypeExpr::Optional(inner) => {
                if value.is_null() {
                    Validation::Success(Value::Null)
                } else {
                    inner.validate(value, location)
                }
            }
            TypeExpr::Union(members) => Self::validate_union(members, value, location),
            TypeExpr::Annotated(inner, validators) => {
                Self::validate_annotated(inner, validators, value, location)
            }
            TypeExpr::Model(model) => model.validate_to_value(value, location),
        }
    }

    fn validate_to_value(
        &self,
        value: &Value,
        location: &Location,
    ) -> Validation<Value, ValidationErrors> {
        self.validate(value, location)
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[impl Display]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Any => f.write_str("Any"),
            TypeExpr::None => f.write_str("None"),
            TypeExpr::Bool => f.write_str("bool"),
            TypeExpr::Int => f.write_str("int"),
            TypeExpr::Float => f.write_str("float"),
            TypeExpr::Bytes => f.write_str("bytes"),
            TypeExpr::Str => f.write_str("str"),
            TypeExpr::Date => f.write_str("date"),
            TypeExpr::Time => f.write_str("time"),
            TypeExpr::DateTime => f.write_str("datetime"),
            TypeExpr::Enum(enum_type) => f.write_str(enum_type.name()),
            TypeExpr::AnyEnum => f.write_str("Enum"),
            TypeExpr::Instance(name) => f.write_str(name),
            TypeExpr::Literal(literals) => {
                f.write_str("Literal[")?;
                write_joined(f, literals)?;
                f.write_str("]")
            }
            TypeExpr::List(item) => write!(f, "list[{}]", item),
            TypeExpr::Tuple(positions) if positions.is_empty() => f.write_str("tuple[()]"),
            TypeExpr::Tuple(positions) => {
                f.write_str("tuple[")?;
                write_joined(f, positions)?;
                f.write_str("]")
            }
            TypeExpr::Dict(item) => write!(f, "dict[str, {}]", item),
            TypeExpr::Optional(inner) => write!(f, "Optional[{}]", inner),
            TypeExpr::Union(members) => {
                f.write_str("Union[")?;
                write_joined(f, members)?;
                f.write_str("]")
            }
            TypeExpr::Annotated(inner, validators) => {
                write!(f, "Annotated[{}", inner)?;
                for validator in validators {
                    write!(f, ", {}", validator.name())?;
                }
                f.write_str("]")
            }
            TypeExpr::Model(model) => f.write_str(model.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    fn root() -> Location {
        Location::root()
    }

    #[test]
    fn test_literal_is_type_exact() {
        let three = TypeExpr::literal(["3"]);
        assert_eq!(unwrap_success(three.validate(&Value::from("3"), &root())), Value::from("3"));

        let errors = unwrap_failure(three.validate(&Value::Int(3), &root()));
        assert_eq!(errors.first().kind, "literal_error");
        assert_eq!(errors.first().message, "Input should be '3'");

        let one = TypeExpr::literal([1]);
        assert!(one.validate(&Value::Bool(true), &root()).is_failure());
        assert!(TypeExpr::literal([true]).validate(&Value::Int(1), &root()).is_failure());
    }

    #[test]
    fn test_literal_message_lists_alternatives() {
        let schema = TypeExpr::literal(["a", "b", "c"]);
        let errors = unwrap_failure(schema.validate(&Value::Null, &root()));
        assert_eq!(errors.first().message, "Input should be 'a', 'b' or 'c'");
    }

    #[test]
    fn test_none_requires_null() {
        assert!(TypeExpr::None.validate(&Value::Null, &root()).is_success());
        let errors = unwrap_failure(TypeExpr::None.validate(&Value::Int(4), &root()));
        assert_eq!(errors.first().kind, "none_required");
        assert_eq!(errors.first().got.as_deref(), Some("4"));
    }

    #[test]
    fn test_list_collects_every_item_error() {
        let schema = TypeExpr::list(TypeExpr::Int);
        let errors = unwrap_failure(schema.validate(&Value::list(["a", "2", "b"]), &root()));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.iter().nth(1).unwrap().location, Location::from_index(2));
        assert_eq!(
            unwrap_failure(schema.validate(&Value::Int(1), &root())).first().kind,
            "list_type"
        );
    }

    #[test]
    fn test_tuple_reports_every_surplus_position() {
        let schema = TypeExpr::tuple([TypeExpr::Int]);
        let errors = unwrap_failure(schema.validate(&Value::list([1, 2, 3]), &root()));

        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == "too_long"));
        assert_eq!(errors.first().location, Location::from_index(1));
        assert_eq!(
            unwrap_failure(schema.validate(&Value::from("x"), &root())).first().kind,
            "tuple_type"
        );
    }

    #[test]
    fn test_empty_tuple_accepts_only_empty_list() {
        let schema = TypeExpr::Tuple(Vec::new());
        assert!(schema.validate(&Value::List(vec![]), &root()).is_success());
        assert!(schema.validate(&Value::list([1]), &root()).is_failure());
    }

    #[test]
    fn test_dict_validates_values_by_key() {
        let schema = TypeExpr::dict(TypeExpr::Str);
        let errors = unwrap_failure(schema.validate(&Value::map([("k", 1)]), &root()));
        assert_eq!(errors.first().location, Location::from_field("k"));
        assert_eq!(
            unwrap_failure(schema.validate(&Value::list([1]), &root())).first().kind,
            "dict_type"
        );
    }

    #[test]
    fn test_optional_accepts_null_or_inner() {
        let schema = TypeExpr::optional(TypeExpr::Int);
        assert!(schema.validate(&Value::Null, &root()).is_success());
        assert!(schema.validate(&Value::from("4"), &root()).is_success());
        assert!(schema.validate(&Value::from("x"), &root()).is_failure());
    }

    #[test]
    fn test_union_prefers_exact_member() {
        let schema = TypeExpr::union([TypeExpr::Str, TypeExpr::Int]);
        assert_eq!(unwrap_success(schema.validate(&Value::Int(1), &root())), Value::Int(1));
        assert_eq!(
            unwrap_success(schema.validate(&Value::bytes("x"), &root())),
            Value::from("x")
        );
    }

    #[test]
    fn test_union_labels_member_errors() {
        let schema = TypeExpr::union([TypeExpr::Int, TypeExpr::literal(["3"])]);
        let location = Location::from_field("a");
        let errors = unwrap_failure(schema.validate(&Value::from("x"), &location));

        let locations: Vec<String> = errors.iter().map(|e| e.location.to_string()).collect();
        assert_eq!(locations, vec!["a.int", "a.Literal['3']"]);
    }

    #[test]
    fn test_annotated_runs_validators_after_coercion() {
        let even = AfterValidator::new("even", |value| match value {
            Value::Int(i) if i % 2 == 0 => Ok(value.clone()),
            _ => Err("odd number".to_string()),
        });
        let schema = TypeExpr::annotated(TypeExpr::Int, [even]);

        assert_eq!(unwrap_success(schema.validate(&Value::from("4"), &root())), Value::Int(4));

        let errors = unwrap_failure(schema.validate(&Value::from("3"), &root()));
        assert_eq!(errors.first().kind, "value_error");
        assert_eq!(errors.first().message, "Value error, odd number");

        let type_errors = unwrap_failure(schema.validate(&Value::from("x"), &root()));
        assert_eq!(type_errors.first().kind, "int_parsing");
    }

    #[test]
    fn test_instance_checks_type_name() {
        let schema = TypeExpr::instance("date");
        assert!(schema
            .validate(&Value::from(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), &root())
            .is_success());
        let errors = unwrap_failure(schema.validate(&Value::from("2024-01-01"), &root()));
        assert_eq!(errors.first().kind, "is_instance_of");
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TypeExpr::list(TypeExpr::Int).to_string(), "list[int]");
        assert_eq!(
            TypeExpr::tuple([TypeExpr::Int, TypeExpr::Str]).to_string(),
            "tuple[int, str]"
        );
        assert_eq!(TypeExpr::optional(TypeExpr::Int).to_string(), "Optional[int]");
        assert_eq!(TypeExpr::literal(["3"]).to_string(), "Literal['3']");
        assert_eq!(TypeExpr::dict(TypeExpr::Any).to_string(), "dict[str, Any]");
    }

    #[test]
    fn test_annotated_types_are_not_structural() {
        let check = AfterValidator::new("check", |value| Ok(value.clone()));
        assert!(TypeExpr::list(TypeExpr::Int).is_structural());
        assert!(!TypeExpr::list(TypeExpr::annotated(TypeExpr::Int, [check])).is_structural());
    }

    #[test]
    fn test_literal_type_keeps_items_as_given() {
        let schema = TypeExpr::literal_type();
        let color = EnumType::new("Color", [("RED", "red")]);
        let red = Value::from(color.member("RED").unwrap());

        for value in [Value::Bool(true), Value::Float(1.0), Value::from("1"), red] {
            assert_eq!(unwrap_success(schema.validate(&value, &root())), value);
        }

        let errors = unwrap_failure(schema.validate(&Value::Null, &root()));
        assert_eq!(errors.len(), 6);
        assert_eq!(errors.at_location(&root().push_field("Enum"))[0].kind, "is_instance_of");
    }
}
