//! # Shapecheck
//!
//! Structural "contains" assertions that report ALL mismatches, keyed by
//! where they occurred, rather than stopping at the first one.
//!
//! ## Overview
//!
//! An expected [`Shape`] is written with ordinary values, types, wildcards
//! and nested lists and mappings. A check asks whether an actual [`Value`]
//! contains that shape: mappings need at least the expected keys (extra keys
//! are ignored at every level), lists need exactly the expected elements,
//! scalars must match exactly, type expressions must validate.
//!
//! Internally, a [`ConversionRegistry`] turns the shape into a [`Rule`] by
//! asking an ordered list of [`FieldKind`]s to recognise it. The rule compiles
//! to a [`RootSchema`] whose validation accumulates errors through
//! stillwater's `Validation` type.
//!
//! ## Core Types
//!
//! - [`Value`]: The actual value under test
//! - [`Shape`]: What the actual value should contain
//! - [`Location`]: Where in a value a mismatch occurred (e.g. `c[0].e`)
//! - [`ValidationErrors`]: A non-empty collection of located mismatches
//! - [`ContainsModel`]: Runs checks with a given registry
//!
//! ## Example
//!
//! ```rust
//! use shapecheck::{contains, Location, Shape, TypeExpr, Value};
//!
//! let expected = Shape::map([
//!     ("a", Shape::from("3")),
//!     (
//!         "c",
//!         Shape::list([Shape::map([
//!             ("d", Shape::from(TypeExpr::Int)),
//!             ("e", Shape::nothing()),
//!         ])]),
//!     ),
//!     ("e", Shape::map([("g", Shape::from(TypeExpr::Str)), ("b", Shape::something())])),
//! ]);
//!
//! let actual = Value::map([
//!     ("a", Value::from("5")),
//!     ("c", Value::list([Value::map([("d", "4"), ("e", "x")])])),
//!     ("e", Value::map([("g", 5)])),
//! ]);
//!
//! let error = contains(actual, expected).unwrap_err();
//! let locations: Vec<String> = error
//!     .mismatches()
//!     .unwrap()
//!     .locations()
//!     .iter()
//!     .map(|location| location.to_string())
//!     .collect();
//!
//! assert_eq!(locations, vec!["a", "c[0].e", "e.g", "e.b"]);
//! ```

pub mod contains;
pub mod convert;
pub mod error;
pub mod generators;
pub mod path;
pub mod schema;
pub mod shape;
pub mod value;

pub use contains::{assert_contains, contains, ContainsModel};
pub use convert::{
    ConversionContext, ConversionRegistry, Converter, FieldKind, RegistryBuilder, Rule,
    DEFAULT_CACHE_CAPACITY,
};
pub use error::{ContainsError, ConversionError, ModelError, ValidationError, ValidationErrors};
pub use generators::{generated_type, TypeGenerator, UnorderedLiteralCollection};
pub use path::{Location, PathSegment};
pub use schema::{
    AfterValidator, FieldDef, FieldInfo, ModelSchema, RootSchema, SchemaLike, TypeExpr,
};
pub use shape::Shape;
pub use value::{EnumMember, EnumType, Literal, ObjectValue, Value};

/// Type alias for validation results using ValidationErrors
pub type ValidationResult<T> = stillwater::Validation<T, ValidationErrors>;
