//! Conversion of expected shapes into rules.
//!
//! A [`ConversionRegistry`] asks its [`FieldKind`]s, in order, to recognise an
//! expected shape. The recognising kind returns a [`Rule`]; kinds for nested
//! shapes convert each part through the [`ConversionContext`] they are given,
//! so a whole tree of shapes becomes one nested rule.
//!
//! # Example
//!
//! ```rust
//! use shapecheck::{ConversionRegistry, Shape, TypeExpr};
//!
//! let registry = ConversionRegistry::contains();
//!
//! let expected = Shape::map([("a", Shape::from(TypeExpr::Int)), ("b", Shape::nothing())]);
//! let rule = registry.convert(&expected).unwrap();
//!
//! let TypeExpr::Model(model) = rule.type_expr() else { panic!("mapping becomes a model") };
//! assert_eq!(model.field_names().collect::<Vec<_>>(), vec!["a", "b"]);
//! ```

mod context;
mod kinds;
mod registry;
mod rule;

pub use context::{ConversionContext, Converter};
pub use kinds::{
    dynamic_kinds, static_kinds, AnythingKind, EqualityConstantKind, FieldKind, LiteralKind,
    MappingKind, NothingKind, SequenceKind, SomethingKind, TypeExprKind, TypeGeneratorKind,
    MODEL_NAME,
};
pub use registry::{ConversionRegistry, RegistryBuilder, DEFAULT_CACHE_CAPACITY};
pub use rule::Rule;
