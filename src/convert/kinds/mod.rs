//! Field kinds: recognisers that turn one kind of expected shape into a rule.
//!
//! The registry asks each kind in turn; the first one that recognises a
//! shape produces its rule. Static kinds look at a single shape, dynamic
//! kinds recurse into nested shapes through their [`ConversionContext`].

mod constants;
mod lists;
mod nested;
mod typed;
mod wildcards;

pub use constants::{EqualityConstantKind, LiteralKind};
pub use lists::SequenceKind;
pub use nested::{MappingKind, MODEL_NAME};
pub use typed::{TypeExprKind, TypeGeneratorKind};
pub use wildcards::{AnythingKind, NothingKind, SomethingKind};

use std::sync::Arc;

use crate::error::ConversionError;
use crate::shape::Shape;

use super::context::ConversionContext;
use super::rule::Rule;

/// A recogniser for one kind of expected shape.
///
/// `convert` returns `Ok(None)` when the shape is not of this kind, so the
/// registry can move on to the next kind. An `Err` aborts the conversion.
///
/// # Example
///
/// ```rust
/// use shapecheck::{ConversionContext, ConversionError, ConversionRegistry, FieldKind};
/// use shapecheck::{Rule, Shape, TypeExpr, Value};
///
/// /// Treats the string "<int>" as the int type.
/// struct IntPlaceholder;
///
/// impl FieldKind for IntPlaceholder {
///     fn name(&self) -> &str {
///         "int_placeholder"
///     }
///
///     fn convert(
///         &self,
///         shape: &Shape,
///         _ctx: &ConversionContext<'_>,
///     ) -> Result<Option<Rule>, ConversionError> {
///         Ok(match shape {
///             Shape::Value(Value::Str(s)) if s == "<int>" => Some(Rule::required(TypeExpr::Int)),
///             _ => None,
///         })
///     }
/// }
///
/// let registry = ConversionRegistry::builder()
///     .field_kind(IntPlaceholder)
///     .with_standard_kinds()
///     .build();
///
/// let rule = registry.convert(&Shape::from("<int>")).unwrap();
/// assert_eq!(rule.type_expr(), &TypeExpr::Int);
/// ```
pub trait FieldKind: Send + Sync {
    /// A short name for logs and introspection.
    fn name(&self) -> &str;

    /// Converts `shape` if it is of this kind.
    fn convert(
        &self,
        shape: &Shape,
        ctx: &ConversionContext<'_>,
    ) -> Result<Option<Rule>, ConversionError>;
}

/// The kinds that look at a single shape, in dispatch order.
pub fn static_kinds() -> Vec<Arc<dyn FieldKind>> {
    vec![
        Arc::new(NothingKind),
        Arc::new(SomethingKind),
        Arc::new(AnythingKind),
        Arc::new(LiteralKind),
        Arc::new(EqualityConstantKind),
        Arc::new(TypeExprKind),
        Arc::new(TypeGeneratorKind),
    ]
}

/// The kinds that recurse into nested shapes, in dispatch order.
pub fn dynamic_kinds() -> Vec<Arc<dyn FieldKind>> {
    vec![Arc::new(MappingKind), Arc::new(SequenceKind)]
}
