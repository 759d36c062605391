//! Kinds for type expressions and type generators.

use crate::convert::context::ConversionContext;
use crate::convert::rule::Rule;
use crate::error::ConversionError;
use crate::generators::generated_type;
use crate::schema::TypeExpr;
use crate::shape::Shape;

use super::FieldKind;

/// A type expression: any value of that type matches.
///
/// The bare `Any` marker belongs to [`AnythingKind`](super::AnythingKind).
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeExprKind;

impl FieldKind for TypeExprKind {
    fn name(&self) -> &str {
        "type_expr"
    }

    fn convert(
        &self,
        shape: &Shape,
        _ctx: &ConversionContext<'_>,
    ) -> Result<Option<Rule>, ConversionError> {
        Ok(match shape {
            Shape::Type(TypeExpr::Any) => None,
            Shape::Type(type_expr) => Some(Rule::required(type_expr.clone())),
            _ => None,
        })
    }
}

/// A type generator: its data type, followed by its check.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeGeneratorKind;

impl FieldKind for TypeGeneratorKind {
    fn name(&self) -> &str {
        "type_generator"
    }

    fn convert(
        &self,
        shape: &Shape,
        _ctx: &ConversionContext<'_>,
    ) -> Result<Option<Rule>, ConversionError> {
        Ok(match shape {
            Shape::Generator(generator) => Some(Rule::required(generated_type(generator))),
            _ => None,
        })
    }
}
