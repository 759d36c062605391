//! The sequence kind.

use crate::convert::context::ConversionContext;
use crate::convert::rule::Rule;
use crate::error::ConversionError;
use crate::schema::TypeExpr;
use crate::shape::Shape;

use super::FieldKind;

/// A list of shapes: the actual list must have exactly one matching element
/// per shape, in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceKind;

impl FieldKind for SequenceKind {
    fn name(&self) -> &str {
        "sequence"
    }

    fn convert(
        &self,
        shape: &Shape,
        ctx: &ConversionContext<'_>,
    ) -> Result<Option<Rule>, ConversionError> {
        let positions = match shape {
            Shape::List(items) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| ctx.at(idx).convert_to_type(item))
                .collect::<Result<Vec<_>, _>>()?,
            Shape::Value(value) => match value.as_list() {
                Some(items) => items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| ctx.at(idx).convert_to_type(&Shape::Value(item.clone())))
                    .collect::<Result<Vec<_>, _>>()?,
                None => return Ok(None),
            },
            _ => return Ok(None),
        };
        Ok(Some(Rule::required(TypeExpr::Tuple(positions))))
    }
}
