//! Wildcard kinds: Nothing, Something and Anything.

use crate::convert::context::ConversionContext;
use crate::convert::rule::Rule;
use crate::error::ConversionError;
use crate::schema::{FieldInfo, TypeExpr};
use crate::shape::Shape;
use crate::value::Value;

use super::FieldKind;

/// `None`: only null matches, and an absent field defaults to null.
#[derive(Debug, Clone, Copy, Default)]
pub struct NothingKind;

impl FieldKind for NothingKind {
    fn name(&self) -> &str {
        "nothing"
    }

    fn convert(
        &self,
        shape: &Shape,
        _ctx: &ConversionContext<'_>,
    ) -> Result<Option<Rule>, ConversionError> {
        Ok(match shape {
            Shape::Value(Value::Null) => Some(Rule::new(
                TypeExpr::None,
                FieldInfo::optional(Value::Null),
            )),
            _ => None,
        })
    }
}

/// `...`: any value matches, but it has to be there.
#[derive(Debug, Clone, Copy, Default)]
pub struct SomethingKind;

impl FieldKind for SomethingKind {
    fn name(&self) -> &str {
        "something"
    }

    fn convert(
        &self,
        shape: &Shape,
        _ctx: &ConversionContext<'_>,
    ) -> Result<Option<Rule>, ConversionError> {
        Ok(match shape {
            Shape::Ellipsis => Some(Rule::required(TypeExpr::Any)),
            _ => None,
        })
    }
}

/// `Any`: any value matches, including none at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnythingKind;

impl FieldKind for AnythingKind {
    fn name(&self) -> &str {
        "anything"
    }

    fn convert(
        &self,
        shape: &Shape,
        _ctx: &ConversionContext<'_>,
    ) -> Result<Option<Rule>, ConversionError> {
        Ok(match shape {
            Shape::Type(TypeExpr::Any) => Some(Rule::new(
                TypeExpr::Any,
                FieldInfo::optional(Value::Null),
            )),
            _ => None,
        })
    }
}
