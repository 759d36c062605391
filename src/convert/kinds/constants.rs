//! Kinds for concrete expected values.

use tracing::trace;

use crate::convert::context::ConversionContext;
use crate::convert::rule::Rule;
use crate::error::ConversionError;
use crate::schema::{AfterValidator, TypeExpr};
use crate::shape::Shape;
use crate::value::{Literal, Value};

use super::FieldKind;

/// Scalars that must match exactly, type included.
///
/// Claims booleans, integers, floats, bytes, strings and enum members. NaN is
/// left unclaimed since it never equals itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralKind;

impl FieldKind for LiteralKind {
    fn name(&self) -> &str {
        "literal"
    }

    fn convert(
        &self,
        shape: &Shape,
        _ctx: &ConversionContext<'_>,
    ) -> Result<Option<Rule>, ConversionError> {
        let Shape::Value(value) = shape else {
            return Ok(None);
        };
        Ok(Literal::from_value(value)
            .map(|literal| Rule::required(TypeExpr::Literal(vec![literal]))))
    }
}

/// Dates, times and objects that the actual value must equal.
///
/// The actual value is first validated as the constant's own type, then
/// compared with the constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualityConstantKind;

impl EqualityConstantKind {
    fn equals(expected: Value) -> AfterValidator {
        AfterValidator::new(format!("equals({})", expected), move |value| {
            if *value == expected {
                Ok(value.clone())
            } else {
                Err(format!("value should be {}", expected))
            }
        })
    }
}

impl FieldKind for EqualityConstantKind {
    fn name(&self) -> &str {
        "equality_constant"
    }

    fn convert(
        &self,
        shape: &Shape,
        _ctx: &ConversionContext<'_>,
    ) -> Result<Option<Rule>, ConversionError> {
        let Shape::Value(value) = shape else {
            return Ok(None);
        };
        if !matches!(
            value,
            Value::Date(_) | Value::Time(_) | Value::DateTime(_) | Value::Object(_)
        ) {
            return Ok(None);
        }
        // An object holding a NaN attribute can never be matched.
        let constant = value.clone();
        if constant != *value {
            return Ok(None);
        }

        trace!(constant = %value, "expecting equality");
        let type_expr = TypeExpr::annotated(TypeExpr::of_value(value), [Self::equals(constant)]);
        Ok(Some(Rule::required(type_expr)))
    }
}
