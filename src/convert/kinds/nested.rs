//! The mapping kind.

use tracing::debug;

use crate::convert::context::ConversionContext;
use crate::convert::rule::Rule;
use crate::error::ConversionError;
use crate::path::PathSegment;
use crate::schema::{ModelSchema, TypeExpr};
use crate::shape::Shape;
use crate::value::Value;

use super::FieldKind;

/// The name given to models built from mapping shapes.
pub const MODEL_NAME: &str = "Model";

/// A mapping of shapes: the actual value must have at least these fields,
/// each matching its shape. Other fields are ignored.
///
/// Field shapes are converted first, and their conversion errors abort the
/// whole conversion. Only a mapping whose keys cannot become field names
/// (non-string or repeated keys) is left unclaimed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MappingKind;

impl MappingKind {
    fn field_segment(key: &Value) -> PathSegment {
        match key {
            Value::Str(name) => PathSegment::Field(name.clone()),
            other => PathSegment::Field(other.to_string()),
        }
    }

    fn try_build_model(
        entries: impl IntoIterator<Item = (Value, Shape)>,
        ctx: &ConversionContext<'_>,
    ) -> Result<Option<Rule>, ConversionError> {
        let rules = entries
            .into_iter()
            .map(|(key, shape)| {
                let rule = ctx.at(Self::field_segment(&key)).convert_to_field(&shape)?;
                Ok((key, rule))
            })
            .collect::<Result<Vec<_>, ConversionError>>()?;

        match ModelSchema::try_from_rules(MODEL_NAME, rules) {
            Ok(model) => Ok(Some(Rule::required(TypeExpr::model(model)))),
            Err(error) => {
                debug!(location = %ctx.location(), %error, "mapping shape is not a model");
                Ok(None)
            }
        }
    }
}

impl FieldKind for MappingKind {
    fn name(&self) -> &str {
        "mapping"
    }

    fn convert(
        &self,
        shape: &Shape,
        ctx: &ConversionContext<'_>,
    ) -> Result<Option<Rule>, ConversionError> {
        match shape {
            Shape::Dict(entries) => Self::try_build_model(entries.iter().cloned(), ctx),
            Shape::Value(Value::Map(entries)) => Self::try_build_model(
                entries
                    .iter()
                    .map(|(k, v)| (Value::Str(k.clone()), Shape::Value(v.clone()))),
                ctx,
            ),
            _ => Ok(None),
        }
    }
}
