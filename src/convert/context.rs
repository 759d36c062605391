//! Conversion context for recursive field kinds.
//!
//! Field kinds that handle nested shapes convert their parts through the
//! [`ConversionContext`] they are handed, which borrows the registry that is
//! running the conversion and knows where in the expected shape it is.

use crate::error::ConversionError;
use crate::path::{Location, PathSegment};
use crate::schema::TypeExpr;
use crate::shape::Shape;

use super::rule::Rule;

/// Anything that can convert a shape found at a given location.
///
/// This trait decouples the field kinds from the registry that owns them.
pub trait Converter {
    fn convert_at(&self, shape: &Shape, location: &Location) -> Result<Rule, ConversionError>;
}

/// The converter and location a field kind is asked to convert under.
#[derive(Clone)]
pub struct ConversionContext<'a> {
    converter: &'a dyn Converter,
    location: Location,
}

impl<'a> ConversionContext<'a> {
    pub fn new(converter: &'a dyn Converter, location: Location) -> Self {
        Self {
            converter,
            location,
        }
    }

    /// Returns where in the expected shape the conversion is happening.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Returns a context one segment deeper.
    pub fn at(&self, segment: impl Into<PathSegment>) -> Self {
        Self {
            converter: self.converter,
            location: self.location.push(segment.into()),
        }
    }

    /// Converts a nested shape into a full rule.
    pub fn convert_to_field(&self, shape: &Shape) -> Result<Rule, ConversionError> {
        self.converter.convert_at(shape, &self.location)
    }

    /// Converts a nested shape, keeping only its type expression.
    pub fn convert_to_type(&self, shape: &Shape) -> Result<TypeExpr, ConversionError> {
        self.convert_to_field(shape).map(Rule::into_type_expr)
    }
}
