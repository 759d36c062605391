//! Errors raised while turning expected shapes into rules.

use thiserror::Error;

use super::{location_label, ValidationErrors};
use crate::path::Location;
use crate::shape::Shape;

/// No field kind recognised part of an expected shape.
///
/// This is an authoring mistake in the expected shape, not a mismatch of the
/// actual value, and it aborts the whole conversion.
#[derive(Debug, Clone, Error)]
#[error("couldn't convert expected shape at {}: {shape}", location_label(.location))]
pub struct ConversionError {
    /// Where the unmatched part sits inside the expected shape.
    pub location: Location,
    /// The unmatched part itself.
    pub shape: Shape,
}

impl ConversionError {
    pub fn new(location: Location, shape: Shape) -> Self {
        Self { location, shape }
    }
}

/// A set of rules could not be assembled into a model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("field names must be strings, got {key}")]
    InvalidFieldName { key: String },

    #[error("field '{name}' is declared more than once")]
    DuplicateField { name: String },
}

/// Why a contains check did not pass.
#[derive(Debug, Clone, Error)]
pub enum ContainsError {
    /// The expected shape could not be converted.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The actual value does not contain the expected shape.
    #[error("{0}")]
    Mismatch(#[from] ValidationErrors),
}

impl ContainsError {
    /// Returns the mismatches, if the check got as far as validating.
    pub fn mismatches(&self) -> Option<&ValidationErrors> {
        match self {
            ContainsError::Mismatch(errors) => Some(errors),
            ContainsError::Conversion(_) => None,
        }
    }

    /// Returns the conversion failure, if the shape was malformed.
    pub fn conversion(&self) -> Option<&ConversionError> {
        match self {
            ContainsError::Conversion(error) => Some(error),
            ContainsError::Mismatch(_) => None,
        }
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ContainsError>();
    assert_sync::<ContainsError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_conversion_error_message_names_location() {
        let error = ConversionError::new(
            Location::root().push_field("e").push_field("x"),
            Shape::Value(Value::list([Value::Null])),
        );
        assert_eq!(
            error.to_string(),
            "couldn't convert expected shape at e.x: [None]"
        );
    }

    #[test]
    fn test_conversion_error_at_root() {
        let error = ConversionError::new(Location::root(), Shape::Value(Value::Null));
        assert!(error.to_string().contains("at (root)"));
    }

    #[test]
    fn test_model_error_messages() {
        let invalid = ModelError::InvalidFieldName {
            key: "1".to_string(),
        };
        let duplicate = ModelError::DuplicateField {
            name: "a".to_string(),
        };
        assert_eq!(invalid.to_string(), "field names must be strings, got 1");
        assert_eq!(duplicate.to_string(), "field 'a' is declared more than once");
    }
}
