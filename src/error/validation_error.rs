//! Validation error types.
//!
//! This module provides [`ValidationError`] for single mismatches and
//! [`ValidationErrors`] for accumulating every mismatch of a check.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::json;
use stillwater::prelude::*;
use stillwater::Validation;

use super::location_label;
use crate::path::{Location, PathSegment};

/// A single mismatch between an actual value and its expected shape.
///
/// `ValidationError` captures:
/// - **location**: where in the actual value the mismatch occurred
/// - **kind**: machine-readable error kind (e.g. `literal_error`, `missing`)
/// - **message**: human-readable description (e.g. `Input should be '3'`)
/// - **got**: the actual value that failed, rendered (optional)
/// - **expected**: what was expected instead (optional)
///
/// # Example
///
/// ```rust
/// use shapecheck::{Location, ValidationError};
///
/// let error = ValidationError::new(Location::from_field("a"), "Input should be '3'")
///     .with_kind("literal_error")
///     .with_got("'5'");
///
/// assert_eq!(error.kind, "literal_error");
/// assert_eq!(error.to_string(), "a: Input should be '3' (got: '5')");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The location of the value that failed validation.
    pub location: Location,
    /// Machine-readable error kind.
    pub kind: String,
    /// Human-readable error message.
    pub message: String,
    /// The actual value that was received (formatted as string).
    pub got: Option<String>,
    /// Description of what was expected.
    pub expected: Option<String>,
}

impl ValidationError {
    /// Creates a new error with the given location and message.
    ///
    /// The kind defaults to "value_error". Use `with_kind` to set a more
    /// specific kind.
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            kind: "value_error".to_string(),
            message: message.into(),
            got: None,
            expected: None,
        }
    }

    /// Sets the error kind and returns self for chaining.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Sets the "got" (actual value) field and returns self for chaining.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the "expected" field and returns self for chaining.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", location_label(&self.location), self.message)?;

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// A non-empty collection of validation errors.
///
/// `ValidationErrors` wraps a `NonEmptyVec<ValidationError>`, so a failed
/// check always carries at least one mismatch. Independent mismatches are
/// combined with [`Semigroup::combine`] rather than collapsed:
///
/// ```rust
/// use shapecheck::{Location, ValidationError, ValidationErrors};
/// use stillwater::prelude::*;
///
/// let a = ValidationErrors::single(ValidationError::new(Location::from_field("a"), "one"));
/// let b = ValidationErrors::single(ValidationError::new(Location::from_field("b"), "two"));
///
/// let combined = a.combine(b);
/// assert_eq!(combined.len(), 2);
/// assert_eq!(combined.report().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    /// Creates a collection containing a single error.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a `Vec`, or `None` if it is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Succeeds with `value` if no errors were collected.
    pub(crate) fn collect<T>(value: T, errors: Vec<ValidationError>) -> Validation<T, Self> {
        match Self::from_vec(errors) {
            None => Validation::Success(value),
            Some(errors) => Validation::Failure(errors),
        }
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Returns all errors at the specified location.
    pub fn at_location(&self, location: &Location) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| &e.location == location).collect()
    }

    /// Returns all errors of the specified kind.
    pub fn with_kind(&self, kind: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.kind == kind).collect()
    }

    /// Returns the distinct error locations, in the order first reported.
    pub fn locations(&self) -> Vec<&Location> {
        self.report().into_keys().collect()
    }

    /// Groups the errors by location, in the order first reported.
    pub fn report(&self) -> IndexMap<&Location, Vec<&ValidationError>> {
        let mut report: IndexMap<&Location, Vec<&ValidationError>> = IndexMap::new();
        for error in self.0.iter() {
            report.entry(&error.location).or_default().push(error);
        }
        report
    }

    /// Exports the errors as a JSON array of records.
    ///
    /// Each record has `loc` (field names and indices), `type`, `msg` and,
    /// when known, `got` and `expected`.
    pub fn to_json(&self) -> serde_json::Value {
        let records = self
            .0
            .iter()
            .map(|error| {
                let loc: Vec<serde_json::Value> = error
                    .location
                    .segments()
                    .map(|segment| match segment {
                        PathSegment::Field(name) => json!(name),
                        PathSegment::Index(idx) => json!(idx),
                    })
                    .collect();
                let mut record = json!({
                    "loc": loc,
                    "type": error.kind,
                    "msg": error.message,
                });
                if let Some(ref got) = error.got {
                    record["got"] = json!(got);
                }
                if let Some(ref expected) = error.expected {
                    record["expected"] = json!(expected);
                }
                record
            })
            .collect();
        serde_json::Value::Array(records)
    }

    /// Converts this collection into a `Vec<ValidationError>`.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = Box<dyn Iterator<Item = &'a ValidationError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationErrors>();
    assert_sync::<ValidationErrors>();
};
