//! Error types for conversions and validation failures.
//!
//! Two very different things can go wrong in a contains check:
//!
//! - the expected shape itself is malformed and cannot be converted into a
//!   rule ([`ConversionError`]), which is an authoring mistake and fails fast;
//! - the actual value does not match, which is reported as a non-empty
//!   collection of location-carrying [`ValidationError`]s.

mod conversion;
mod validation_error;

pub use conversion::{ContainsError, ConversionError, ModelError};
pub use validation_error::{ValidationError, ValidationErrors};

use crate::path::Location;

/// Renders a location for messages, naming the root explicitly.
pub(crate) fn location_label(location: &Location) -> String {
    if location.is_root() {
        "(root)".to_string()
    } else {
        location.to_string()
    }
}
