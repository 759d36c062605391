//! Locations inside nested values.
//!
//! A [`Location`] is the sequence of field names and list indices leading from
//! the root of a value to one of its parts. Validation errors are keyed by the
//! location of the mismatch, and conversion errors by the location of the
//! offending part of the expected shape.

use std::fmt::{self, Display};

/// One step of a [`Location`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// A field, key or attribute name (e.g. `user`), or a union member label.
    Field(String),
    /// A position in a list or tuple (e.g. `[0]`).
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A path from the root of a value to one of its parts.
///
/// Locations are immutable: `push_*` returns a new location and leaves the
/// original untouched, so sibling fields can branch from a shared parent.
///
/// # Example
///
/// ```rust
/// use shapecheck::Location;
///
/// let location = Location::root()
///     .push_field("c")
///     .push_index(0)
///     .push_field("e");
///
/// assert_eq!(location.to_string(), "c[0].e");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Location {
    segments: Vec<PathSegment>,
}

impl Location {
    /// Creates an empty location representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a location from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Creates a location from a single index segment.
    pub fn from_index(idx: usize) -> Self {
        Self {
            segments: vec![PathSegment::Index(idx)],
        }
    }

    /// Returns a new location with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new location with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    /// Returns a new location with `segment` appended.
    pub fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Returns true if this is the root location (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this location has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl FromIterator<PathSegment> for Location {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_location_is_empty() {
        let location = Location::root();
        assert!(location.is_root());
        assert!(location.is_empty());
        assert_eq!(location.len(), 0);
        assert_eq!(location.to_string(), "");
    }

    #[test]
    fn test_field_with_index() {
        let location = Location::root().push_field("c").push_index(0);
        assert_eq!(location.to_string(), "c[0]");
    }

    #[test]
    fn test_leading_index() {
        let location = Location::root().push_index(1).push_field("name");
        assert_eq!(location.to_string(), "[1].name");
    }

    #[test]
    fn test_branching_keeps_parent() {
        let base = Location::root().push_field("e");
        let left = base.push_field("g");
        let right = base.push_field("b");

        assert_eq!(base.to_string(), "e");
        assert_eq!(left.to_string(), "e.g");
        assert_eq!(right.to_string(), "e.b");
    }

    #[test]
    fn test_collect_from_segments() {
        let location: Location = ["c".into(), 0.into(), "e".into()].into_iter().collect();
        assert_eq!(location, Location::root().push_field("c").push_index(0).push_field("e"));
        assert_eq!(location.to_string(), "c[0].e");
    }

    #[test]
    fn test_distinct_locations_are_distinct_keys() {
        let a = Location::from_field("a");
        let b = Location::from_field("b");
        let nested = Location::from_field("a").push_index(0);

        assert_ne!(a, b);
        assert_ne!(a, nested);
        assert_eq!(Location::from_index(5).to_string(), "[5]");
    }
}
