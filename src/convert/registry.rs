//! The conversion registry: ordered dispatch over field kinds.
//!
//! [`ConversionRegistry`] holds the field kinds in dispatch order and turns
//! expected shapes into rules. Conversions of structural root shapes are
//! memoised in a bounded cache, so repeated checks against the same shape are
//! built once.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::ConversionError;
use crate::path::Location;
use crate::schema::TypeExpr;
use crate::shape::Shape;

use super::context::{ConversionContext, Converter};
use super::kinds::{dynamic_kinds, static_kinds, FieldKind};
use super::rule::Rule;

/// The number of converted shapes a registry keeps by default.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// A thread-safe registry of field kinds.
///
/// Static kinds are always asked before dynamic (recursive) kinds, whatever
/// order they were registered in; within each group, registration order is
/// kept. The first kind that recognises a shape wins.
///
/// # Thread Safety
///
/// The memo cache uses `parking_lot::RwLock`:
/// - Multiple threads can look up converted shapes concurrently
/// - Storing a newly converted shape is serialized
///
/// Only whole shapes are memoised, never their parts. Once the cache holds
/// its capacity, the oldest entry is dropped for each new one.
///
/// # Example
///
/// ```rust
/// use shapecheck::{ConversionRegistry, Shape, TypeExpr};
///
/// let registry = ConversionRegistry::contains();
///
/// let rule = registry.convert(&Shape::list([TypeExpr::Int, TypeExpr::Str])).unwrap();
/// assert_eq!(rule.type_expr(), &TypeExpr::tuple([TypeExpr::Int, TypeExpr::Str]));
/// assert!(rule.is_required());
/// ```
pub struct ConversionRegistry {
    field_kinds: Vec<Arc<dyn FieldKind>>,
    cache: Option<RwLock<IndexMap<String, Rule>>>,
    cache_capacity: usize,
}

impl ConversionRegistry {
    /// Starts an empty registry with caching enabled.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Creates the registry used by contains checks.
    ///
    /// The kinds are, in order: nothing, something, anything, literal,
    /// equality constant, type expression, type generator, then mapping and
    /// sequence.
    pub fn contains() -> Self {
        Self::builder().with_standard_kinds().build()
    }

    /// Returns the field kinds in dispatch order.
    pub fn field_kinds(&self) -> impl Iterator<Item = &dyn FieldKind> {
        self.field_kinds.iter().map(|kind| kind.as_ref())
    }

    /// Converts an expected shape into a rule.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError` carrying the first part of the shape that no
    /// field kind recognises, and its location inside the shape.
    pub fn convert(&self, shape: &Shape) -> Result<Rule, ConversionError> {
        self.convert_at(shape, &Location::root())
    }

    /// Converts an expected shape into a rule; same as [`convert`](Self::convert).
    pub fn convert_to_field(&self, shape: &Shape) -> Result<Rule, ConversionError> {
        self.convert(shape)
    }

    /// Converts an expected shape, keeping only its type expression.
    pub fn convert_to_type(&self, shape: &Shape) -> Result<TypeExpr, ConversionError> {
        self.convert(shape).map(Rule::into_type_expr)
    }

    /// Converts an expected shape into a rule read under `alias`.
    pub fn convert_aliased_field(
        &self,
        shape: &Shape,
        alias: impl Into<String>,
    ) -> Result<Rule, ConversionError> {
        self.convert(shape).map(|rule| rule.with_alias(alias))
    }

    /// Returns the number of memoised conversions.
    pub fn cached_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.read().len())
    }

    /// Forgets every memoised conversion.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.write().clear();
        }
    }

    fn cached(&self, key: &str) -> Option<Rule> {
        self.cache.as_ref()?.read().get(key).cloned()
    }

    fn store(&self, key: String, rule: &Rule) {
        let Some(cache) = &self.cache else {
            return;
        };
        let mut cache = cache.write();
        if cache.len() >= self.cache_capacity && !cache.contains_key(&key) {
            cache.shift_remove_index(0);
        }
        if self.cache_capacity > 0 {
            cache.insert(key, rule.clone());
        }
    }
}

impl Converter for ConversionRegistry {
    fn convert_at(&self, shape: &Shape, location: &Location) -> Result<Rule, ConversionError> {
        let key = match &self.cache {
            Some(_) if location.is_root() => shape.cache_key(),
            _ => None,
        };
        if let Some(rule) = key.as_deref().and_then(|key| self.cached(key)) {
            trace!(%location, "reusing converted shape");
            return Ok(rule);
        }

        let ctx = ConversionContext::new(self, location.clone());
        for kind in &self.field_kinds {
            if let Some(rule) = kind.convert(shape, &ctx)? {
                trace!(%location, kind = kind.name(), "field kind matched");
                if let Some(key) = key {
                    self.store(key, &rule);
                }
                return Ok(rule);
            }
        }

        debug!(%location, %shape, "no field kind matched");
        Err(ConversionError::new(location.clone(), shape.clone()))
    }
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self::contains()
    }
}

impl fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRegistry")
            .field(
                "field_kinds",
                &self.field_kinds().map(|kind| kind.name()).collect::<Vec<_>>(),
            )
            .field("cached", &self.cached_len())
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}

/// Builder for [`ConversionRegistry`].
///
/// # Example
///
/// ```rust
/// use shapecheck::ConversionRegistry;
///
/// let registry = ConversionRegistry::builder()
///     .with_standard_kinds()
///     .cache(false)
///     .build();
///
/// let names: Vec<&str> = registry.field_kinds().map(|kind| kind.name()).collect();
/// assert_eq!(names.first(), Some(&"nothing"));
/// assert_eq!(names.last(), Some(&"sequence"));
/// ```
pub struct RegistryBuilder {
    static_kinds: Vec<Arc<dyn FieldKind>>,
    dynamic_kinds: Vec<Arc<dyn FieldKind>>,
    cache: bool,
    cache_capacity: usize,
}

impl RegistryBuilder {
    /// Creates a builder with no kinds and caching enabled.
    pub fn new() -> Self {
        Self {
            static_kinds: Vec::new(),
            dynamic_kinds: Vec::new(),
            cache: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Appends the standard static and dynamic kinds.
    pub fn with_standard_kinds(mut self) -> Self {
        self.static_kinds.extend(static_kinds());
        self.dynamic_kinds.extend(dynamic_kinds());
        self
    }

    /// Appends a kind that looks at single shapes.
    pub fn field_kind(mut self, kind: impl FieldKind + 'static) -> Self {
        self.static_kinds.push(Arc::new(kind));
        self
    }

    /// Appends a kind that recurses into nested shapes.
    ///
    /// Dynamic kinds run after every static kind.
    pub fn dynamic_kind(mut self, kind: impl FieldKind + 'static) -> Self {
        self.dynamic_kinds.push(Arc::new(kind));
        self
    }

    /// Enables or disables memoisation of converted shapes.
    pub fn cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }

    /// Sets how many converted shapes are kept.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn build(self) -> ConversionRegistry {
        let mut field_kinds = self.static_kinds;
        field_kinds.extend(self.dynamic_kinds);
        ConversionRegistry {
            field_kinds,
            cache: self.cache.then(|| RwLock::new(IndexMap::new())),
            cache_capacity: self.cache_capacity,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConversionRegistry>();
    assert_sync::<ConversionRegistry>();
};
