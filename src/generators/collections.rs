//! Collection generators.

use std::collections::HashSet;
use std::fmt::Display;

use indexmap::{IndexMap, IndexSet};
use ordered_float::OrderedFloat;

use super::TypeGenerator;
use crate::schema::TypeExpr;
use crate::shape::Shape;
use crate::value::{Literal, Value};

/// A list that must hold a set of literal items, in any order.
///
/// Booleans and numbers are compared by value, so a required `1` is met by
/// `true` or `1.0`. The check reports only the first problem it finds, in
/// this order:
///
/// 1. required items that are missing (`items missing: {…}`)
/// 2. items that were not required, unless `check_extra` is off
///    (`extra items found: {…}`)
/// 3. items that occur more than once, unless `check_repeats` is off
///    (`repeating items found: {…}`)
///
/// # Example
///
/// ```rust
/// use shapecheck::{contains, Shape, UnorderedLiteralCollection, Value};
///
/// let tags = UnorderedLiteralCollection::new([1, 2]).check_repeats(false);
/// let expected = Shape::map([("tags", Shape::from(tags))]);
///
/// assert!(contains(Value::map([("tags", Value::list([2, 1, 2]))]), expected.clone()).is_ok());
///
/// let error = contains(Value::map([("tags", Value::list([1]))]), expected).unwrap_err();
/// let mismatch = error.mismatches().unwrap().first();
/// assert_eq!(mismatch.message, "Value error, items missing: {2}");
/// ```
#[derive(Debug, Clone)]
pub struct UnorderedLiteralCollection {
    items: IndexSet<Literal>,
    check_extra: bool,
    check_repeats: bool,
    item_type: TypeExpr,
}

impl UnorderedLiteralCollection {
    /// Creates a collection requiring `items`, with both checks enabled.
    pub fn new<L: Into<Literal>>(items: impl IntoIterator<Item = L>) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            check_extra: true,
            check_repeats: true,
            item_type: TypeExpr::literal_type(),
        }
    }

    /// Sets whether items that were not required are an error.
    pub fn check_extra(mut self, enabled: bool) -> Self {
        self.check_extra = enabled;
        self
    }

    /// Sets whether repeated items are an error.
    pub fn check_repeats(mut self, enabled: bool) -> Self {
        self.check_repeats = enabled;
        self
    }

    /// Sets the type each item is validated against before the checks.
    ///
    /// The default, [`TypeExpr::literal_type`], reports every non-literal
    /// item at its own index. With `Any`, such items fail the check as
    /// `unhashable items found: {…}`.
    pub fn item_type(mut self, item_type: TypeExpr) -> Self {
        self.item_type = item_type;
        self
    }

    pub fn items(&self) -> impl Iterator<Item = &Literal> {
        self.items.iter()
    }
}

fn render_set<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    let rendered: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    format!("{{{}}}", rendered.join(", "))
}

/// Set identity of a literal: booleans and numbers compare by numeric value,
/// so `True`, `1` and `1.0` are one item.
#[derive(Debug, PartialEq, Eq, Hash)]
enum ItemKey<'a> {
    Int(i64),
    Float(OrderedFloat<f64>),
    Other(&'a Literal),
}

impl<'a> ItemKey<'a> {
    fn of(literal: &'a Literal) -> Self {
        match literal {
            Literal::Bool(b) => ItemKey::Int(i64::from(*b)),
            Literal::Int(i) => ItemKey::Int(*i),
            Literal::Float(x)
                if x.0.fract() == 0.0 && x.0 >= i64::MIN as f64 && x.0 < i64::MAX as f64 =>
            {
                ItemKey::Int(x.0 as i64)
            }
            Literal::Float(x) => ItemKey::Float(*x),
            other => ItemKey::Other(other),
        }
    }
}

/// Builds a set of literals keyed by numeric identity, keeping the first
/// literal seen for each key.
fn literal_set<'a>(
    literals: impl IntoIterator<Item = &'a Literal>,
) -> IndexMap<ItemKey<'a>, &'a Literal> {
    let mut set = IndexMap::new();
    for literal in literals {
        set.entry(ItemKey::of(literal)).or_insert(literal);
    }
    set
}

impl TypeGenerator for UnorderedLiteralCollection {
    fn data_type(&self) -> TypeExpr {
        TypeExpr::list(self.item_type.clone())
    }

    fn check(&self, value: &Value) -> Result<(), String> {
        let Some(elements) = value.as_list() else {
            return Err(format!("expected a list, got {}", value));
        };

        let mut literals = Vec::with_capacity(elements.len());
        let mut unhashable = Vec::new();
        for element in elements {
            match Literal::from_value(element) {
                Some(literal) => literals.push(literal),
                None => unhashable.push(element),
            }
        }
        if !unhashable.is_empty() {
            return Err(format!("unhashable items found: {}", render_set(unhashable)));
        }

        let required = literal_set(&self.items);
        let present = literal_set(&literals);

        let missing: Vec<&Literal> = required
            .iter()
            .filter(|(key, _)| !present.contains_key(*key))
            .map(|(_, literal)| *literal)
            .collect();
        if !missing.is_empty() {
            return Err(format!("items missing: {}", render_set(missing)));
        }

        if self.check_extra {
            let extra: Vec<&Literal> = present
                .iter()
                .filter(|(key, _)| !required.contains_key(*key))
                .map(|(_, literal)| *literal)
                .collect();
            if !extra.is_empty() {
                return Err(format!("extra items found: {}", render_set(extra)));
            }
        }

        if self.check_repeats {
            let mut seen = HashSet::new();
            let mut repeats = IndexMap::new();
            for literal in &literals {
                let key = ItemKey::of(literal);
                if seen.contains(&key) {
                    repeats.entry(key).or_insert(literal);
                } else {
                    seen.insert(key);
                }
            }
            if !repeats.is_empty() {
                return Err(format!("repeating items found: {}", render_set(repeats.values())));
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "UnorderedLiteralCollection"
    }
}

impl From<UnorderedLiteralCollection> for Shape {
    fn from(collection: UnorderedLiteralCollection) -> Self {
        Shape::generator(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(collection: &UnorderedLiteralCollection, items: Value) -> Result<(), String> {
        collection.check(&items)
    }

    #[test]
    fn test_missing_is_reported_first() {
        let collection = UnorderedLiteralCollection::new(["hey", "you"]);
        let result = check(&collection, Value::list(["you", "extra", "extra"]));
        assert_eq!(result.unwrap_err(), "items missing: {'hey'}");
    }

    #[test]
    fn test_extra_before_repeats() {
        let collection = UnorderedLiteralCollection::new([1, 2]);
        let result = check(&collection, Value::list([1, 2, 3, 2]));
        assert_eq!(result.unwrap_err(), "extra items found: {3}");
    }

    #[test]
    fn test_repeats_listed_once_each() {
        let collection = UnorderedLiteralCollection::new([1, 2]);
        let result = check(&collection, Value::list([2, 1, 2, 2, 1]));
        assert_eq!(result.unwrap_err(), "repeating items found: {2, 1}");
    }

    #[test]
    fn test_empty_requirement_with_extra_check() {
        let collection = UnorderedLiteralCollection::new(Vec::<i64>::new());
        assert!(check(&collection, Value::List(Vec::new())).is_ok());
        assert_eq!(
            check(&collection, Value::list([5])).unwrap_err(),
            "extra items found: {5}"
        );
    }

    #[test]
    fn test_numbers_compare_by_value() {
        let collection = UnorderedLiteralCollection::new([1, 2]);
        assert!(check(&collection, Value::list([Value::Bool(true), Value::Int(2)])).is_ok());
        assert!(check(&collection, Value::list([Value::Float(1.0), Value::Float(2.0)])).is_ok());
        assert_eq!(
            check(&collection, Value::list([Value::Int(1), Value::Bool(true), Value::Int(2)]))
                .unwrap_err(),
            "repeating items found: {True}"
        );
        assert_eq!(
            check(&collection, Value::list([Value::Int(1), Value::Float(2.5)])).unwrap_err(),
            "items missing: {2}"
        );
    }

    #[test]
    fn test_strings_do_not_equal_numbers() {
        let collection = UnorderedLiteralCollection::new([1]);
        assert_eq!(
            check(&collection, Value::list(["1"])).unwrap_err(),
            "items missing: {1}"
        );
    }

    #[test]
    fn test_unhashable_items() {
        let collection = UnorderedLiteralCollection::new([1]).item_type(TypeExpr::Any);
        assert_eq!(
            check(&collection, Value::list([Value::Int(1), Value::Null])).unwrap_err(),
            "unhashable items found: {None}"
        );
    }

    #[test]
    fn test_data_type_wraps_item_type() {
        let collection = UnorderedLiteralCollection::new(["a"]);
        assert_eq!(collection.data_type(), TypeExpr::list(TypeExpr::literal_type()));

        let collection = collection.item_type(TypeExpr::Str);
        assert_eq!(collection.data_type(), TypeExpr::list(TypeExpr::Str));
        assert_eq!(collection.items().count(), 1);
    }
}
