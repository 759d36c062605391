//! The data model for actual values.
//!
//! [`Value`] is what a contains check inspects: nested maps, lists, scalars,
//! dates and times, enum members and attribute-bearing objects. [`Literal`] is
//! the hashable subset of scalars that can appear as exact-match literals.

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use ordered_float::OrderedFloat;

/// A dynamically typed value under test.
///
/// Integers and floats are distinct variants, and so are booleans and
/// integers: `Value::Bool(true)` is never the same as `Value::Int(1)`.
///
/// # Example
///
/// ```rust
/// use shapecheck::Value;
/// use serde_json::json;
///
/// let from_json = Value::from(json!({"a": "3", "b": [1, 2.5]}));
/// let built = Value::map([
///     ("a", Value::from("3")),
///     ("b", Value::list([Value::from(1), Value::from(2.5)])),
/// ]);
/// assert_eq!(from_json, built);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
    Str(String),
    Enum(EnumMember),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    Object(ObjectValue),
}

impl Value {
    /// Builds a byte-string value.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(bytes.into())
    }

    /// Builds a list value.
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a map value, keeping the given key order.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Reads a named part of the value: a key of a map or an attribute of an
    /// object. Every other value has no fields.
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.get(name),
            Value::Object(object) => object.attribute(name),
            _ => None,
        }
    }

    /// Returns true if fields can be read from this value.
    pub fn has_fields(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Object(_))
    }

    /// Returns the runtime type name of the value.
    ///
    /// Enum members report their enum's name and objects their own type name.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bytes(_) => "bytes",
            Value::Str(_) => "str",
            Value::Enum(member) => member.enum_name(),
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Map(_) => "dict",
            Value::Object(object) => object.type_name(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Bool(b) => write_bool(f, *b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write_float(f, *x),
            Value::Bytes(bytes) => write_bytes(f, bytes),
            Value::Str(s) => write_str(f, s),
            Value::Enum(member) => write!(f, "{}", member),
            Value::Date(date) => write!(f, "{}", date),
            Value::Time(time) => write!(f, "{}", time),
            Value::DateTime(datetime) => write!(f, "{}", datetime),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_str(f, key)?;
                    write!(f, ": {}", value)?;
                }
                write!(f, "}}")
            }
            Value::Object(object) => write!(f, "{}", object),
        }
    }
}

pub(crate) fn write_bool(f: &mut fmt::Formatter<'_>, b: bool) -> fmt::Result {
    f.write_str(if b { "True" } else { "False" })
}

pub(crate) fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        f.write_str("nan")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "inf" } else { "-inf" })
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        write!(f, "{:.1}", x)
    } else {
        write!(f, "{}", x)
    }
}

pub(crate) fn write_str(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    write!(f, "{}", quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{}", c)?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "{}", quote)
}

pub(crate) fn write_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    f.write_str("b'")?;
    for &byte in bytes {
        match byte {
            b'\\' => f.write_str("\\\\")?,
            b'\'' => f.write_str("\\'")?,
            b'\n' => f.write_str("\\n")?,
            b'\r' => f.write_str("\\r")?,
            b'\t' => f.write_str("\\t")?,
            0x20..=0x7e => write!(f, "{}", byte as char)?,
            _ => write!(f, "\\x{:02x}", byte)?,
        }
    }
    f.write_str("'")
}

/// A named enumeration: an ordered set of members, each carrying a value.
///
/// # Example
///
/// ```rust
/// use shapecheck::{EnumType, Value};
///
/// let color = EnumType::new("Color", [("RED", 1), ("GREEN", 2)]);
/// let red = color.member("RED").unwrap();
///
/// assert_eq!(red.value(), &Value::Int(1));
/// assert_eq!(red.to_string(), "<Color.RED: 1>");
/// assert_eq!(color.from_value(&Value::Int(2)), color.member("GREEN"));
/// ```
#[derive(Debug, PartialEq)]
pub struct EnumType {
    name: String,
    members: IndexMap<String, Value>,
}

impl EnumType {
    /// Creates a shared enum type from `(member name, member value)` pairs.
    pub fn new<K, V>(
        name: impl Into<String>,
        members: impl IntoIterator<Item = (K, V)>,
    ) -> Arc<Self>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Arc::new(Self {
            name: name.into(),
            members: members
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member with the given name.
    pub fn member(&self, name: &str) -> Option<EnumMember> {
        self.members
            .get_key_value(name)
            .map(|(name, value)| self.make_member(name, value))
    }

    /// Returns all members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = EnumMember> + '_ {
        self.members
            .iter()
            .map(|(name, value)| self.make_member(name, value))
    }

    /// Returns the first member whose value equals `value`.
    pub fn from_value(&self, value: &Value) -> Option<EnumMember> {
        self.members
            .iter()
            .find(|(_, member_value)| *member_value == value)
            .map(|(name, member_value)| self.make_member(name, member_value))
    }

    /// Returns true if `member` belongs to this enum.
    pub fn contains(&self, member: &EnumMember) -> bool {
        member.enum_name == self.name && self.members.contains_key(&member.name)
    }

    fn make_member(&self, name: &str, value: &Value) -> EnumMember {
        EnumMember {
            enum_name: self.name.clone(),
            name: name.to_string(),
            value: Box::new(value.clone()),
        }
    }
}

/// One member of an [`EnumType`].
///
/// Members compare by enum name and member name; the value is carried along
/// for display and lax matching.
#[derive(Debug, Clone)]
pub struct EnumMember {
    enum_name: String,
    name: String,
    value: Box<Value>,
}

impl EnumMember {
    pub fn enum_name(&self) -> &str {
        &self.enum_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl PartialEq for EnumMember {
    fn eq(&self, other: &Self) -> bool {
        self.enum_name == other.enum_name && self.name == other.name
    }
}

impl Eq for EnumMember {}

impl Hash for EnumMember {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.enum_name.hash(state);
        self.name.hash(state);
    }
}

impl Display for EnumMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}.{}: {}>", self.enum_name, self.name, self.value)
    }
}

/// An object exposing named attributes, such as a model instance.
///
/// Mapping shapes read objects through their attributes, and equality
/// constants compare them attribute by attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
    type_name: String,
    attributes: IndexMap<String, Value>,
}

impl ObjectValue {
    /// Creates an object of the given type with no attributes.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Adds an attribute and returns self for chaining.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Display for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        for (i, (name, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, ")")
    }
}

/// A scalar that can be matched exactly and stored in sets.
///
/// Matching is type-exact: `Literal::Int(1)` does not match `Value::Bool(true)`
/// and `Literal::Float(1.0)` does not match `Value::Int(1)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Bytes(Vec<u8>),
    Str(String),
    Enum(EnumMember),
}

impl Literal {
    /// Returns the literal for a scalar value.
    ///
    /// Containers, nulls, dates, objects and NaN have no literal form.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Literal::Bool(*b)),
            Value::Int(i) => Some(Literal::Int(*i)),
            Value::Float(x) if !x.is_nan() => Some(Literal::Float(OrderedFloat(*x))),
            Value::Bytes(bytes) => Some(Literal::Bytes(bytes.clone())),
            Value::Str(s) => Some(Literal::Str(s.clone())),
            Value::Enum(member) => Some(Literal::Enum(member.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(i) => Value::Int(*i),
            Literal::Float(x) => Value::Float(x.0),
            Literal::Bytes(bytes) => Value::Bytes(bytes.clone()),
            Literal::Str(s) => Value::Str(s.clone()),
            Literal::Enum(member) => Value::Enum(member.clone()),
        }
    }

    /// Returns true if `value` has this literal's exact type and value.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Literal::Bool(a), Value::Bool(b)) => a == b,
            (Literal::Int(a), Value::Int(b)) => a == b,
            (Literal::Float(a), Value::Float(b)) => a.0 == *b,
            (Literal::Bytes(a), Value::Bytes(b)) => a == b,
            (Literal::Str(a), Value::Str(b)) => a == b,
            (Literal::Enum(a), Value::Enum(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write_bool(f, *b),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(x) => write_float(f, x.0),
            Literal::Bytes(bytes) => write_bytes(f, bytes),
            Literal::Str(s) => write_str(f, s),
            Literal::Enum(member) => write!(f, "{}", member),
        }
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<i64> for Literal {
    fn from(i: i64) -> Self {
        Literal::Int(i)
    }
}

impl From<i32> for Literal {
    fn from(i: i32) -> Self {
        Literal::Int(i64::from(i))
    }
}

impl From<f64> for Literal {
    fn from(x: f64) -> Self {
        Literal::Float(OrderedFloat(x))
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Str(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Str(s)
    }
}

impl From<EnumMember> for Literal {
    fn from(member: EnumMember) -> Self {
        Literal::Enum(member)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Value::Date(date)
    }
}

impl From<NaiveTime> for Value {
    fn from(time: NaiveTime) -> Self {
        Value::Time(time)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(datetime: NaiveDateTime) -> Self {
        Value::DateTime(datetime)
    }
}

impl From<EnumMember> for Value {
    fn from(member: EnumMember) -> Self {
        Value::Enum(member)
    }
}

impl From<ObjectValue> for Value {
    fn from(object: ObjectValue) -> Self {
        Value::Object(object)
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        literal.to_value()
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Value::Int(i),
                (None, Some(x)) => Value::Float(x),
                (None, None) => Value::Null,
            },
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::List(items.into_iter().map(Into::into).collect()),
            Json::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_numbers_keep_integer_distinction() {
        assert_eq!(Value::from(json!(3)), Value::Int(3));
        assert_eq!(Value::from(json!(3.0)), Value::Float(3.0));
        assert_eq!(Value::from(json!(true)), Value::Bool(true));
        assert_ne!(Value::from(json!(true)), Value::Int(1));
    }

    #[test]
    fn test_repr_matches_python_style() {
        assert_eq!(Value::Null.to_string(), "None");
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Float(1.1).to_string(), "1.1");
        assert_eq!(Value::from("3").to_string(), "'3'");
        assert_eq!(Value::from("it's").to_string(), "\"it's\"");
        assert_eq!(Value::bytes(&b"te\x00st"[..]).to_string(), "b'te\\x00st'");
        assert_eq!(
            Value::map([("a", Value::list([1, 2]))]).to_string(),
            "{'a': [1, 2]}"
        );
    }

    #[test]
    fn test_get_field_reads_keys_and_attributes() {
        let map = Value::map([("g", "ger")]);
        let object = Value::from(ObjectValue::new("User").with_attribute("g", "ger"));

        assert_eq!(map.get_field("g"), Some(&Value::from("ger")));
        assert_eq!(object.get_field("g"), Some(&Value::from("ger")));
        assert_eq!(Value::Int(1).get_field("g"), None);
        assert!(object.has_fields());
    }

    #[test]
    fn test_literal_matching_is_type_exact() {
        assert!(Literal::Int(1).matches(&Value::Int(1)));
        assert!(!Literal::Int(1).matches(&Value::Bool(true)));
        assert!(!Literal::Bool(true).matches(&Value::Int(1)));
        assert!(!Literal::Float(OrderedFloat(1.0)).matches(&Value::Int(1)));
        assert!(!Literal::from("4").matches(&Value::Int(4)));
    }

    #[test]
    fn test_literal_from_value_rejects_non_scalars() {
        assert_eq!(Literal::from_value(&Value::Null), None);
        assert_eq!(Literal::from_value(&Value::Float(f64::NAN)), None);
        assert_eq!(Literal::from_value(&Value::list([1])), None);
        assert_eq!(Literal::from_value(&Value::Int(2)), Some(Literal::Int(2)));
    }

    #[test]
    fn test_enum_members_compare_by_identity() {
        let first = EnumType::new("Sample", [("A", 1), ("B", 2)]);
        let other = EnumType::new("Other", [("A", 1)]);

        assert_eq!(first.member("A"), first.member("A"));
        assert_ne!(first.member("A"), other.member("A"));
        assert!(first.member("C").is_none());
        assert_eq!(first.members().count(), 2);
        assert_eq!(Value::from(first.member("B").unwrap()).type_name(), "Sample");
    }
}
