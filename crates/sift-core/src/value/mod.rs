mod compare;
mod tag;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// re-exports
pub use compare::{strict_order_cmp, value_eq};
pub use tag::ValueTag;

///
/// Value
///
/// Runtime value model exposed by the host store to predicates.
///
/// Null   → absent value; equal only to another Null, never orderable.
/// Record → named object with fields, the only value that carries a type
///          hierarchy for covariant instance tests.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Ordered list of values. Lists support equality but not ordering.
    List(Vec<Self>),
    Record(Record),
}

impl Value {
    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        tag::canonical_tag(self)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Self::Record(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

///
/// Record
///
/// Named host object. Supertypes are listed most-specific first and are only
/// consulted by instance tests; field lookup never walks them.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Record {
    type_name: String,
    supertypes: Vec<String>,
    fields: BTreeMap<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            supertypes: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_supertype(mut self, name: impl Into<String>) -> Self {
        self.supertypes.push(name.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// True when the record's own type or one of its supertypes is `name`.
    #[must_use]
    pub fn is_a(&self, name: &str) -> bool {
        self.type_name == name || self.supertypes.iter().any(|s| s == name)
    }
}
