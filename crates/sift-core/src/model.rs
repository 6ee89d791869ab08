//! Host object model seam: how named properties are read from values and how
//! values are tested against type tags.

use crate::{
    extract::ResolveError,
    value::{Value, ValueTag},
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ObjectModel
///
/// Host-provided property access. The engine chains calls to this trait and
/// never introspects concrete value types itself.
///

pub trait ObjectModel: Send + Sync {
    /// Resolve property `name` on a non-null `value`.
    fn resolve_property(&self, value: &Value, name: &str) -> Result<Value, ResolveError>;

    /// Covariant type-membership test for a non-null value.
    fn is_instance(&self, value: &Value, tag: &TypeTag) -> bool {
        tag.admits(value)
    }
}

///
/// RecordModel
///
/// Default object model: record fields by name, plus `len` / `is_empty` on
/// text and list values.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct RecordModel;

impl ObjectModel for RecordModel {
    fn resolve_property(&self, value: &Value, name: &str) -> Result<Value, ResolveError> {
        let resolved = match (value, name) {
            (Value::Record(record), _) => record.field(name).cloned(),
            (Value::Text(text), "len") => Some(count_value(text.chars().count())),
            (Value::Text(text), "is_empty") => Some(Value::Bool(text.is_empty())),
            (Value::List(items), "len") => Some(count_value(items.len())),
            (Value::List(items), "is_empty") => Some(Value::Bool(items.is_empty())),
            _ => None,
        };

        resolved.ok_or_else(|| ResolveError::MissingProperty {
            name: name.to_string(),
            kind: value.tag(),
        })
    }
}

fn count_value(count: usize) -> Value {
    Value::Int(i64::try_from(count).unwrap_or(i64::MAX))
}

///
/// TypeTag
///
/// Type-membership target for `InstanceOf` predicates.
///
/// Any             → every non-null value
/// Number          → Int and Float
/// Record(None)    → any record
/// Record(Some(n)) → records of type `n` or declaring `n` as a supertype
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum TypeTag {
    Any,
    Bool,
    Number,
    Int,
    Float,
    Text,
    List,
    Record(Option<String>),
}

impl TypeTag {
    #[must_use]
    pub fn record(name: impl Into<String>) -> Self {
        Self::Record(Some(name.into()))
    }

    /// Default covariant membership test. Null is never an instance.
    #[must_use]
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value.tag()) {
            (_, ValueTag::Null) => false,
            (Self::Any, _)
            | (Self::Bool, ValueTag::Bool)
            | (Self::Number | Self::Int, ValueTag::Int)
            | (Self::Number | Self::Float, ValueTag::Float)
            | (Self::Text, ValueTag::Text)
            | (Self::List, ValueTag::List)
            | (Self::Record(None), ValueTag::Record) => true,
            (Self::Record(Some(name)), ValueTag::Record) => {
                value.as_record().is_some_and(|record| record.is_a(name))
            }
            _ => false,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Bool => f.write_str("bool"),
            Self::Number => f.write_str("number"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Text => f.write_str("text"),
            Self::List => f.write_str("list"),
            Self::Record(None) => f.write_str("record"),
            Self::Record(Some(name)) => write!(f, "record<{name}>"),
        }
    }
}

///
/// TESTS
///
