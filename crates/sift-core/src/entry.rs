use crate::value::Value;

///
/// Entry
///
/// Key/value pair owned by the storage layer. Predicates only ever read the
/// value side and never mutate the entry.
///

pub trait Entry {
    fn value(&self) -> &Value;
}

///
/// MapEntry
///
/// In-memory entry used by callers that already hold decoded values.
///

#[derive(Clone, Debug, PartialEq)]
pub struct MapEntry {
    key: Value,
    value: Value,
}

impl MapEntry {
    #[must_use]
    pub fn new(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub const fn key(&self) -> &Value {
        &self.key
    }
}

impl Entry for MapEntry {
    fn value(&self) -> &Value {
        &self.value
    }
}

impl Entry for Value {
    fn value(&self) -> &Value {
        self
    }
}
