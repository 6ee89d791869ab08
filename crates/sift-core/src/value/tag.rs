use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ValueTag
///
/// Stable value-variant tag used by diagnostics and error payloads.
///

#[repr(u8)]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ValueTag {
    Null = 1,
    Bool = 2,
    Int = 3,
    Float = 4,
    Text = 5,
    List = 6,
    Record = 7,
}

impl ValueTag {
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::List => "list",
            Self::Record => "record",
        }
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[must_use]
pub(super) const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Null => ValueTag::Null,
        Value::Bool(_) => ValueTag::Bool,
        Value::Int(_) => ValueTag::Int,
        Value::Float(_) => ValueTag::Float,
        Value::Text(_) => ValueTag::Text,
        Value::List(_) => ValueTag::List,
        Value::Record(_) => ValueTag::Record,
    }
}
