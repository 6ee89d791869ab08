//! Self-describing binary format for predicate and extractor trees.
//!
//! ```text
//! stream := version:u8 node
//! node   := identity:str fields
//! str    := len:i32 utf8[len]
//! ```
//!
//! All integers are big-endian. Host accessor handles are written as their
//! own identity plus accessor-owned fields and resolved on decode through a
//! `Registry`.

mod limits;
mod node;
mod reader;
mod registry;
mod writer;


use crate::{
    extract::Extractor,
    predicate::Predicate,
    value::{Value, ValueTag},
};
use thiserror::Error as ThisError;
use tracing::debug;

// re-exports
pub use limits::CodecLimits;
pub use reader::Reader;
pub use registry::{AccessorDecodeFn, Registry, RegistryError};
pub use writer::Writer;

/// Current wire format version. Decoders reject any other value.
pub const FORMAT_VERSION: u8 = 1;

///
/// EncodeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EncodeError {
    #[error("{kind} literals are not encodable")]
    UnencodableLiteral { kind: ValueTag },

    #[error("length {len} exceeds the wire format's i32 prefix")]
    LengthOverflow { len: usize },

    #[error("composite predicate has no children")]
    EmptyComposite,

    #[error("accessor '{identity}' failed to encode: {message}")]
    Accessor { identity: String, message: String },
}

///
/// DecodeError
///
/// Every variant that can point at a position carries the byte offset of the
/// item that failed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DecodeError {
    #[error("unsupported format version {found} (expected {expected})")]
    UnsupportedVersion { found: u8, expected: u8 },

    #[error("payload size {len} exceeds limit {max}")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("truncated stream at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("unresolvable type identity '{identity}' at offset {offset}")]
    UnknownType { identity: String, offset: usize },

    #[error("type identity '{identity}' at offset {offset} is not a valid {expected}")]
    UnexpectedType {
        identity: String,
        expected: &'static str,
        offset: usize,
    },

    #[error("invalid boolean byte {byte:#04x} at offset {offset}")]
    InvalidBool { byte: u8, offset: usize },

    #[error("invalid literal kind {kind} at offset {offset}")]
    InvalidLiteralKind { kind: u8, offset: usize },

    #[error("invalid type tag {tag} at offset {offset}")]
    InvalidTypeTag { tag: u8, offset: usize },

    #[error("invalid UTF-8 string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("negative length {len} at offset {offset}")]
    NegativeLength { len: i32, offset: usize },

    #[error("{limit} {value} exceeds limit {max} at offset {offset}")]
    LimitExceeded {
        limit: &'static str,
        value: usize,
        max: usize,
        offset: usize,
    },

    #[error("composite predicate at offset {offset} has no children")]
    EmptyComposite { offset: usize },

    #[error("extractor at offset {offset} has no steps")]
    EmptyExtractor { offset: usize },

    #[error("{remaining} trailing bytes after root node at offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },

    #[error("accessor '{identity}' failed to decode: {message}")]
    Accessor { identity: String, message: String },
}

impl EncodeError {
    /// Failure raised by a host accessor's own field writer.
    pub fn accessor(identity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Accessor {
            identity: identity.into(),
            message: message.into(),
        }
    }
}

impl DecodeError {
    /// Failure raised by a host accessor's own field decoder.
    pub fn accessor(identity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Accessor {
            identity: identity.into(),
            message: message.into(),
        }
    }
}

///
/// NodeKind
///
/// Built-in node identities. These strings are part of the wire format and
/// must never change.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NodeKind {
    Equal,
    Compare,
    Between,
    InstanceOf,
    Not,
    AndOr,
    Extractor,
}

impl NodeKind {
    pub(crate) const fn identity(self) -> &'static str {
        match self {
            Self::Equal => "sift.predicate.Equal",
            Self::Compare => "sift.predicate.Compare",
            Self::Between => "sift.predicate.Between",
            Self::InstanceOf => "sift.predicate.InstanceOf",
            Self::Not => "sift.predicate.Not",
            Self::AndOr => "sift.predicate.AndOr",
            Self::Extractor => "sift.extract.Property",
        }
    }

    pub(crate) fn from_identity(identity: &str) -> Option<Self> {
        let kind = match identity {
            "sift.predicate.Equal" => Self::Equal,
            "sift.predicate.Compare" => Self::Compare,
            "sift.predicate.Between" => Self::Between,
            "sift.predicate.InstanceOf" => Self::InstanceOf,
            "sift.predicate.Not" => Self::Not,
            "sift.predicate.AndOr" => Self::AndOr,
            "sift.extract.Property" => Self::Extractor,
            _ => return None,
        };

        Some(kind)
    }

    pub(crate) const fn of(predicate: &Predicate) -> Self {
        match predicate {
            Predicate::Equal(_) => Self::Equal,
            Predicate::Compare(_) => Self::Compare,
            Predicate::Between(_) => Self::Between,
            Predicate::InstanceOf(_) => Self::InstanceOf,
            Predicate::Not(_) => Self::Not,
            Predicate::AndOr(_) => Self::AndOr,
        }
    }
}

///
/// LiteralKind
///
/// Closed set of encodable literal kinds. Lists and records have no tag and
/// are rejected at encode time.
///

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum LiteralKind {
    Int = 1,
    Text = 2,
    Bool = 3,
    Float = 4,
    Null = 5,
}

impl LiteralKind {
    pub(crate) const fn to_u8(self) -> u8 {
        self as u8
    }

    pub(crate) const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Int),
            2 => Some(Self::Text),
            3 => Some(Self::Bool),
            4 => Some(Self::Float),
            5 => Some(Self::Null),
            _ => None,
        }
    }

    pub(crate) const fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Int(_) => Some(Self::Int),
            Value::Text(_) => Some(Self::Text),
            Value::Bool(_) => Some(Self::Bool),
            Value::Float(_) => Some(Self::Float),
            Value::Null => Some(Self::Null),
            Value::List(_) | Value::Record(_) => None,
        }
    }
}

// ---- public surface ----------------------------------------------------

/// Encode a predicate tree.
pub fn encode(predicate: &Predicate) -> Result<Vec<u8>, EncodeError> {
    let mut out = Writer::new();
    out.write_u8(FORMAT_VERSION);
    node::write_predicate(&mut out, predicate)?;

    Ok(out.into_bytes())
}

/// Decode a predicate tree with no size, depth or fan-out bounds.
///
/// Accepts everything `encode` produces. Use [`decode_with_limits`] for
/// payloads from untrusted peers.
pub fn decode(bytes: &[u8], registry: &Registry) -> Result<Predicate, DecodeError> {
    decode_with_limits(bytes, registry, CodecLimits::unbounded())
}

/// Decode a predicate tree under explicit limits.
pub fn decode_with_limits(
    bytes: &[u8],
    registry: &Registry,
    limits: CodecLimits,
) -> Result<Predicate, DecodeError> {
    decode_root(bytes, limits, |input| node::read_predicate(input, registry))
}

/// Encode a standalone extractor.
pub fn encode_extractor(extractor: &Extractor) -> Result<Vec<u8>, EncodeError> {
    let mut out = Writer::new();
    out.write_u8(FORMAT_VERSION);
    node::write_extractor(&mut out, extractor)?;

    Ok(out.into_bytes())
}

/// Decode a standalone extractor with no bounds.
pub fn decode_extractor(bytes: &[u8], registry: &Registry) -> Result<Extractor, DecodeError> {
    decode_extractor_with_limits(bytes, registry, CodecLimits::unbounded())
}

/// Decode a standalone extractor under explicit limits.
pub fn decode_extractor_with_limits(
    bytes: &[u8],
    registry: &Registry,
    limits: CodecLimits,
) -> Result<Extractor, DecodeError> {
    decode_root(bytes, limits, |input| node::read_extractor(input, registry))
}

// Shared envelope: size bound, version byte, root node, no trailing bytes.
fn decode_root<T>(
    bytes: &[u8],
    limits: CodecLimits,
    read: impl FnOnce(&mut Reader<'_>) -> Result<T, DecodeError>,
) -> Result<T, DecodeError> {
    decode_envelope(bytes, limits, read).inspect_err(|err| {
        debug!(error = %err, len = bytes.len(), "predicate decode failed");
    })
}

fn decode_envelope<T>(
    bytes: &[u8],
    limits: CodecLimits,
    read: impl FnOnce(&mut Reader<'_>) -> Result<T, DecodeError>,
) -> Result<T, DecodeError> {
    if bytes.len() > limits.max_bytes {
        return Err(DecodeError::PayloadTooLarge {
            len: bytes.len(),
            max: limits.max_bytes,
        });
    }

    let mut input = Reader::new(bytes, limits);
    let version = input.read_u8()?;
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion {
            found: version,
            expected: FORMAT_VERSION,
        });
    }

    let root = read(&mut input)?;
    if input.remaining() > 0 {
        return Err(DecodeError::TrailingBytes {
            offset: input.offset(),
            remaining: input.remaining(),
        });
    }

    Ok(root)
}
