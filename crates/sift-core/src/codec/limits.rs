use serde::{Deserialize, Serialize};

///
/// CodecLimits
///
/// Decode-side bounds for untrusted predicate payloads. Size limits are
/// caller policy; the wire format itself carries no limits.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecLimits {
    /// Maximum total payload size in bytes.
    pub max_bytes: usize,

    /// Maximum nesting of predicate, extractor and accessor nodes.
    pub max_depth: usize,

    /// Maximum length in bytes of any single string.
    pub max_string_len: usize,

    /// Maximum children of one composite node or steps of one extractor.
    pub max_children: usize,
}

impl CodecLimits {
    pub const DEFAULT_MAX_BYTES: usize = 1024 * 1024;
    pub const DEFAULT_MAX_DEPTH: usize = 64;
    pub const DEFAULT_MAX_STRING_LEN: usize = 64 * 1024;
    pub const DEFAULT_MAX_CHILDREN: usize = 4096;

    /// No bounds at all. Only for payloads produced by this crate's `encode`.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_bytes: usize::MAX,
            max_depth: usize::MAX,
            max_string_len: usize::MAX,
            max_children: usize::MAX,
        }
    }
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_bytes: Self::DEFAULT_MAX_BYTES,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_string_len: Self::DEFAULT_MAX_STRING_LEN,
            max_children: Self::DEFAULT_MAX_CHILDREN,
        }
    }
}
