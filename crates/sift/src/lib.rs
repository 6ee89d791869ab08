//! ## Crate layout
//! - `core`: values, entries, extractors, predicates, index candidate
//!   extraction, the predicate codec, configuration and errors.
//!
//! The `prelude` module carries the predicate vocabulary and factory
//! functions; codec entry points are re-exported at the crate root.

pub use sift_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{
    codec::{
        CodecLimits, DecodeError, EncodeError, FORMAT_VERSION, Registry, decode,
        decode_extractor, decode_extractor_with_limits, decode_with_limits, encode,
        encode_extractor,
    },
    config::SiftConfig,
    error::{Error, ErrorClass},
    predicate::EvalError,
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
}
