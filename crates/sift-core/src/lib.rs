//! Core engine for sift: values, extractors, predicate trees, index candidate
//! extraction and the self-describing predicate codec, with the vocabulary
//! re-exported through the `prelude`.

// public exports are one module level down
pub mod codec;
pub mod config;
pub mod entry;
pub mod error;
pub mod extract;
pub mod index;
pub mod model;
pub mod predicate;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains the predicate vocabulary and the factory functions.
/// Errors, codec plumbing and configuration stay in their modules.
///

pub mod prelude {
    pub use crate::{
        entry::{Entry, MapEntry},
        extract::{Accessor, Extractor, Step},
        index::{IndexAware, IndexCandidate, RangeKind, collect_indexable},
        model::{ObjectModel, RecordModel, TypeTag},
        predicate::{
            Predicate,
            builder::{
                all, and, any, between, compare_expr, equal, equal_expr, greater_equal,
                greater_than, handle, instance_of, less_equal, less_than, not, not_constant, or,
                property,
            },
        },
        value::{Record, Value},
    };
}
