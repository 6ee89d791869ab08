//! Index candidate extraction.
//!
//! Mines a predicate tree for leaves a secondary index can serve. Only
//! conjunctive paths are followed; OR subtrees contribute nothing. Everything
//! not collected must still be applied as a residual filter.


use crate::{
    extract::Extractor,
    predicate::{ComparePredicate, Operand, Predicate},
    value::Value,
};
use derive_more::{Deref, Display};
use std::fmt;
use tracing::trace;

///
/// RangeKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RangeKind {
    Equal,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Between,
}

impl RangeKind {
    #[must_use]
    pub const fn is_ranged(self) -> bool {
        !matches!(self, Self::Equal)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::Less => "LESS",
            Self::LessEqual => "LESS_EQUAL",
            Self::Greater => "GREATER",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::Between => "BETWEEN",
        }
    }
}

impl fmt::Display for RangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ComparePredicate {
    /// Range classification reported to index selection. This is the only
    /// place the inclusive flag has any effect.
    #[must_use]
    pub const fn range_kind(&self) -> RangeKind {
        match (self.less, self.inclusive) {
            (true, true) => RangeKind::LessEqual,
            (true, false) => RangeKind::Less,
            (false, true) => RangeKind::GreaterEqual,
            (false, false) => RangeKind::Greater,
        }
    }
}

///
/// IndexName
///
/// Property name of a direct single-step extractor.
///

#[derive(Clone, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IndexName(String);

impl IndexName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

///
/// IndexBounds
///

#[derive(Clone, Debug, PartialEq)]
pub enum IndexBounds {
    /// Comparand of an Equal or Compare leaf.
    Value(Value),
    /// Inclusive bounds of a Between leaf.
    Range { from: Value, to: Value },
}

///
/// IndexCandidate
///

#[derive(Clone, Debug, PartialEq)]
pub struct IndexCandidate {
    index_name: IndexName,
    range: RangeKind,
    bounds: IndexBounds,
}

impl IndexCandidate {
    #[must_use]
    pub const fn index_name(&self) -> &IndexName {
        &self.index_name
    }

    #[must_use]
    pub const fn range(&self) -> RangeKind {
        self.range
    }

    #[must_use]
    pub const fn is_ranged(&self) -> bool {
        self.range.is_ranged()
    }

    #[must_use]
    pub const fn bounds(&self) -> &IndexBounds {
        &self.bounds
    }

    /// Single comparand for Equal/Compare candidates.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match &self.bounds {
            IndexBounds::Value(value) => Some(value),
            IndexBounds::Range { .. } => None,
        }
    }

    /// Lower bound; only Between candidates carry one.
    #[must_use]
    pub const fn lower_bound(&self) -> Option<&Value> {
        match &self.bounds {
            IndexBounds::Range { from, .. } => Some(from),
            IndexBounds::Value(_) => None,
        }
    }

    /// Upper bound; only Between candidates carry one.
    #[must_use]
    pub const fn upper_bound(&self) -> Option<&Value> {
        match &self.bounds {
            IndexBounds::Range { to, .. } => Some(to),
            IndexBounds::Value(_) => None,
        }
    }
}

///
/// IndexAware
///
/// Per-node contribution to index candidate extraction.
///

pub trait IndexAware {
    fn collect_into(&self, out: &mut Vec<IndexCandidate>);
}

impl IndexAware for Predicate {
    fn collect_into(&self, out: &mut Vec<IndexCandidate>) {
        let candidate = match self {
            Self::AndOr(node) => {
                if node.is_and() {
                    for child in node.children() {
                        child.collect_into(out);
                    }
                }
                return;
            }
            Self::Equal(eq) => literal_candidate(&eq.lhs, &eq.rhs, RangeKind::Equal),
            Self::Compare(cmp) => literal_candidate(&cmp.lhs, &cmp.rhs, cmp.range_kind()),
            Self::Between(between) => direct_name(&between.lhs).map(|index_name| IndexCandidate {
                index_name,
                range: RangeKind::Between,
                bounds: IndexBounds::Range {
                    from: between.from.clone(),
                    to: between.to.clone(),
                },
            }),
            Self::InstanceOf(_) | Self::Not(_) => None,
        };

        if let Some(candidate) = candidate {
            trace!(
                index = %candidate.index_name,
                range = %candidate.range,
                "collected index candidate"
            );
            out.push(candidate);
        }
    }
}

/// Collect index candidates in depth-first, left-to-right order.
#[must_use]
pub fn collect_indexable(predicate: &Predicate) -> Vec<IndexCandidate> {
    let mut out = Vec::new();
    predicate.collect_into(&mut out);

    out
}

// Extractor-vs-extractor comparisons are never index-expressible.
fn literal_candidate(lhs: &Extractor, rhs: &Operand, range: RangeKind) -> Option<IndexCandidate> {
    let value = rhs.as_literal()?;

    direct_name(lhs).map(|index_name| IndexCandidate {
        index_name,
        range,
        bounds: IndexBounds::Value(value.clone()),
    })
}

fn direct_name(extractor: &Extractor) -> Option<IndexName> {
    extractor
        .index_name()
        .map(|name| IndexName(name.to_string()))
}
