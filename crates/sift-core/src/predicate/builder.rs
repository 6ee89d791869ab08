//! Factory surface for predicate trees.
//!
//! ```text
//! and(greater_than(property("age"), 18), less_than(property("age"), 65))
//! ```

use crate::{
    extract::{Accessor, Extractor},
    model::TypeTag,
    predicate::{
        AndOrPredicate, BetweenPredicate, ComparePredicate, EqualPredicate, NotPredicate, Operand,
        Predicate,
    },
    value::Value,
};
use std::sync::Arc;

/// Single named property step; chain further steps with `.property(..)`.
#[must_use]
pub fn property(name: impl Into<String>) -> Extractor {
    Extractor::named(name)
}

/// Single accessor-handle step.
#[must_use]
pub fn handle(accessor: Arc<dyn Accessor>) -> Extractor {
    Extractor::from_handle(accessor)
}

#[must_use]
pub fn equal(lhs: Extractor, value: impl Into<Value>) -> Predicate {
    Predicate::Equal(EqualPredicate {
        lhs,
        rhs: Operand::Literal(value.into()),
    })
}

/// Equality between two per-entry values; never index-expressible.
#[must_use]
pub fn equal_expr(lhs: Extractor, rhs: Extractor) -> Predicate {
    Predicate::Equal(EqualPredicate {
        lhs,
        rhs: Operand::Expression(rhs),
    })
}

#[must_use]
pub fn greater_than(lhs: Extractor, value: impl Into<Value>) -> Predicate {
    compare(lhs, Operand::Literal(value.into()), false, false)
}

#[must_use]
pub fn greater_equal(lhs: Extractor, value: impl Into<Value>) -> Predicate {
    compare(lhs, Operand::Literal(value.into()), true, false)
}

#[must_use]
pub fn less_than(lhs: Extractor, value: impl Into<Value>) -> Predicate {
    compare(lhs, Operand::Literal(value.into()), false, true)
}

#[must_use]
pub fn less_equal(lhs: Extractor, value: impl Into<Value>) -> Predicate {
    compare(lhs, Operand::Literal(value.into()), true, true)
}

/// Comparison between two per-entry values.
#[must_use]
pub fn compare_expr(lhs: Extractor, rhs: Extractor, inclusive: bool, less: bool) -> Predicate {
    compare(lhs, Operand::Expression(rhs), inclusive, less)
}

const fn compare(lhs: Extractor, rhs: Operand, inclusive: bool, less: bool) -> Predicate {
    Predicate::Compare(ComparePredicate {
        lhs,
        rhs,
        inclusive,
        less,
    })
}

#[must_use]
pub fn between(lhs: Extractor, from: impl Into<Value>, to: impl Into<Value>) -> Predicate {
    Predicate::Between(BetweenPredicate {
        lhs,
        from: from.into(),
        to: to.into(),
    })
}

#[must_use]
pub fn and(first: Predicate, second: Predicate) -> Predicate {
    Predicate::AndOr(AndOrPredicate {
        is_and: true,
        children: vec![first, second],
    })
}

#[must_use]
pub fn or(first: Predicate, second: Predicate) -> Predicate {
    Predicate::AndOr(AndOrPredicate {
        is_and: false,
        children: vec![first, second],
    })
}

/// N-ary AND; `None` when `predicates` is empty.
#[must_use]
pub fn all(predicates: impl IntoIterator<Item = Predicate>) -> Option<Predicate> {
    AndOrPredicate::new(true, predicates.into_iter().collect()).map(Predicate::AndOr)
}

/// N-ary OR; `None` when `predicates` is empty.
#[must_use]
pub fn any(predicates: impl IntoIterator<Item = Predicate>) -> Option<Predicate> {
    AndOrPredicate::new(false, predicates.into_iter().collect()).map(Predicate::AndOr)
}

/// True iff `extractor` resolves to `Bool(false)`.
#[must_use]
pub const fn not(extractor: Extractor) -> Predicate {
    Predicate::Not(NotPredicate::Expression(extractor))
}

/// Constant predicate: true iff `value` is `false`, for every entry.
#[must_use]
pub const fn not_constant(value: bool) -> Predicate {
    Predicate::Not(NotPredicate::Constant(value))
}

#[must_use]
pub const fn instance_of(tag: TypeTag) -> Predicate {
    Predicate::InstanceOf(tag)
}
