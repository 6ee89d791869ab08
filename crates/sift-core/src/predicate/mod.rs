pub mod builder;
mod eval;


use crate::{
    entry::Entry,
    extract::{Extractor, ResolveError},
    model::{ObjectModel, TypeTag},
    value::Value,
};
use derive_more::From;
use std::{
    borrow::Cow,
    cmp::Ordering,
    ops::{BitAnd, BitOr},
};

// re-exports
pub use eval::EvalError;

///
/// Predicate
///
/// Pure, immutable predicate tree. Leaves read the entry through extractors;
/// `AndOr` combines children with short-circuit evaluation.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Equal(EqualPredicate),
    Compare(ComparePredicate),
    Between(BetweenPredicate),
    InstanceOf(TypeTag),
    Not(NotPredicate),
    AndOr(AndOrPredicate),
}

///
/// Operand
///
/// Right-hand side of Equal/Compare: resolved per entry, or fixed at
/// construction. Only literal operands are index-expressible.
///

#[derive(Clone, Debug, From, PartialEq)]
pub enum Operand {
    Expression(Extractor),
    Literal(Value),
}

impl Operand {
    #[must_use]
    pub const fn is_expression(&self) -> bool {
        matches!(self, Self::Expression(_))
    }

    #[must_use]
    pub const fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Expression(_) => None,
        }
    }

    pub(crate) fn resolve<E: Entry + ?Sized>(
        &self,
        entry: &E,
        model: &dyn ObjectModel,
    ) -> Result<Cow<'_, Value>, ResolveError> {
        match self {
            Self::Expression(extractor) => extractor.resolve(entry, model).map(Cow::Owned),
            Self::Literal(value) => Ok(Cow::Borrowed(value)),
        }
    }
}

///
/// EqualPredicate
///

#[derive(Clone, Debug, PartialEq)]
pub struct EqualPredicate {
    pub lhs: Extractor,
    pub rhs: Operand,
}

///
/// ComparePredicate
///
/// `<`, `<=`, `>`, `>=`. Evaluation is a strict test in every form; the
/// inclusive flag only changes the range classification handed to index
/// selection.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ComparePredicate {
    pub lhs: Extractor,
    pub rhs: Operand,
    pub inclusive: bool,
    pub less: bool,
}

impl ComparePredicate {
    /// Ordering the comparison must produce exactly.
    #[must_use]
    pub const fn expected_ordering(&self) -> Ordering {
        if self.less {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

///
/// BetweenPredicate
///
/// Inclusive `from <= lhs <= to`; Null on any side never matches.
///

#[derive(Clone, Debug, PartialEq)]
pub struct BetweenPredicate {
    pub lhs: Extractor,
    pub from: Value,
    pub to: Value,
}

///
/// NotPredicate
///
/// Negation of a boolean-valued extractor, not of a predicate.
///

#[derive(Clone, Debug, PartialEq)]
pub enum NotPredicate {
    /// True iff the extractor yields `Bool(false)`.
    Expression(Extractor),
    /// Captured literal; true iff it is `false`, whatever the entry.
    Constant(bool),
}

///
/// AndOrPredicate
///

#[derive(Clone, Debug, PartialEq)]
pub struct AndOrPredicate {
    is_and: bool,
    children: Vec<Predicate>,
}

impl AndOrPredicate {
    /// Returns `None` for an empty child list.
    #[must_use]
    pub fn new(is_and: bool, children: Vec<Predicate>) -> Option<Self> {
        (!children.is_empty()).then_some(Self { is_and, children })
    }

    #[must_use]
    pub const fn is_and(&self) -> bool {
        self.is_and
    }

    #[must_use]
    pub fn children(&self) -> &[Predicate] {
        &self.children
    }

    // Append, flattening a same-kind child into this node.
    fn absorb(&mut self, predicate: Predicate) {
        match predicate {
            Predicate::AndOr(node) if node.is_and == self.is_and => {
                self.children.extend(node.children);
            }
            other => self.children.push(other),
        }
    }
}

// Build an AND/OR of two predicates, flattening same-kind operands.
fn combine(is_and: bool, lhs: Predicate, rhs: Predicate) -> Predicate {
    let mut node = match lhs {
        Predicate::AndOr(node) if node.is_and == is_and => node,
        other => AndOrPredicate {
            is_and,
            children: vec![other],
        },
    };
    node.absorb(rhs);

    Predicate::AndOr(node)
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        combine(true, self, rhs)
    }
}

impl BitAnd for &Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        combine(true, self.clone(), rhs.clone())
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        combine(false, self, rhs)
    }
}

impl BitOr for &Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Self) -> Self::Output {
        combine(false, self.clone(), rhs.clone())
    }
}
