use crate::{
    entry::Entry,
    extract::ResolveError,
    model::{ObjectModel, RecordModel},
    predicate::{BetweenPredicate, ComparePredicate, NotPredicate, Predicate},
    value::{Value, ValueTag, strict_order_cmp, value_eq},
};
use std::cmp::Ordering;
use thiserror::Error as ThisError;

///
/// EvalError
///
/// Hard failure of one `apply` call. Null operands of Equal/Between are not
/// errors; ordering Null or mismatched kinds in Compare/Between is.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EvalError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("{left} and {right} values have no consistent ordering")]
    Incomparable { left: ValueTag, right: ValueTag },
}

impl Predicate {
    /// Evaluate against one entry using the default `RecordModel`.
    pub fn apply<E: Entry + ?Sized>(&self, entry: &E) -> Result<bool, EvalError> {
        self.apply_with(entry, &RecordModel)
    }

    /// Evaluate against one entry using a host object model.
    ///
    /// Children of an AND/OR after the deciding child are never evaluated,
    /// so their resolution errors never surface.
    pub fn apply_with<E: Entry + ?Sized>(
        &self,
        entry: &E,
        model: &dyn ObjectModel,
    ) -> Result<bool, EvalError> {
        match self {
            Self::Equal(eq) => {
                let left = eq.lhs.resolve(entry, model)?;
                let right = eq.rhs.resolve(entry, model)?;

                Ok(value_eq(&left, &right))
            }
            Self::Compare(cmp) => eval_compare(cmp, entry, model),
            Self::Between(between) => eval_between(between, entry, model),
            Self::InstanceOf(tag) => {
                let value = entry.value();

                Ok(!value.is_null() && model.is_instance(value, tag))
            }
            Self::Not(NotPredicate::Expression(extractor)) => Ok(matches!(
                extractor.resolve(entry, model)?,
                Value::Bool(false)
            )),
            Self::Not(NotPredicate::Constant(value)) => Ok(!*value),
            Self::AndOr(node) => {
                let is_and = node.is_and();
                for child in node.children() {
                    let passed = child.apply_with(entry, model)?;
                    if passed != is_and {
                        return Ok(passed);
                    }
                }

                Ok(is_and)
            }
        }
    }
}

// Strict sign test: inclusive forms never match on equality.
fn eval_compare<E: Entry + ?Sized>(
    cmp: &ComparePredicate,
    entry: &E,
    model: &dyn ObjectModel,
) -> Result<bool, EvalError> {
    let left = cmp.lhs.resolve(entry, model)?;
    let right = cmp.rhs.resolve(entry, model)?;

    Ok(order(&left, &right)? == cmp.expected_ordering())
}

fn eval_between<E: Entry + ?Sized>(
    between: &BetweenPredicate,
    entry: &E,
    model: &dyn ObjectModel,
) -> Result<bool, EvalError> {
    let value = between.lhs.resolve(entry, model)?;
    if value.is_null() || between.from.is_null() || between.to.is_null() {
        return Ok(false);
    }

    if order(&value, &between.from)? == Ordering::Less {
        return Ok(false);
    }

    Ok(order(&value, &between.to)? != Ordering::Greater)
}

fn order(left: &Value, right: &Value) -> Result<Ordering, EvalError> {
    strict_order_cmp(left, right).ok_or(EvalError::Incomparable {
        left: left.tag(),
        right: right.tag(),
    })
}
