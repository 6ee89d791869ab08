use crate::value::Value;
use std::cmp::Ordering;

///
/// CONSTANTS
///

// Integers inside this window convert to f64 without loss.
const F64_SAFE_I64: i64 = 1i64 << 53;

// 2^63 as f64; every float at or above it exceeds every i64.
#[expect(clippy::cast_precision_loss)]
const I64_BOUND_F64: f64 = i64::MAX as f64;

/// Natural equality used by `Equal` predicates.
///
/// Variant-strict: `Int(30)` never equals `Float(30.0)`, at any nesting
/// level. Null equals only Null. Numeric widening belongs to ordering only.
#[must_use]
pub fn value_eq(left: &Value, right: &Value) -> bool {
    left == right
}

/// Strict comparator for orderable values.
///
/// Returns `None` for Null, lists, records, NaN and mismatched variants.
/// Int and Float are mutually orderable.
#[must_use]
pub fn strict_order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Float(b)) => cmp_int_float(*a, *b),
        (Value::Float(a), Value::Int(b)) => cmp_int_float(*b, *a).map(Ordering::reverse),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

// Compare without routing large integers through a lossy f64 cast.
fn cmp_int_float(int: i64, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }

    if (-F64_SAFE_I64..=F64_SAFE_I64).contains(&int) {
        #[expect(clippy::cast_precision_loss)]
        return (int as f64).partial_cmp(&float);
    }

    if float >= I64_BOUND_F64 {
        return Some(Ordering::Less);
    }
    if float < -I64_BOUND_F64 {
        return Some(Ordering::Greater);
    }

    // |int| > 2^53 here, so truncating the float cannot flip the result.
    #[expect(clippy::cast_possible_truncation)]
    let truncated = float as i64;

    Some(int.cmp(&truncated))
}
