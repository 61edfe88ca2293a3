use crate::value::Value;
use std::cmp::Ordering;

///
/// Value comparison semantics
///
/// Predicate comparisons are partial: they return `None` when the two
/// values do not share a comparable family. Evaluation treats `None`
/// as a non-match. `Int` and `Uint` widen into one numeric family.
///

/// Equality under predicate semantics.
///
/// Returns `None` if either side is `Null` or the variants are not comparable.
#[must_use]
pub fn compare_eq(left: &Value, right: &Value) -> Option<bool> {
    compare_order(left, right)
        .map(Ordering::is_eq)
        .or_else(|| structural_eq(left, right))
}

/// Ordering under predicate semantics.
///
/// Returns `None` if ordering is undefined for the given values.
#[must_use]
pub fn compare_order(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Uint(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
        (Value::Uint(a), Value::Int(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        _ => {
            // NOTE: Null, collections, and mixed families do not define ordering.
            None
        }
    }
}

// Collections compare structurally; nothing compares equal to Null.
fn structural_eq(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::List(a), Value::List(b)) => {
            if a.len() != b.len() {
                return Some(false);
            }
            for (a, b) in a.iter().zip(b) {
                if !compare_eq(a, b)? {
                    return Some(false);
                }
            }
            Some(true)
        }
        (Value::Record(a), Value::Record(b)) => Some(a == b),
        _ => None,
    }
}

/// Total canonical comparator used by normalization and fingerprints.
///
/// Ordering rules:
/// 1. Canonical variant rank
/// 2. Variant-specific comparison for same-ranked values
///
/// Numeric widening is deliberately not applied; `Int(1)` and `Uint(1)`
/// are distinct canonical values.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = canonical_rank(left).cmp(&canonical_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Uint(a), Value::Uint(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => canonical_cmp_list(a, b),
        (Value::Record(a), Value::Record(b)) => {
            for ((left_name, left_value), (right_name, right_value)) in a.iter().zip(b.iter()) {
                let cmp = left_name
                    .cmp(right_name)
                    .then_with(|| canonical_cmp(left_value, right_value));
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            a.len().cmp(&b.len())
        }
        _ => Ordering::Equal,
    }
}

fn canonical_cmp_list(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = canonical_cmp(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) => 2,
        Value::Uint(_) => 3,
        Value::Text(_) => 4,
        Value::Timestamp(_) => 5,
        Value::List(_) => 6,
        Value::Record(_) => 7,
    }
}
