use crate::{
    builder::{Criteria, ExprBuilder},
    error::ErrorClass,
    obs::sink::{MetricsEvent, record},
    predicate::{Predicate, like_match},
    resolve::Queryable,
    value::{Value, compare_eq, compare_order},
};
use std::cmp::Ordering;
use thiserror::Error as ThisError;

// What a path yields once it walks through a null relation.
static NULL: Value = Value::Null;

///
/// MemoryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MemoryError {
    #[error("unknown field '{segment}'")]
    UnknownField { segment: String },

    #[error("cannot resolve '{segment}' on a {kind} value")]
    NotARecord { segment: String, kind: &'static str },
}

impl MemoryError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Resolution
    }
}

///
/// Row
///
/// Field handle over an in-memory `Value`. The root is a `Value::Record`;
/// each `get` descends one field. Walking through a `Null` relation keeps
/// yielding `Null` (outer-join semantics) instead of failing.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Row<'a> {
    value: &'a Value,
}

impl<'a> Row<'a> {
    #[must_use]
    pub const fn new(value: &'a Value) -> Self {
        Self { value }
    }

    #[must_use]
    pub const fn value(&self) -> &'a Value {
        self.value
    }
}

impl Queryable for Row<'_> {
    type Error = MemoryError;

    fn get(&self, segment: &str) -> Result<Self, Self::Error> {
        match self.value {
            Value::Record(record) => {
                record
                    .get(segment)
                    .map(Row::new)
                    .ok_or_else(|| MemoryError::UnknownField {
                        segment: segment.to_string(),
                    })
            }
            Value::Null => Ok(Row::new(&NULL)),
            other => Err(MemoryError::NotARecord {
                segment: segment.to_string(),
                kind: other.kind(),
            }),
        }
    }
}

///
/// Matcher
///
/// Expression builder that evaluates directly to `bool`.
///
/// Comparisons involving `Null` or incomparable values are non-matches;
/// only `is_null` matches a `Null` field. Logic is two-valued, so `Not`
/// of a non-match is a match.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Matcher;

impl<'a> ExprBuilder<Row<'a>> for Matcher {
    type Expr = bool;
    type Error = MemoryError;

    fn literal(&mut self, value: bool) -> Result<bool, MemoryError> {
        Ok(value)
    }

    fn equal(&mut self, criteria: Criteria<'_, Row<'a>>) -> Result<bool, MemoryError> {
        Ok(compare_eq(criteria.field.value(), criteria.value).unwrap_or(false))
    }

    fn like(&mut self, field: Row<'a>, pattern: &str) -> Result<bool, MemoryError> {
        Ok(field
            .value()
            .as_text()
            .is_some_and(|text| like_match(text, pattern)))
    }

    fn in_list(&mut self, field: Row<'a>, values: &[Value]) -> Result<bool, MemoryError> {
        Ok(values
            .iter()
            .any(|value| compare_eq(field.value(), value) == Some(true)))
    }

    fn is_null(&mut self, field: Row<'a>) -> Result<bool, MemoryError> {
        Ok(field.value().is_null())
    }

    fn is_not_null(&mut self, field: Row<'a>) -> Result<bool, MemoryError> {
        Ok(field.value().is_present())
    }

    fn gte(&mut self, criteria: Criteria<'_, Row<'a>>) -> Result<bool, MemoryError> {
        Ok(compare_order(criteria.field.value(), criteria.value).is_some_and(Ordering::is_ge))
    }

    fn lte(&mut self, criteria: Criteria<'_, Row<'a>>) -> Result<bool, MemoryError> {
        Ok(compare_order(criteria.field.value(), criteria.value).is_some_and(Ordering::is_le))
    }

    fn between(
        &mut self,
        field: Row<'a>,
        lower: &Value,
        upper: &Value,
    ) -> Result<bool, MemoryError> {
        let above = self.gte(Criteria::new(field, lower))?;
        let below = self.lte(Criteria::new(field, upper))?;

        Ok(above && below)
    }

    fn and(&mut self, exprs: Vec<bool>) -> Result<bool, MemoryError> {
        Ok(exprs.into_iter().all(|matched| matched))
    }

    fn or(&mut self, exprs: Vec<bool>) -> Result<bool, MemoryError> {
        Ok(exprs.into_iter().any(|matched| matched))
    }

    fn not(&mut self, expr: bool) -> Result<bool, MemoryError> {
        Ok(!expr)
    }
}

/// Evaluate `predicate` against one in-memory record.
pub fn matches(row: &Value, predicate: &Predicate) -> Result<bool, MemoryError> {
    let matched = predicate.evaluate(&Row::new(row), &mut Matcher)?;

    tracing::trace!(%predicate, matched, "evaluated predicate");
    record(MetricsEvent::Evaluated { matched });

    Ok(matched)
}

/// Keep the records that satisfy `predicate`, in input order.
pub fn select<'a, I>(rows: I, predicate: &Predicate) -> Result<Vec<&'a Value>, MemoryError>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut selected = Vec::new();
    for row in rows {
        if matches(row, predicate)? {
            selected.push(row);
        }
    }

    Ok(selected)
}
