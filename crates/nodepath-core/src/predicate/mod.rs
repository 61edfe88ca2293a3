mod conditional;
mod eval;
mod explain;
mod fingerprint;
mod like;
mod normalize;


use crate::{
    obs::sink::{MetricsEvent, PredicateKind, record},
    path::NodePath,
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, Not};

// re-exports
pub use conditional::{Conditional, InitParam, PresencePolicy};
pub use fingerprint::{Fingerprint, fingerprint};
pub use like::{LikeMode, like_match, to_like_operand};
pub use normalize::normalize;

///
/// Predicate
///
/// Lazy description of a boolean filter over nested fields.
///
/// Building a predicate never touches a queryable root. Paths are only
/// resolved when the predicate is evaluated against a root and an
/// expression builder supplied by the query engine, so one predicate can
/// be reused across executions.
///
/// `True` is the identity for AND and the no-op filter; `False` is the
/// identity for OR.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Predicate {
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Equal {
        path: NodePath,
        value: Value,
    },
    Like {
        path: NodePath,
        pattern: String,
    },
    In {
        path: NodePath,
        values: Vec<Value>,
    },
    IsNull {
        path: NodePath,
    },
    IsNotNull {
        path: NodePath,
    },
    /// Inclusive range. At least one bound is set when built through the
    /// factory; an unbounded range behaves like `True`.
    Range {
        path: NodePath,
        lower: Option<Value>,
        upper: Option<Value>,
    },
}

impl Predicate {
    // --- Comparison ---

    /// Resolved field equals `value`.
    #[must_use]
    pub fn equal(path: NodePath, value: impl Into<Value>) -> Self {
        built(
            PredicateKind::Equal,
            Self::Equal {
                path,
                value: value.into(),
            },
        )
    }

    /// Substring match: `value` is wrapped into a `%value%` like operand.
    #[must_use]
    pub fn like(path: NodePath, value: &str) -> Self {
        Self::like_with(path, value, LikeMode::Contains)
    }

    /// Pattern match with an explicit wrapping mode.
    #[must_use]
    pub fn like_with(path: NodePath, value: &str, mode: LikeMode) -> Self {
        built(
            PredicateKind::Like,
            Self::Like {
                path,
                pattern: to_like_operand(value, mode),
            },
        )
    }

    /// Resolved field is a member of `values`.
    #[must_use]
    pub fn in_<I, V>(path: NodePath, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        built(
            PredicateKind::In,
            Self::In {
                path,
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    // --- Presence ---

    #[must_use]
    pub fn is_null(path: NodePath) -> Self {
        built(PredicateKind::IsNull, Self::IsNull { path })
    }

    #[must_use]
    pub fn is_not_null(path: NodePath) -> Self {
        built(PredicateKind::IsNotNull, Self::IsNotNull { path })
    }

    // --- Range ---

    #[must_use]
    pub fn gte(path: NodePath, value: impl Into<Value>) -> Self {
        Self::range(path, Some(value.into()), None)
    }

    #[must_use]
    pub fn lte(path: NodePath, value: impl Into<Value>) -> Self {
        Self::range(path, None, Some(value.into()))
    }

    /// Inclusive range over the bounds that are present.
    ///
    /// A `Null` bound (or a `None` converted into one) is absent:
    /// - both present → `lower <= field <= upper`
    /// - lower only   → same as `gte`
    /// - upper only   → same as `lte`
    /// - neither      → `True`, so the result is safe to combine
    #[must_use]
    pub fn between(path: NodePath, from: impl Into<Value>, to: impl Into<Value>) -> Self {
        let lower = Some(from.into()).filter(Value::is_present);
        let upper = Some(to.into()).filter(Value::is_present);

        if lower.is_none() && upper.is_none() {
            return Self::True;
        }

        Self::range(path, lower, upper)
    }

    fn range(path: NodePath, lower: Option<Value>, upper: Option<Value>) -> Self {
        built(PredicateKind::Range, Self::Range { path, lower, upper })
    }

    // --- Conditional assembly ---

    /// `is_not_null(path)` AND `equal(param)` for every provided param.
    ///
    /// Params are provided under `PresencePolicy::default()`; use
    /// `initialize_with` to pick another convention.
    #[must_use]
    pub fn initialize<I>(path: NodePath, params: I) -> Self
    where
        I: IntoIterator<Item = InitParam>,
    {
        Self::initialize_with(path, params, PresencePolicy::default())
    }

    #[must_use]
    pub fn initialize_with<I>(path: NodePath, params: I, policy: PresencePolicy) -> Self
    where
        I: IntoIterator<Item = InitParam>,
    {
        Conditional::new(Self::is_not_null(path))
            .with_policy(policy)
            .and_equal_all(params)
            .build()
    }

    // --- Composition ---

    /// Conjunction. `True` on either side yields the other side unchanged.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::True, other) | (other, Self::True) => other,
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), other) => {
                left.push(other);
                Self::And(left)
            }
            (left, Self::And(mut right)) => {
                right.insert(0, left);
                Self::And(right)
            }
            (left, right) => Self::And(vec![left, right]),
        }
    }

    /// Disjunction. `False` on either side yields the other side unchanged.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::False, other) | (other, Self::False) => other,
            (Self::Or(mut left), Self::Or(right)) => {
                left.extend(right);
                Self::Or(left)
            }
            (Self::Or(mut left), other) => {
                left.push(other);
                Self::Or(left)
            }
            (left, Self::Or(mut right)) => {
                right.insert(0, left);
                Self::Or(right)
            }
            (left, right) => Self::Or(vec![left, right]),
        }
    }

    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }

    /// Conjunction of every predicate; `True` when empty.
    #[must_use]
    pub fn all<I: IntoIterator<Item = Self>>(preds: I) -> Self {
        preds.into_iter().fold(Self::True, Self::and)
    }

    /// Disjunction of every predicate; `False` when empty.
    #[must_use]
    pub fn any<I: IntoIterator<Item = Self>>(preds: I) -> Self {
        preds.into_iter().fold(Self::False, Self::or)
    }

    /// Path this leaf predicate filters on; `None` for constants and composites.
    #[must_use]
    pub const fn path(&self) -> Option<&NodePath> {
        match self {
            Self::Equal { path, .. }
            | Self::Like { path, .. }
            | Self::In { path, .. }
            | Self::IsNull { path }
            | Self::IsNotNull { path }
            | Self::Range { path, .. } => Some(path),
            Self::True | Self::False | Self::And(_) | Self::Or(_) | Self::Not(_) => None,
        }
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitAnd for &Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.clone().and(rhs.clone())
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl BitOr for &Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.clone().or(rhs.clone())
    }
}

impl Not for Predicate {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

// Record construction of one leaf predicate.
fn built(kind: PredicateKind, predicate: Predicate) -> Predicate {
    record(MetricsEvent::PredicateBuilt { kind });

    predicate
}
