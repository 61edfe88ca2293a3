use crate::{path::NodePath, predicate::Predicate, value::Value};
use serde::{Deserialize, Serialize};

///
/// PresencePolicy
///
/// Decides whether an optional filter value counts as "provided" and so
/// participates in a conditional assembly.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum PresencePolicy {
    /// Any value other than `Null` (an unset `Option`).
    #[default]
    Provided,
    /// Provided, and not an empty text or empty list.
    NonEmpty,
    /// Provided only when numeric and strictly positive.
    /// Zero and negative values are treated as unset.
    Positive,
}

impl PresencePolicy {
    #[must_use]
    pub fn is_provided(self, value: &Value) -> bool {
        match self {
            Self::Provided => value.is_present(),
            Self::NonEmpty => match value {
                Value::Null => false,
                Value::Text(text) => !text.is_empty(),
                Value::List(items) => !items.is_empty(),
                _ => true,
            },
            Self::Positive => value.is_positive(),
        }
    }
}

///
/// InitParam
///
/// One optional equality filter: a path and a value that may be unset.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct InitParam {
    pub path: NodePath,
    pub value: Value,
}

impl InitParam {
    /// `value` may be an `Option`; `None` becomes `Null` (unset).
    #[must_use]
    pub fn of(path: NodePath, value: impl Into<Value>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }
}

///
/// Conditional
///
/// Assembles a predicate from optional clauses. Each clause is only added
/// when its driving value is provided under the configured policy, so
/// callers can pass every filter field and let unset ones drop out.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Conditional {
    predicate: Predicate,
    policy: PresencePolicy,
}

impl Conditional {
    #[must_use]
    pub fn new(base: Predicate) -> Self {
        Self {
            predicate: base,
            policy: PresencePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: PresencePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// AND the predicate built from `value` when it is provided.
    #[must_use]
    pub fn and_if<V, F>(self, value: V, build: F) -> Self
    where
        V: Into<Value>,
        F: FnOnce(Value) -> Predicate,
    {
        let Self { predicate, policy } = self;
        let value = value.into();
        if !policy.is_provided(&value) {
            return Self { predicate, policy };
        }

        Self {
            predicate: predicate.and(build(value)),
            policy,
        }
    }

    /// OR the predicate built from `value` when it is provided.
    #[must_use]
    pub fn or_if<V, F>(self, value: V, build: F) -> Self
    where
        V: Into<Value>,
        F: FnOnce(Value) -> Predicate,
    {
        let Self { predicate, policy } = self;
        let value = value.into();
        if !policy.is_provided(&value) {
            return Self { predicate, policy };
        }

        Self {
            predicate: predicate.or(build(value)),
            policy,
        }
    }

    #[must_use]
    pub fn and_equal(self, param: InitParam) -> Self {
        let InitParam { path, value } = param;

        self.and_if(value, |value| Predicate::equal(path, value))
    }

    #[must_use]
    pub fn and_equal_all<I>(self, params: I) -> Self
    where
        I: IntoIterator<Item = InitParam>,
    {
        params.into_iter().fold(self, Self::and_equal)
    }

    #[must_use]
    pub fn build(self) -> Predicate {
        self.predicate
    }
}
