mod compare;


use derive_more::Deref;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};
use time::{PrimitiveDateTime, macros::format_description};

// re-exports
pub use compare::{canonical_cmp, compare_eq, compare_order};

///
/// Value
/// literal carried by predicates, and the cell type of in-memory records
///
/// Null    → the field is unset (SQL NULL); also what a null relation yields.
/// Record  → a nested relation, reached through a path segment.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    /// Ordered list of values.
    /// Used for `In` membership sets and many-cardinality fields.
    List(Vec<Self>),
    Null,
    Record(Record),
    Text(String),
    Timestamp(PrimitiveDateTime),
    Uint(u64),
}

impl Value {
    /// Build a list value from anything convertible into values.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for every value except `Null`.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !self.is_null()
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Uint(_))
    }

    /// Strictly positive numeric value.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        match self {
            Self::Int(v) => *v > 0,
            Self::Uint(v) => *v > 0,
            _ => false,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Stable name of the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::List(_) => "list",
            Self::Null => "null",
            Self::Record(_) => "record",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
            Self::Uint(_) => "uint",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Null => f.write_str("NULL"),
            Self::Text(text) => write!(f, "'{}'", text.replace('\'', "''")),
            Self::Timestamp(ts) => {
                let rendered = ts
                    .format(format_description!(
                        "[year]-[month]-[day] [hour]:[minute]:[second]"
                    ))
                    .map_err(|_| fmt::Error)?;
                write!(f, "'{rendered}'")
            }
            Self::List(items) => {
                f.write_str("(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Self::Record(record) => write!(f, "{record}"),
        }
    }
}

///
/// Record
///
/// Named fields of one entity. Field order is canonical (sorted by name).
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style field insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (name, value)) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}

///
/// Conversions
///

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($source:ty),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Self::$variant(<$target>::from(v))
                }
            }
        )*
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64);
impl_from_int!(Uint, u64, u8, u16, u32, u64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<PrimitiveDateTime> for Value {
    fn from(v: PrimitiveDateTime) -> Self {
        Self::Timestamp(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Self::Record(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::list(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
