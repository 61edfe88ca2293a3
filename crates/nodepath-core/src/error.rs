use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

///
/// ErrorClass
///
/// Stable classification shared by every error surfaced from this crate.
/// All classes are programmer errors; nothing here is transient or retried.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ErrorClass {
    /// A path or predicate was constructed from malformed input.
    Construction,
    /// A path segment did not exist on the handle it was resolved against.
    Resolution,
    /// The engine cannot express the requested comparison.
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Construction => "construction",
            Self::Resolution => "resolution",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// PathError
///
/// Construction-time failures for `NodePath` and `PathBuilder`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PathError {
    #[error("a node path needs at least one segment")]
    Empty,

    #[error("path segment at index {index} is empty")]
    EmptySegment { index: usize },

    #[error("path segment '{segment}' at index {index} contains the '.' separator")]
    InvalidSegment { index: usize, segment: String },
}

impl PathError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Construction
    }
}
