use nodepath_core::{engine::memory::MemoryError, error::ErrorClass, error::PathError};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable class taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{class} error: {message}")]
pub struct Error {
    pub class: ErrorClass,
    pub message: String,
}

impl Error {
    #[must_use]
    pub fn new(class: ErrorClass, message: impl Into<String>) -> Self {
        Self {
            class,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        self.class
    }
}

impl From<PathError> for Error {
    fn from(err: PathError) -> Self {
        Self::new(err.class(), err.to_string())
    }
}

impl From<MemoryError> for Error {
    fn from(err: MemoryError) -> Self {
        Self::new(err.class(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_errors_keep_their_class() {
        let err: Error = PathError::EmptySegment { index: 1 }.into();

        assert_eq!(err.class(), ErrorClass::Construction);
        assert_eq!(
            err.to_string(),
            "construction error: path segment at index 1 is empty"
        );
    }

    #[test]
    fn memory_errors_are_resolution_failures() {
        let err: Error = MemoryError::UnknownField {
            segment: "zip".to_string(),
        }
        .into();

        assert_eq!(err.class(), ErrorClass::Resolution);
        assert_eq!(err.message, "unknown field 'zip'");
    }
}
