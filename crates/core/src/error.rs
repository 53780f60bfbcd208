//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic failures of the editing core live here. Storage and
/// rendering failures have their own error types in their crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A caller passed an argument outside the accepted range
    /// (e.g. an item index past the end of the list).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested invoice was not found.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Whether this error was caused by the caller (and is safe to report
    /// back to the edit surface without touching state).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_message_includes_detail() {
        let err = DomainError::invalid_argument("item index 5 out of range (len 2)");
        assert_eq!(
            err.to_string(),
            "invalid argument: item index 5 out of range (len 2)"
        );
        assert!(err.is_invalid_argument());
        assert!(!DomainError::not_found().is_invalid_argument());
    }
}
