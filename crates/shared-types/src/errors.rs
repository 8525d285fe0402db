//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Failure reported by an external collaborator (wallet, store, publisher).
///
/// Once a collaborator with side effects has been called its failure is
/// surfaced verbatim; callers never retry or roll back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CollaboratorError(pub String);

impl CollaboratorError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    /// The bare reason text.
    pub fn reason(&self) -> &str {
        &self.0
    }
}

impl From<String> for CollaboratorError {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CollaboratorError {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_error_displays_reason() {
        let err = CollaboratorError::new("wallet offline");
        assert_eq!(err.to_string(), "wallet offline");
        assert_eq!(err.reason(), "wallet offline");
    }
}
