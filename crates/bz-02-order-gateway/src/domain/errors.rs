//! Error types for the Order Gateway
//!
//! Every variant carries the reason text shown to the caller.

use shared_types::CollaboratorError;

/// Failure classes, without their reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    NotFoundCase,
    InvalidState,
    PreconditionFailed,
    ValidationFailed,
    PolicyViolation,
    Conflict,
    Internal,
}

/// Order gateway error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// No order with this id in any store consulted.
    #[error("{0}")]
    NotFound(String),

    /// No dispute case for this order id.
    #[error("{0}")]
    NotFoundCase(String),

    /// The order exists but its state does not allow the operation.
    #[error("{0}")]
    InvalidState(String),

    /// State is fine but another precondition (funding) fails.
    #[error("{0}")]
    PreconditionFailed(String),

    /// Payload malformed or out of range.
    #[error("{0}")]
    ValidationFailed(String),

    /// Operation not permitted for this class of order.
    #[error("{0}")]
    PolicyViolation(String),

    /// Attempt to create what already exists, or act on what must exist first.
    #[error("{0}")]
    Conflict(String),

    /// A collaborator failed after being called.
    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::NotFoundCase(_) => ErrorKind::NotFoundCase,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::PreconditionFailed(_) => ErrorKind::PreconditionFailed,
            Self::ValidationFailed(_) => ErrorKind::ValidationFailed,
            Self::PolicyViolation(_) => ErrorKind::PolicyViolation,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The caller-facing reason text.
    pub fn reason(&self) -> &str {
        match self {
            Self::NotFound(r)
            | Self::NotFoundCase(r)
            | Self::InvalidState(r)
            | Self::PreconditionFailed(r)
            | Self::ValidationFailed(r)
            | Self::PolicyViolation(r)
            | Self::Conflict(r)
            | Self::Internal(r) => r,
        }
    }

    /// Wrap a collaborator failure, keeping its text.
    pub fn internal(err: CollaboratorError) -> Self {
        Self::Internal(err.0)
    }
}

impl From<CollaboratorError> for GatewayError {
    fn from(err: CollaboratorError) -> Self {
        Self::internal(err)
    }
}
