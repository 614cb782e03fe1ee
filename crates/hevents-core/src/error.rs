//! Error taxonomy shared by every hevents layer.
//!
//! Adapters translate transport-level failures into one of these variants so
//! that application services can decide on behaviour (fail closed, map a
//! conflict to "already signed up", keep "load failed" apart from "empty")
//! without knowing which backend produced the error.

use thiserror::Error;

/// Result type used across hevents services and repositories
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by hevents operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The id or email has no matching record
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller is not allowed to perform the operation (or credentials were rejected)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed write payload or input
    #[error("validation failed: {0}")]
    Validation(String),

    /// The backing store rejected a write that would violate a uniqueness constraint
    #[error("conflict: {0}")]
    Conflict(String),

    /// Network failure, service unavailable or an unreadable response
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ClientError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport(reason.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Short machine-friendly name, used in structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Unauthorized(_) => "unauthorized",
            Self::Validation(_) => "validation",
            Self::Conflict(_) => "conflict",
            Self::Transport(_) => "transport",
        }
    }
}
