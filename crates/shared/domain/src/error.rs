//! Errors raised by domain rules.
//!
//! Infrastructure-free; the `common` crate maps each variant onto the
//! service error taxonomy.

use thiserror::Error;

/// Business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed a structural check
    #[error("Validation error: {0}")]
    Validation(String),

    /// Password could not be accepted
    #[error("Password error: {0}")]
    Password(String),

    /// A unique field is already held by another user
    #[error("{0} already exists")]
    Conflict(String),

    /// Username and password do not identify an active user
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Hashing or another internal step failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    /// Conflict on the named unique field, e.g. `conflict("Username")`
    pub fn conflict(field: impl Into<String>) -> Self {
        DomainError::Conflict(field.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
