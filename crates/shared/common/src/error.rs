//! Unified error handling for the user service.
//!
//! Every failure the service raises is one of these variants. Callers at the
//! boundary translate them with [`AppError::status_code`] and
//! [`AppError::user_message`].

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Caller input
    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Resource errors
    #[error("{0}")]
    ResourceNotFound(String),

    #[error("{0}")]
    ResourcePersistence(String),

    // Credential lookup
    #[error("{0}")]
    Authentication(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::ResourceNotFound(_) => "RESOURCE_NOT_FOUND",
            AppError::ResourcePersistence(_) => "RESOURCE_PERSISTENCE",
            AppError::Authentication(_) => "AUTHENTICATION_FAILED",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status a boundary layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::BadRequest(_) => 400,
            AppError::Authentication(_) => 401,
            AppError::ResourceNotFound(_) => 404,
            AppError::ResourcePersistence(_) => 409,
            _ => 500,
        }
    }

    /// Check if the error was caused by the caller rather than the system
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Password(msg) => AppError::BadRequest(msg),
            DomainError::Conflict(msg) => {
                AppError::ResourcePersistence(format!("{} already exists", msg))
            }
            DomainError::InvalidCredentials => {
                AppError::Authentication("Invalid credentials".to_string())
            }
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, msg: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, msg: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::ResourceNotFound(msg.into()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::ResourceNotFound(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        AppError::ResourcePersistence(msg.into())
    }

    pub fn authentication(msg: impl Into<String>) -> Self {
        AppError::Authentication(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::bad_request("bad id").status_code(), 400);
        assert_eq!(AppError::not_found("No users found").status_code(), 404);
        assert_eq!(AppError::persistence("taken").status_code(), 409);
        assert_eq!(AppError::authentication("nope").status_code(), 401);
        assert_eq!(AppError::internal("boom").status_code(), 500);
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::internal("connection pool exhausted");

        assert_eq!(err.user_message(), "An internal error occurred");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_client_messages_preserved() {
        let err = AppError::not_found("No users found");

        assert_eq!(err.user_message(), "No users found");
        assert_eq!(err.code(), "RESOURCE_NOT_FOUND");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_domain_error_conversion() {
        assert!(matches!(
            AppError::from(DomainError::validation("bad")),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            AppError::from(DomainError::conflict("Username")),
            AppError::ResourcePersistence(msg) if msg == "Username already exists"
        ));
        assert!(matches!(
            AppError::from(DomainError::InvalidCredentials),
            AppError::Authentication(_)
        ));
    }

    #[test]
    fn test_ok_or_not_found() {
        let missing: Option<u8> = None;
        assert!(matches!(
            missing.ok_or_not_found("gone"),
            Err(AppError::ResourceNotFound(msg)) if msg == "gone"
        ));
        assert_eq!(Some(3).ok_or_not_found("gone").unwrap(), 3);
    }
}
