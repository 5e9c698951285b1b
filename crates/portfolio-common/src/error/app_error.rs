//! Application error types
//!
//! Unified error handling for the entire application.

use portfolio_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Invalid token")]
    InvalidToken,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) => 400,

            // 401 Unauthorized
            Self::MissingAuth | Self::InvalidToken => 401,

            // 500 Internal Server Error
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingAuth => "MISSING_AUTHORIZATION",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_core::{EmojiKind, PostId};

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::MissingAuth.status_code(), 401);
        assert_eq!(AppError::InvalidToken.status_code(), 401);
        assert_eq!(AppError::Validation("test".to_string()).status_code(), 400);
        assert_eq!(AppError::Database("test".to_string()).status_code(), 500);
        assert_eq!(AppError::Config("test".to_string()).status_code(), 500);
    }

    #[test]
    fn test_domain_status_codes() {
        let not_found = AppError::from(DomainError::PostNotFound(PostId::new("p1")));
        assert_eq!(not_found.status_code(), 404);
        assert_eq!(not_found.error_code(), "UNKNOWN_POST");

        let invalid = AppError::from(DomainError::InvalidEmoji("laugh".to_string()));
        assert_eq!(invalid.status_code(), 400);
        assert_eq!(invalid.error_code(), "INVALID_EMOJI");

        let dup = AppError::from(DomainError::ReactionAlreadyExists(EmojiKind::Heart));
        assert_eq!(dup.status_code(), 409);

        let missing = AppError::from(DomainError::AggregateMissing {
            post_id: PostId::new("p1"),
            emoji: EmojiKind::Heart,
        });
        assert_eq!(missing.status_code(), 500);
    }

    #[test]
    fn test_internal_hides_cause() {
        let err = AppError::internal(std::io::Error::other("socket closed"));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert_eq!(err.to_string(), "Internal server error");
    }
}
