//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{EmojiKind, PostId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid emoji: {0:?} (expected one of heart, fire, clap, wow)")]
    InvalidEmoji(String),

    #[error("Invalid post status: {0:?}")]
    InvalidPostStatus(String),

    #[error("Invalid image reference: {0}")]
    InvalidImageRef(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Already reacted with {0}")]
    ReactionAlreadyExists(EmojiKind),

    #[error("Post already exists: {0}")]
    PostAlreadyExists(PostId),

    // =========================================================================
    // Integrity Errors
    // =========================================================================
    #[error("Reaction aggregate missing for post {post_id} ({emoji})")]
    AggregateMissing { post_id: PostId, emoji: EmojiKind },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::PostNotFound(_) => "UNKNOWN_POST",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmoji(_) => "INVALID_EMOJI",
            Self::InvalidPostStatus(_) => "INVALID_POST_STATUS",
            Self::InvalidImageRef(_) => "INVALID_IMAGE_REF",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Conflict
            Self::ReactionAlreadyExists(_) => "ALREADY_REACTED",
            Self::PostAlreadyExists(_) => "POST_ALREADY_EXISTS",

            // Integrity
            Self::AggregateMissing { .. } => "AGGREGATE_MISSING",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PostNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmoji(_)
                | Self::InvalidPostStatus(_)
                | Self::InvalidImageRef(_)
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ReactionAlreadyExists(_) | Self::PostAlreadyExists(_)
        )
    }
}
