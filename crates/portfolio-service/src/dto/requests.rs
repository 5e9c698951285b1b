//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Status and image values are parsed by the services so they fail with
//! their own error codes.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Client-chosen id; generated when absent
    #[validate(length(min = 1, max = 64, message = "Post id must be 1-64 characters"))]
    pub id: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 20000, message = "Body must be at most 20000 characters"))]
    pub body: String,

    /// Full URLs, protocol-relative URLs or object-storage keys
    #[serde(default)]
    #[validate(length(max = 32, message = "At most 32 images per post"))]
    pub images: Vec<String>,

    /// `draft` or `published`; defaults to `published`
    pub status: Option<String>,
}

/// Update post request (all fields optional)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 20000, message = "Body must be at most 20000 characters"))]
    pub body: Option<String>,

    /// Replaces the whole image list when present
    #[validate(length(max = 32, message = "At most 32 images per post"))]
    pub images: Option<Vec<String>>,

    pub status: Option<String>,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Reconcile request; no post id means every post
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReconcileRequest {
    #[validate(length(min = 1, max = 64, message = "Post id must be 1-64 characters"))]
    pub post_id: Option<String>,
}
