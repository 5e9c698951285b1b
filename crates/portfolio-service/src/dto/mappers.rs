//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use portfolio_core::{EmojiKind, Post, PostId, ReactionCounts};

use super::responses::{PostResponse, ReactionSummaryResponse};

// ============================================================================
// Post Mappers
// ============================================================================

/// Post joined with its aggregates
#[derive(Debug, Clone)]
pub struct PostWithCounts {
    pub post: Post,
    pub counts: ReactionCounts,
}

impl From<&PostWithCounts> for PostResponse {
    fn from(item: &PostWithCounts) -> Self {
        let post = &item.post;
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            body: post.body.clone(),
            images: post.images.iter().map(ToString::to_string).collect(),
            status: post.status,
            reactions: item.counts.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<PostWithCounts> for PostResponse {
    fn from(item: PostWithCounts) -> Self {
        Self::from(&item)
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl ReactionSummaryResponse {
    pub fn new(post_id: &PostId, counts: ReactionCounts, reacted: Vec<EmojiKind>) -> Self {
        Self {
            post_id: post_id.to_string(),
            counts,
            reacted,
        }
    }
}
