//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Post, PostStatus, ReactionAggregate, ReactionEvent};
use crate::error::DomainError;
use crate::value_objects::{EmojiKind, PostId, ViewerFingerprint};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Post Repository
// ============================================================================

/// Filter and pagination options for post listings
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub status: Option<PostStatus>,
    pub limit: i64,
    pub offset: i64,
}

impl PostQuery {
    /// Newest published posts
    pub fn published(limit: i64, offset: i64) -> Self {
        Self {
            status: Some(PostStatus::Published),
            limit,
            offset,
        }
    }
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID, regardless of status
    async fn find_by_id(&self, id: &PostId) -> RepoResult<Option<Post>>;

    /// List posts newest first
    async fn list(&self, query: &PostQuery) -> RepoResult<Vec<Post>>;

    /// Count posts, optionally by status
    async fn count(&self, status: Option<PostStatus>) -> RepoResult<i64>;

    /// Insert the post together with one zeroed aggregate per emoji kind.
    /// Either all rows become visible or none do.
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Update title, body, images and status
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post; its aggregates and events go with it
    async fn delete(&self, id: &PostId) -> RepoResult<()>;

    /// Round-trip to storage for readiness checks
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

/// Result of a constraint-checked event insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The (post, emoji, viewer) triple already exists
    Duplicate,
}

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Append an event. Uniqueness of (post, emoji, viewer) is enforced by
    /// storage at insert time; a violation is reported as `Duplicate`.
    /// Fails with `PostNotFound` if the post does not exist.
    async fn insert_event(&self, event: &ReactionEvent) -> RepoResult<InsertOutcome>;

    /// Relative increment of one aggregate; returns the count after the update.
    /// Fails with `AggregateMissing` if the row does not exist.
    async fn increment(&self, post_id: &PostId, emoji: EmojiKind, by: i64) -> RepoResult<i64>;

    /// Current aggregate for a single (post, emoji)
    async fn count(&self, post_id: &PostId, emoji: EmojiKind) -> RepoResult<Option<i64>>;

    /// All aggregate rows of a post
    async fn find_aggregates(&self, post_id: &PostId) -> RepoResult<Vec<ReactionAggregate>>;

    /// Aggregate rows for several posts at once
    async fn find_aggregates_for_posts(
        &self,
        post_ids: &[PostId],
    ) -> RepoResult<Vec<ReactionAggregate>>;

    /// Emoji kinds this viewer has already used on a post
    async fn find_viewer_emojis(
        &self,
        post_id: &PostId,
        viewer: &ViewerFingerprint,
    ) -> RepoResult<Vec<EmojiKind>>;

    /// Recompute aggregates from the event ledger, re-seeding missing rows.
    /// Returns the number of aggregate rows that changed.
    async fn reconcile(&self, post_id: Option<&PostId>) -> RepoResult<u64>;
}
