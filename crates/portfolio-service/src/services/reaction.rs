//! Reaction service
//!
//! Records anonymous emoji reactions against published posts and reads
//! back the per-post aggregates. Each viewer (identified by a salted
//! fingerprint) may use every emoji kind at most once per post.

use portfolio_core::{
    DomainError, EmojiKind, InsertOutcome, Post, PostId, ReactionCounts, ReactionEvent,
    ReactionOutcome, RequestMetadata, ViewerFingerprint,
};
use tracing::{debug, info, instrument};

use crate::dto::ReactionSummaryResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record one reaction from the viewer described by `meta`.
    ///
    /// Input is checked before storage is touched. A repeat of the same
    /// (post, emoji, viewer) returns `ReactionOutcome::Duplicate` and leaves
    /// the aggregate alone.
    #[instrument(skip(self, meta))]
    pub async fn record_reaction(
        &self,
        post_id: &str,
        emoji: &str,
        meta: &RequestMetadata,
    ) -> ServiceResult<ReactionOutcome> {
        let emoji = EmojiKind::parse(emoji)?;
        let post_id = PostId::parse(post_id)?;

        self.require_published(&post_id).await?;

        let viewer = ViewerFingerprint::derive(meta, self.ctx.fingerprint_salt());
        let event = ReactionEvent::new(post_id.clone(), emoji, viewer);

        match self.ctx.reaction_repo().insert_event(&event).await? {
            InsertOutcome::Duplicate => {
                debug!(post_id = %post_id, emoji = %emoji, "Duplicate reaction ignored");
                Ok(ReactionOutcome::Duplicate { emoji })
            }
            InsertOutcome::Inserted => {
                let count = self.ctx.reaction_repo().increment(&post_id, emoji, 1).await?;

                info!(post_id = %post_id, emoji = %emoji, count, "Reaction recorded");

                Ok(ReactionOutcome::Recorded { emoji, count })
            }
        }
    }

    /// Counts for every emoji kind on a published post.
    ///
    /// Drafts report `PostNotFound` here even though their four zeroed rows
    /// exist; admin reads through `PostService::get_post` include them.
    #[instrument(skip(self))]
    pub async fn get_aggregates(&self, post_id: &str) -> ServiceResult<ReactionCounts> {
        let post_id = PostId::parse(post_id)?;
        self.require_published(&post_id).await?;

        let rows = self.ctx.reaction_repo().find_aggregates(&post_id).await?;
        Ok(ReactionCounts::from(rows))
    }

    /// Counts plus the kinds this viewer has already used, so a client can
    /// render its buttons in the right state.
    #[instrument(skip(self, meta))]
    pub async fn get_reaction_summary(
        &self,
        post_id: &str,
        meta: &RequestMetadata,
    ) -> ServiceResult<ReactionSummaryResponse> {
        let post_id = PostId::parse(post_id)?;
        self.require_published(&post_id).await?;

        let viewer = ViewerFingerprint::derive(meta, self.ctx.fingerprint_salt());
        let repo = self.ctx.reaction_repo();
        let counts = ReactionCounts::from(repo.find_aggregates(&post_id).await?);
        let reacted = repo.find_viewer_emojis(&post_id, &viewer).await?;

        Ok(ReactionSummaryResponse::new(&post_id, counts, reacted))
    }

    /// Rebuild aggregates from the event ledger, for one post or all of them.
    /// Returns the number of aggregate rows that changed.
    #[instrument(skip(self))]
    pub async fn reconcile(&self, post_id: Option<&str>) -> ServiceResult<u64> {
        let post_id = post_id.map(PostId::parse).transpose()?;

        if let Some(id) = &post_id {
            if self.ctx.post_repo().find_by_id(id).await?.is_none() {
                return Err(DomainError::PostNotFound(id.clone()).into());
            }
        }

        let corrected = self.ctx.reaction_repo().reconcile(post_id.as_ref()).await?;

        info!(
            post_id = post_id.as_ref().map_or("*", PostId::as_str),
            corrected,
            "Reaction aggregates reconciled"
        );

        Ok(corrected)
    }

    /// Drafts are invisible to viewers and report as unknown
    async fn require_published(&self, post_id: &PostId) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .filter(Post::is_published)
            .ok_or_else(|| DomainError::PostNotFound(post_id.clone()).into())
    }
}
