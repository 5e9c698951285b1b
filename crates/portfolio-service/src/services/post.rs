//! Post service
//!
//! Admin management of feed posts and the public, published-only reads.

use std::collections::HashMap;

use portfolio_core::{
    DomainError, ImageRef, Post, PostId, PostQuery, PostStatus, ReactionCounts,
};
use tracing::{info, instrument};

use crate::dto::{
    CreatePostRequest, PaginatedResponse, PostResponse, PostWithCounts, UpdatePostRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Default page size for listings
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page a caller may ask for
pub const MAX_PAGE_SIZE: i64 = 100;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Admin operations
    // ========================================================================

    /// Create a post. Its four aggregates are seeded in the same transaction.
    #[instrument(skip(self, request))]
    pub async fn create_post(&self, request: CreatePostRequest) -> ServiceResult<PostResponse> {
        let id = match request.id.as_deref() {
            Some(raw) => PostId::parse(raw)?,
            None => PostId::generate(),
        };
        let status = parse_status(request.status.as_deref())?.unwrap_or_default();
        let title = require_title(&request.title)?;
        check_body(&request.body)?;
        let images = self.normalize_images(&request.images)?;

        let post = Post::new(id, title, request.body, images, status);
        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, status = %post.status, "Post created");

        Ok(PostWithCounts {
            post,
            counts: ReactionCounts::zeroed(),
        }
        .into())
    }

    /// Apply the fields present in `request`
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        post_id: &str,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let post_id = PostId::parse(post_id)?;
        let mut post = self.find_any(&post_id).await?;

        if let Some(title) = request.title.as_deref() {
            post.title = require_title(title)?;
        }
        if let Some(body) = request.body {
            check_body(&body)?;
            post.body = body;
        }
        if let Some(images) = request.images.as_deref() {
            post.images = self.normalize_images(images)?;
        }
        if let Some(status) = parse_status(request.status.as_deref())? {
            post.status = status;
        }
        post.touch();

        self.ctx.post_repo().update(&post).await?;

        info!(post_id = %post.id, "Post updated");

        self.with_counts(post).await
    }

    /// Delete a post together with its aggregates and events
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: &str) -> ServiceResult<()> {
        let post_id = PostId::parse(post_id)?;
        self.ctx.post_repo().delete(&post_id).await?;

        info!(post_id = %post_id, "Post deleted");

        Ok(())
    }

    /// Any post, drafts included
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: &str) -> ServiceResult<PostResponse> {
        let post_id = PostId::parse(post_id)?;
        let post = self.find_any(&post_id).await?;
        self.with_counts(post).await
    }

    /// All posts, optionally filtered by status
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        status: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let status = parse_status(status)?;
        let query = PostQuery {
            status,
            limit: clamp_limit(limit),
            offset: offset.unwrap_or(0).max(0),
        };
        self.list(query).await
    }

    // ========================================================================
    // Public reads
    // ========================================================================

    /// A published post; drafts report as unknown
    #[instrument(skip(self))]
    pub async fn get_published_post(&self, post_id: &str) -> ServiceResult<PostResponse> {
        let post_id = PostId::parse(post_id)?;
        let post = self
            .ctx
            .post_repo()
            .find_by_id(&post_id)
            .await?
            .filter(Post::is_published)
            .ok_or(DomainError::PostNotFound(post_id))?;
        self.with_counts(post).await
    }

    /// Published posts, newest first
    #[instrument(skip(self))]
    pub async fn list_published_posts(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let query = PostQuery::published(clamp_limit(limit), offset.unwrap_or(0).max(0));
        self.list(query).await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn find_any(&self, post_id: &PostId) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_id.clone()).into())
    }

    async fn with_counts(&self, post: Post) -> ServiceResult<PostResponse> {
        let rows = self.ctx.reaction_repo().find_aggregates(&post.id).await?;
        Ok(PostWithCounts {
            post,
            counts: ReactionCounts::from(rows),
        }
        .into())
    }

    async fn list(&self, query: PostQuery) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let repo = self.ctx.post_repo();
        let posts = repo.list(&query).await?;
        let total = repo.count(query.status).await?;

        // One round-trip for every post's aggregates
        let ids: Vec<PostId> = posts.iter().map(|p| p.id.clone()).collect();
        let mut by_post: HashMap<PostId, Vec<(_, _)>> = HashMap::new();
        for row in self.ctx.reaction_repo().find_aggregates_for_posts(&ids).await? {
            by_post
                .entry(row.post_id)
                .or_default()
                .push((row.emoji, row.count));
        }

        let data = posts
            .into_iter()
            .map(|post| {
                let counts = by_post
                    .remove(&post.id)
                    .map(ReactionCounts::from_pairs)
                    .unwrap_or_default();
                PostResponse::from(PostWithCounts { post, counts })
            })
            .collect();

        Ok(PaginatedResponse::new(data, total, query.limit, query.offset))
    }

    fn normalize_images(&self, raw: &[String]) -> ServiceResult<Vec<ImageRef>> {
        if raw.len() > Post::MAX_IMAGES {
            return Err(DomainError::ValidationError(format!(
                "At most {} images per post",
                Post::MAX_IMAGES
            ))
            .into());
        }
        let base = self.ctx.storage_public_base_url();
        raw.iter()
            .map(|r| ImageRef::normalize(r, base).map_err(Into::into))
            .collect()
    }
}

fn parse_status(raw: Option<&str>) -> ServiceResult<Option<PostStatus>> {
    Ok(raw.map(PostStatus::parse).transpose()?)
}

fn require_title(raw: &str) -> ServiceResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(DomainError::ValidationError("Title cannot be empty".to_string()).into());
    }
    if title.chars().count() > Post::MAX_TITLE_LENGTH {
        return Err(DomainError::ContentTooLong {
            max: Post::MAX_TITLE_LENGTH,
        }
        .into());
    }
    Ok(title.to_string())
}

fn check_body(body: &str) -> ServiceResult<()> {
    if body.chars().count() > Post::MAX_BODY_LENGTH {
        return Err(DomainError::ContentTooLong {
            max: Post::MAX_BODY_LENGTH,
        }
        .into());
    }
    Ok(())
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(500)), MAX_PAGE_SIZE);
        assert_eq!(clamp_limit(Some(10)), 10);
    }

    #[test]
    fn test_require_title_trims() {
        assert_eq!(require_title("  Hello ").unwrap(), "Hello");
        assert!(require_title("   ").is_err());
        assert!(require_title(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status(None).unwrap(), None);
        assert_eq!(parse_status(Some("draft")).unwrap(), Some(PostStatus::Draft));
        let err = parse_status(Some("archived")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_POST_STATUS");
    }
}
