//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use portfolio_core::{
    DomainError, EmojiKind, Post, PostId, PostQuery, PostRepository, PostStatus, RepoResult,
};

use crate::mappers::{into_entities, PostInsert, PostUpdate};
use crate::models::PostModel;

use super::error::{map_db_error, map_unique_violation, post_not_found};

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &PostId) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r#"
            SELECT id, title, body, images, status, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Post::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &PostQuery) -> RepoResult<Vec<Post>> {
        let limit = query.limit.clamp(1, 100);
        let offset = query.offset.max(0);

        let results = sqlx::query_as::<_, PostModel>(
            r#"
            SELECT id, title, body, images, status, created_at, updated_at
            FROM posts
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query.status.map(PostStatus::as_str))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_entities(results)
    }

    #[instrument(skip(self))]
    async fn count(&self, status: Option<PostStatus>) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM posts WHERE ($1::text IS NULL OR status = $1)
            "#,
        )
        .bind(status.map(PostStatus::as_str))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        let insert = PostInsert::new(post);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO posts (id, title, body, images, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(insert.id)
        .bind(insert.title)
        .bind(insert.body)
        .bind(&insert.images)
        .bind(insert.status)
        .bind(insert.created_at)
        .bind(insert.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::PostAlreadyExists(post.id.clone())))?;

        let emojis: Vec<&str> = EmojiKind::ALL.iter().map(|e| e.as_str()).collect();
        let seeded = sqlx::query(
            r#"
            INSERT INTO reaction_aggregates (post_id, emoji, count)
            SELECT $1, emoji, 0 FROM UNNEST($2::text[]) AS emoji
            "#,
        )
        .bind(insert.id)
        .bind(&emojis)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if seeded.rows_affected() != EmojiKind::ALL.len() as u64 {
            // Dropping the transaction rolls back the post insert
            return Err(DomainError::InternalError(format!(
                "seeded {} aggregate rows for post {}",
                seeded.rows_affected(),
                post.id
            )));
        }

        tx.commit().await.map_err(map_db_error)?;
        debug!("Post and reaction aggregates created");
        Ok(())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let update = PostUpdate::new(post);

        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, body = $3, images = $4, status = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(update.id)
        .bind(update.title)
        .bind(update.body)
        .bind(&update.images)
        .bind(update.status)
        .bind(update.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(&post.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &PostId) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPostRepository>();
    }
}
