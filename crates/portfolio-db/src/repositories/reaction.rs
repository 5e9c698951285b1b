//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use portfolio_core::{
    DomainError, EmojiKind, InsertOutcome, PostId, ReactionAggregate, ReactionEvent,
    ReactionRepository, RepoResult, ViewerFingerprint,
};

use crate::mappers::into_entities;
use crate::models::ReactionAggregateModel;

use super::error::{is_foreign_key_violation, is_unique_violation, map_db_error, post_not_found};

/// Pairs with an event newer than this are left alone by reconciliation,
/// so an in-flight request between event insert and increment is not
/// double counted.
const RECONCILE_GRACE_SECS: f64 = 60.0;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self, event), fields(post_id = %event.post_id, emoji = %event.emoji))]
    async fn insert_event(&self, event: &ReactionEvent) -> RepoResult<InsertOutcome> {
        // Plain INSERT: the primary key decides, no read-then-write
        let result = sqlx::query(
            r#"
            INSERT INTO reaction_events (post_id, emoji, viewer_fingerprint, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(event.post_id.as_str())
        .bind(event.emoji.as_str())
        .bind(event.viewer.as_str())
        .bind(event.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(e) if is_unique_violation(&e) => {
                debug!("Reaction event already recorded");
                Ok(InsertOutcome::Duplicate)
            }
            Err(e) if is_foreign_key_violation(&e) => Err(post_not_found(&event.post_id)),
            Err(e) => Err(map_db_error(e)),
        }
    }

    #[instrument(skip(self))]
    async fn increment(&self, post_id: &PostId, emoji: EmojiKind, by: i64) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE reaction_aggregates
            SET count = count + $3
            WHERE post_id = $1 AND emoji = $2
            RETURNING count
            "#,
        )
        .bind(post_id.as_str())
        .bind(emoji.as_str())
        .bind(by)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        count.ok_or_else(|| DomainError::AggregateMissing {
            post_id: post_id.clone(),
            emoji,
        })
    }

    #[instrument(skip(self))]
    async fn count(&self, post_id: &PostId, emoji: EmojiKind) -> RepoResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT count FROM reaction_aggregates WHERE post_id = $1 AND emoji = $2
            "#,
        )
        .bind(post_id.as_str())
        .bind(emoji.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_aggregates(&self, post_id: &PostId) -> RepoResult<Vec<ReactionAggregate>> {
        let results = sqlx::query_as::<_, ReactionAggregateModel>(
            r#"
            SELECT post_id, emoji, count
            FROM reaction_aggregates
            WHERE post_id = $1
            "#,
        )
        .bind(post_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_entities(results)
    }

    #[instrument(skip(self), fields(posts = post_ids.len()))]
    async fn find_aggregates_for_posts(
        &self,
        post_ids: &[PostId],
    ) -> RepoResult<Vec<ReactionAggregate>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<&str> = post_ids.iter().map(PostId::as_str).collect();

        let results = sqlx::query_as::<_, ReactionAggregateModel>(
            r#"
            SELECT post_id, emoji, count
            FROM reaction_aggregates
            WHERE post_id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_entities(results)
    }

    #[instrument(skip(self, viewer))]
    async fn find_viewer_emojis(
        &self,
        post_id: &PostId,
        viewer: &ViewerFingerprint,
    ) -> RepoResult<Vec<EmojiKind>> {
        let results = sqlx::query_scalar::<_, String>(
            r#"
            SELECT emoji
            FROM reaction_events
            WHERE post_id = $1 AND viewer_fingerprint = $2
            "#,
        )
        .bind(post_id.as_str())
        .bind(viewer.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut emojis = results
            .iter()
            .map(|raw| EmojiKind::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        emojis.sort();
        Ok(emojis)
    }

    #[instrument(skip(self))]
    async fn reconcile(&self, post_id: Option<&PostId>) -> RepoResult<u64> {
        let post_id = post_id.map(PostId::as_str);
        let emojis: Vec<&str> = EmojiKind::ALL.iter().map(|e| e.as_str()).collect();

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Restore rows a post should have had since creation
        let seeded = sqlx::query(
            r#"
            INSERT INTO reaction_aggregates (post_id, emoji, count)
            SELECT p.id, e.emoji, 0
            FROM posts p CROSS JOIN UNNEST($2::text[]) AS e(emoji)
            WHERE ($1::text IS NULL OR p.id = $1)
            ON CONFLICT (post_id, emoji) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(&emojis)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        let corrected = sqlx::query(
            r#"
            UPDATE reaction_aggregates a
            SET count = ledger.events
            FROM (
                SELECT agg.post_id, agg.emoji, COUNT(ev.viewer_fingerprint) AS events
                FROM reaction_aggregates agg
                LEFT JOIN reaction_events ev
                       ON ev.post_id = agg.post_id AND ev.emoji = agg.emoji
                WHERE ($1::text IS NULL OR agg.post_id = $1)
                GROUP BY agg.post_id, agg.emoji
                HAVING COALESCE(MAX(ev.created_at), '-infinity'::timestamptz)
                       < NOW() - make_interval(secs => $2)
            ) AS ledger
            WHERE a.post_id = ledger.post_id
              AND a.emoji = ledger.emoji
              AND a.count <> ledger.events
            "#,
        )
        .bind(post_id)
        .bind(RECONCILE_GRACE_SECS)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        tx.commit().await.map_err(map_db_error)?;

        debug!(seeded, corrected, "Reaction aggregates reconciled");
        Ok(seeded + corrected)
    }
}
