//! Reaction handlers
//!
//! Anonymous emoji reactions on published posts.

use axum::{extract::State, Json};
use portfolio_core::{DomainError, ReactionOutcome};
use portfolio_service::dto::{ReactionResponse, ReactionSummaryResponse};
use portfolio_service::ReactionService;

use crate::extractors::{ApiPath, PostIdPath, ReactionPath, ViewerMeta};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Record a reaction from the calling viewer
///
/// POST /posts/{post_id}/reactions/{emoji}
///
/// 200 with the new count, or 409 `ALREADY_REACTED` when this viewer
/// already used the emoji on the post.
pub async fn add_reaction(
    State(state): State<AppState>,
    ViewerMeta(meta): ViewerMeta,
    ApiPath(path): ApiPath<ReactionPath>,
) -> ApiResult<Json<ReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    let outcome = service
        .record_reaction(&path.post_id, &path.emoji, &meta)
        .await?;

    match outcome {
        ReactionOutcome::Recorded { emoji, count } => Ok(Json(ReactionResponse { emoji, count })),
        ReactionOutcome::Duplicate { emoji } => {
            Err(ApiError::from(DomainError::ReactionAlreadyExists(emoji)))
        }
    }
}

/// Counts for every emoji plus the ones this viewer already used
///
/// GET /posts/{post_id}/reactions
pub async fn get_reactions(
    State(state): State<AppState>,
    ViewerMeta(meta): ViewerMeta,
    ApiPath(path): ApiPath<PostIdPath>,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let service = ReactionService::new(state.service_context());
    let summary = service.get_reaction_summary(&path.post_id, &meta).await?;
    Ok(Json(summary))
}
