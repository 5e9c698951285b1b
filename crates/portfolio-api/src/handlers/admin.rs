//! Admin handlers
//!
//! Post management and ledger maintenance. Every handler requires
//! the admin bearer token.

use axum::{
    extract::{Query, State},
    Json,
};
use portfolio_service::dto::{
    CreatePostRequest, PaginatedResponse, PostResponse, ReconcileRequest, ReconcileResponse,
    UpdatePostRequest,
};
use portfolio_service::{PostService, ReactionService};

use crate::extractors::{
    AdminPostFilter, AdminUser, ApiPath, OptionalValidatedJson, Pagination, PostIdPath,
    ValidatedJson,
};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// List posts of any status
///
/// GET /admin/posts?status&limit&offset
pub async fn list_posts(
    State(state): State<AppState>,
    _admin: AdminUser,
    pagination: Pagination,
    filter: Result<Query<AdminPostFilter>, axum::extract::rejection::QueryRejection>,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let Query(filter) = filter.map_err(|e| ApiError::invalid_query(e.body_text()))?;

    let service = PostService::new(state.service_context());
    let page = service
        .list_posts(
            filter.status.as_deref(),
            Some(pagination.limit),
            Some(pagination.offset),
        )
        .await?;
    Ok(Json(page))
}

/// Create a post
///
/// POST /admin/posts
pub async fn create_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let post = service.create_post(request).await?;
    Ok(Created(Json(post)))
}

/// Get any post, drafts included
///
/// GET /admin/posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(path): ApiPath<PostIdPath>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.get_post(&path.post_id).await?;
    Ok(Json(post))
}

/// Update a post
///
/// PATCH /admin/posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(path): ApiPath<PostIdPath>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.update_post(&path.post_id, request).await?;
    Ok(Json(post))
}

/// Delete a post with its reactions
///
/// DELETE /admin/posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(path): ApiPath<PostIdPath>,
) -> ApiResult<NoContent> {
    let service = PostService::new(state.service_context());
    service.delete_post(&path.post_id).await?;
    Ok(NoContent)
}

/// Rebuild aggregates from the event ledger
///
/// POST /admin/reactions/reconcile
pub async fn reconcile_reactions(
    State(state): State<AppState>,
    _admin: AdminUser,
    OptionalValidatedJson(request): OptionalValidatedJson<ReconcileRequest>,
) -> ApiResult<Json<ReconcileResponse>> {
    let post_id = request.and_then(|r| r.post_id);

    let service = ReactionService::new(state.service_context());
    let corrected = service.reconcile(post_id.as_deref()).await?;

    Ok(Json(ReconcileResponse { corrected, post_id }))
}
