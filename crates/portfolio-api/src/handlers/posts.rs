//! Public post handlers
//!
//! Published posts only; drafts answer 404.

use axum::{extract::State, Json};
use portfolio_service::dto::{PaginatedResponse, PostResponse};
use portfolio_service::PostService;

use crate::extractors::{ApiPath, Pagination, PostIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// List published posts, newest first
///
/// GET /posts?limit&offset
pub async fn list_posts(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let page = service
        .list_published_posts(Some(pagination.limit), Some(pagination.offset))
        .await?;
    Ok(Json(page))
}

/// Get a published post with its reaction counts
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<PostIdPath>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.get_published_post(&path.post_id).await?;
    Ok(Json(post))
}
