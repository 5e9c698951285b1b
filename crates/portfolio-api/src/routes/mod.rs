//! Route definitions
//!
//! All API routes organized by audience and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{admin, health, posts, reactions};
use crate::state::AppState;

/// Create the main API router (health is exported separately to bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .nest("/admin", admin_routes())
}

/// Public feed and reaction routes
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts))
        .route("/posts/:post_id", get(posts::get_post))
        .route("/posts/:post_id/reactions", get(reactions::get_reactions))
        .route(
            "/posts/:post_id/reactions/:emoji",
            post(reactions::add_reaction),
        )
}

/// Admin routes (bearer token required)
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(admin::list_posts).post(admin::create_post))
        .route(
            "/posts/:post_id",
            get(admin::get_post)
                .patch(admin::update_post)
                .delete(admin::delete_post),
        )
        .route("/reactions/reconcile", post(admin::reconcile_reactions))
}
