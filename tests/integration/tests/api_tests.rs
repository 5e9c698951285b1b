//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance and `DATABASE_URL`.
//! `ADMIN_TOKEN` is optional; a fixed test token is used when unset.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error_code, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
    Viewer,
};
use reqwest::StatusCode;
use serde_json::json;

async fn create_post(server: &TestServer, request: &CreatePost) -> PostBody {
    let response = server
        .admin_post("/api/v1/admin/posts", request)
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_react_then_duplicate() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::published("react")).await;
    let viewer = Viewer::unique();

    let response = server.react(&post.id, "heart", &viewer).await.unwrap();
    let body: ReactionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.emoji, "heart");
    assert_eq!(body.count, 1);

    let response = server.react(&post.id, "heart", &viewer).await.unwrap();
    let code = assert_error_code(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_REACTED");

    // Another viewer on the same emoji still counts
    let response = server.react(&post.id, "heart", &Viewer::unique()).await.unwrap();
    let body: ReactionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.count, 2);
}

#[tokio::test]
async fn test_invalid_emoji_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::published("emoji")).await;

    let response = server.react(&post.id, "laugh", &Viewer::unique()).await.unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_EMOJI");

    // Invalid emoji wins over unknown post
    let response = server.react("no-such-post", "laugh", &Viewer::unique()).await.unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_EMOJI");
}

#[tokio::test]
async fn test_unknown_and_draft_posts_are_404() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .react(&unique_post_id("missing"), "wow", &Viewer::unique())
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_POST");

    let draft = create_post(&server, &CreatePost::draft("draft")).await;
    let response = server.react(&draft.id, "wow", &Viewer::unique()).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get(&format!("/api/v1/posts/{}", draft.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_summary_lists_all_kinds_and_viewer_state() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::published("summary")).await;
    let viewer = Viewer::unique();

    server.react(&post.id, "clap", &viewer).await.unwrap();

    let path = format!("/api/v1/posts/{}/reactions", post.id);
    let response = server.get_as(&path, &viewer).await.unwrap();
    let summary: SummaryBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(summary.post_id, post.id);
    assert_eq!(summary.counts.len(), 4);
    assert_eq!(summary.counts["clap"], 1);
    assert_eq!(summary.counts["heart"], 0);
    assert_eq!(summary.reacted, vec!["clap"]);

    let response = server.get_as(&path, &Viewer::unique()).await.unwrap();
    let summary: SummaryBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(summary.reacted.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_viewers_all_counted() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::published("burst")).await;

    let viewers: Vec<Viewer> = (0..25).map(|_| Viewer::unique()).collect();
    let requests = viewers.iter().map(|v| server.react(&post.id, "fire", v));
    let responses = futures::future::join_all(requests).await;

    for response in responses {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }

    let response = server.get(&format!("/api/v1/posts/{}", post.id)).await.unwrap();
    let body: PostBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.reactions["fire"], 25);
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_post_seeds_zero_counts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::published("seed")).await;

    assert_eq!(post.status, "published");
    assert_eq!(post.reactions.len(), 4);
    assert!(post.reactions.values().all(|&c| c == 0));

    let response = server.get(&format!("/api/v1/posts/{}", post.id)).await.unwrap();
    let fetched: PostBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.title, post.title);
    assert_eq!(fetched.body, post.body);
}

#[tokio::test]
async fn test_create_post_validation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .admin_post("/api/v1/admin/posts", &json!({ "title": "" }))
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let response = server
        .admin_post(
            "/api/v1/admin/posts",
            &json!({ "title": "Bad image", "images": ["ftp://host/a.png"] }),
        )
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_IMAGE_REF");
}

#[tokio::test]
async fn test_update_and_delete_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::draft("lifecycle")).await;
    let path = format!("/api/v1/admin/posts/{}", post.id);

    let response = server
        .admin_patch(&path, &json!({ "title": "Renamed", "status": "published" }))
        .await
        .unwrap();
    let updated: PostBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.status, "published");

    server.react(&post.id, "wow", &Viewer::unique()).await.unwrap();

    let response = server.admin_delete(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.admin_get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.react(&post.id, "wow", &Viewer::unique()).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_public_listing_paginates() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    create_post(&server, &CreatePost::published("page")).await;
    create_post(&server, &CreatePost::published("page")).await;

    let response = server.get("/api/v1/posts?limit=1&offset=0").await.unwrap();
    let page: PostPage = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.pagination.limit, 1);
    assert_eq!(page.pagination.offset, 0);
    assert!(page.pagination.total >= 2);
    assert!(page.pagination.has_more);
    assert_eq!(page.data[0].status, "published");

    let response = server.get("/api/v1/posts?offset=-1").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Admin Auth Tests
// ============================================================================

#[tokio::test]
async fn test_admin_routes_require_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/admin/posts").await.unwrap();
    let code = assert_error_code(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");

    let response = server
        .post_with_token("/api/v1/admin/reactions/reconcile", "wrong-token")
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_admin_reconcile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::published("reconcile")).await;
    server.react(&post.id, "heart", &Viewer::unique()).await.unwrap();

    // Counts already agree with the ledger
    let response = server
        .admin_post(
            "/api/v1/admin/reactions/reconcile",
            &json!({ "post_id": post.id }),
        )
        .await
        .unwrap();
    let body: ReconcileBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.corrected, 0);

    let response = server
        .admin_post(
            "/api/v1/admin/reactions/reconcile",
            &json!({ "post_id": unique_post_id("ghost") }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
