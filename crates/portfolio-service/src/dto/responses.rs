//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;

use portfolio_core::{EmojiKind, PostStatus, ReactionCounts};

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with offset-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, limit: i64, offset: i64) -> Self {
        let has_more = offset.saturating_add(i64::try_from(data.len()).unwrap_or(i64::MAX)) < total;
        Self {
            data,
            pagination: PaginationMeta {
                total,
                limit,
                offset,
                has_more,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Total matching rows
    pub total: i64,
    /// Page size limit used
    pub limit: i64,
    pub offset: i64,
    /// Whether more results exist
    pub has_more: bool,
}

// ============================================================================
// Post Responses
// ============================================================================

/// Post with its reaction counts
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub images: Vec<String>,
    pub status: PostStatus,
    pub reactions: ReactionCounts,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// Count after a successful reaction
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub emoji: EmojiKind,
    pub count: i64,
}

/// Counts for a post plus the kinds the requesting viewer already used
#[derive(Debug, Clone, Serialize)]
pub struct ReactionSummaryResponse {
    pub post_id: String,
    pub counts: ReactionCounts,
    pub reacted: Vec<EmojiKind>,
}

/// Reconciliation result
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileResponse {
    /// Aggregate rows that were re-seeded or corrected
    pub corrected: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_response_serialization() {
        let resp = ReactionResponse {
            emoji: EmojiKind::Fire,
            count: 3,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, serde_json::json!({"emoji": "fire", "count": 3}));
    }

    #[test]
    fn test_summary_lists_all_kinds() {
        let resp = ReactionSummaryResponse {
            post_id: "p1".to_string(),
            counts: ReactionCounts::from_pairs([(EmojiKind::Heart, 2)]),
            reacted: vec![EmojiKind::Heart],
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json["counts"],
            serde_json::json!({"heart": 2, "fire": 0, "clap": 0, "wow": 0})
        );
        assert_eq!(json["reacted"], serde_json::json!(["heart"]));
    }

    #[test]
    fn test_pagination_has_more() {
        let page = PaginatedResponse::new(vec![1, 2], 5, 2, 0);
        assert!(page.pagination.has_more);

        let page = PaginatedResponse::new(vec![5], 5, 2, 4);
        assert!(!page.pagination.has_more);
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true);
        assert!(ready.is_ready());
        assert_eq!(ready.checks.database, "healthy");

        let not_ready = ReadinessResponse::ready(false);
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.database, "unhealthy");
    }
}
