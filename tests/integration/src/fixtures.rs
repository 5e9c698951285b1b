//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Post id unlikely to collide with earlier runs against the same database
pub fn unique_post_id(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    format!("{prefix}-{}-{nanos}", unique_suffix())
}

/// Create post request
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatePost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub body: String,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CreatePost {
    pub fn published(prefix: &str) -> Self {
        Self {
            id: Some(unique_post_id(prefix)),
            title: format!("Integration {prefix}"),
            body: "Posted by the integration suite".to_string(),
            ..Default::default()
        }
    }

    pub fn draft(prefix: &str) -> Self {
        Self {
            status: Some("draft".to_string()),
            ..Self::published(prefix)
        }
    }
}

/// Post response
#[derive(Debug, Deserialize)]
pub struct PostBody {
    pub id: String,
    pub title: String,
    pub body: String,
    pub images: Vec<String>,
    pub status: String,
    pub reactions: BTreeMap<String, i64>,
}

/// Page of posts
#[derive(Debug, Deserialize)]
pub struct PostPage {
    pub data: Vec<PostBody>,
    pub pagination: PageMeta,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

/// Body of a recorded reaction
#[derive(Debug, Deserialize)]
pub struct ReactionBody {
    pub emoji: String,
    pub count: i64,
}

/// Reaction summary for a post
#[derive(Debug, Deserialize)]
pub struct SummaryBody {
    pub post_id: String,
    pub counts: BTreeMap<String, i64>,
    pub reacted: Vec<String>,
}

/// Reconcile result
#[derive(Debug, Deserialize)]
pub struct ReconcileBody {
    pub corrected: u64,
}
