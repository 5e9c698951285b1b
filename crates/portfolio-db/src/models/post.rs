//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: String,
    pub title: String,
    pub body: String,
    pub images: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
