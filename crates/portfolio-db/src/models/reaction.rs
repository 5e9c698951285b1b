//! Reaction aggregate database model

use sqlx::FromRow;

/// Database model for reaction_aggregates table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionAggregateModel {
    pub post_id: String,
    pub emoji: String,
    pub count: i64,
}
