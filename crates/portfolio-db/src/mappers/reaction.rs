//! Reaction aggregate entity <-> model mapper

use portfolio_core::{DomainError, EmojiKind, PostId, ReactionAggregate};

use crate::models::ReactionAggregateModel;

use super::corrupt_row;

/// Convert ReactionAggregateModel to ReactionAggregate entity
impl TryFrom<ReactionAggregateModel> for ReactionAggregate {
    type Error = DomainError;

    fn try_from(model: ReactionAggregateModel) -> Result<Self, Self::Error> {
        let emoji = EmojiKind::parse(&model.emoji).map_err(|_| corrupt_row("emoji", &model.emoji))?;
        Ok(ReactionAggregate::new(PostId::new(model.post_id), emoji, model.count))
    }
}
