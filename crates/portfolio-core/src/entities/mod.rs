//! Domain entities - core business objects

mod post;
mod reaction;

pub use post::{Post, PostStatus};
pub use reaction::{ReactionAggregate, ReactionCounts, ReactionEvent, ReactionOutcome};
