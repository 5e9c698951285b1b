//! Reaction ledger entities - events, aggregates and per-post counts

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::value_objects::{EmojiKind, PostId, ViewerFingerprint};

/// One viewer reacting to one post with one emoji. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub post_id: PostId,
    pub emoji: EmojiKind,
    pub viewer: ViewerFingerprint,
    pub created_at: DateTime<Utc>,
}

impl ReactionEvent {
    /// Create a new ReactionEvent
    pub fn new(post_id: PostId, emoji: EmojiKind, viewer: ViewerFingerprint) -> Self {
        Self {
            post_id,
            emoji,
            viewer,
            created_at: Utc::now(),
        }
    }
}

/// Denormalized running count for a (post, emoji) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionAggregate {
    pub post_id: PostId,
    pub emoji: EmojiKind,
    pub count: i64,
}

impl ReactionAggregate {
    pub fn new(post_id: PostId, emoji: EmojiKind, count: i64) -> Self {
        Self {
            post_id,
            emoji,
            count,
        }
    }

    /// The four zeroed rows every new post starts with
    pub fn seed(post_id: &PostId) -> Vec<Self> {
        EmojiKind::ALL
            .iter()
            .map(|&emoji| Self::new(post_id.clone(), emoji, 0))
            .collect()
    }
}

/// Counts for every emoji kind on a post. Always holds all four kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReactionCounts(BTreeMap<EmojiKind, i64>);

impl ReactionCounts {
    /// All kinds at zero
    pub fn zeroed() -> Self {
        Self(EmojiKind::ALL.iter().map(|&k| (k, 0)).collect())
    }

    /// Build from whatever rows storage returned; absent kinds stay at zero
    pub fn from_pairs(pairs: impl IntoIterator<Item = (EmojiKind, i64)>) -> Self {
        let mut counts = Self::zeroed();
        for (emoji, count) in pairs {
            counts.0.insert(emoji, count);
        }
        counts
    }

    #[inline]
    pub fn get(&self, emoji: EmojiKind) -> i64 {
        self.0.get(&emoji).copied().unwrap_or(0)
    }

    pub fn total(&self) -> i64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmojiKind, i64)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }
}

impl Default for ReactionCounts {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl From<Vec<ReactionAggregate>> for ReactionCounts {
    fn from(rows: Vec<ReactionAggregate>) -> Self {
        Self::from_pairs(rows.into_iter().map(|a| (a.emoji, a.count)))
    }
}

/// Result of a record-reaction attempt that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// First reaction from this viewer; `count` is the aggregate after the increment
    Recorded { emoji: EmojiKind, count: i64 },
    /// Viewer already reacted with this emoji; nothing changed
    Duplicate { emoji: EmojiKind },
}

impl ReactionOutcome {
    pub fn emoji(&self) -> EmojiKind {
        match self {
            Self::Recorded { emoji, .. } | Self::Duplicate { emoji } => *emoji,
        }
    }

    #[inline]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}
