//! Emoji kind - the closed set of reactions a viewer can leave on a post

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// One of the four fixed reaction categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiKind {
    Heart,
    Fire,
    Clap,
    Wow,
}

impl EmojiKind {
    /// Every valid kind, in display order
    pub const ALL: [EmojiKind; 4] = [Self::Heart, Self::Fire, Self::Clap, Self::Wow];

    /// Wire and storage representation
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heart => "heart",
            Self::Fire => "fire",
            Self::Clap => "clap",
            Self::Wow => "wow",
        }
    }

    /// Parse from the wire representation. Matching is exact.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "heart" => Ok(Self::Heart),
            "fire" => Ok(Self::Fire),
            "clap" => Ok(Self::Clap),
            "wow" => Ok(Self::Wow),
            other => Err(DomainError::InvalidEmoji(other.to_string())),
        }
    }
}

impl fmt::Display for EmojiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EmojiKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
