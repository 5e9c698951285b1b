//! Post entity - a feed entry in the portfolio

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::{ImageRef, PostId};

/// Publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    #[default]
    Published,
}

impl PostStatus {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(DomainError::InvalidPostStatus(other.to_string())),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub images: Vec<ImageRef>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Maximum title length
    pub const MAX_TITLE_LENGTH: usize = 200;

    /// Maximum body length
    pub const MAX_BODY_LENGTH: usize = 20_000;

    /// Maximum number of images on one post
    pub const MAX_IMAGES: usize = 32;

    /// Create a new Post
    pub fn new(
        id: PostId,
        title: String,
        body: String,
        images: Vec<ImageRef>,
        status: PostStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            body,
            images,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Visible to the public and open for reactions
    #[inline]
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Bump the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
