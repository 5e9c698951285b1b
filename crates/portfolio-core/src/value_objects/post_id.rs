//! Post ID - opaque string identifier

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Opaque post identifier. New posts get a UUID v4 rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Longest identifier accepted from the outside
    pub const MAX_LEN: usize = 64;

    /// Wrap a raw identifier without validation
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Parse an identifier supplied by a caller. Padded input is rejected
    /// rather than trimmed, so `" p1 "` never resolves to `p1`.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "post id must not be empty".to_string(),
            ));
        }
        if s.trim().len() != s.len() {
            return Err(DomainError::ValidationError(
                "post id must not start or end with whitespace".to_string(),
            ));
        }
        if s.len() > Self::MAX_LEN {
            return Err(DomainError::ValidationError(format!(
                "post id must be at most {} characters",
                Self::MAX_LEN
            )));
        }
        Ok(Self(s.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PostId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for PostId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
