//! Image reference - a normalized public URL for an image attached to a post

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Normalized image URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Normalize raw admin input into a public URL.
    ///
    /// - `http://` and `https://` URLs are kept as-is
    /// - `//host/path` becomes `https://host/path`
    /// - anything else is an object-storage key joined to `public_base`
    pub fn normalize(raw: &str, public_base: Option<&str>) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::InvalidImageRef(
                "image reference must not be empty".to_string(),
            ));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidImageRef(format!(
                "image reference contains whitespace: {raw}"
            )));
        }

        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("https://") || lower.starts_with("http://") {
            return Ok(Self(raw.to_string()));
        }
        if let Some(rest) = raw.strip_prefix("//") {
            return Ok(Self(format!("https://{rest}")));
        }
        if raw.contains("://") {
            return Err(DomainError::InvalidImageRef(format!(
                "unsupported scheme: {raw}"
            )));
        }

        let key = raw.trim_start_matches('/');
        if key.is_empty() {
            return Err(DomainError::InvalidImageRef(
                "storage key must not be empty".to_string(),
            ));
        }
        let base = public_base
            .map(|b| b.trim().trim_end_matches('/'))
            .filter(|b| !b.is_empty())
            .ok_or_else(|| {
                DomainError::InvalidImageRef(format!(
                    "storage key {key} given but no public storage base URL is configured"
                ))
            })?;
        Ok(Self(format!("{base}/{key}")))
    }

    /// Wrap a URL that was normalized earlier, e.g. one read back from storage
    pub fn from_normalized(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Option<&str> = Some("https://cdn.example.com/media/");

    #[test]
    fn test_absolute_urls_kept() {
        let r = ImageRef::normalize(" https://img.example.org/a.jpg ", BASE).unwrap();
        assert_eq!(r.as_str(), "https://img.example.org/a.jpg");

        let r = ImageRef::normalize("HTTP://old.example.org/b.png", None).unwrap();
        assert_eq!(r.as_str(), "HTTP://old.example.org/b.png");
    }

    #[test]
    fn test_protocol_relative() {
        let r = ImageRef::normalize("//img.example.org/a.jpg", None).unwrap();
        assert_eq!(r.as_str(), "https://img.example.org/a.jpg");
    }

    #[test]
    fn test_storage_key_joined_once() {
        let r = ImageRef::normalize("/works/2024/piece.jpg", BASE).unwrap();
        assert_eq!(r.as_str(), "https://cdn.example.com/media/works/2024/piece.jpg");

        let r = ImageRef::normalize("piece.jpg", Some("https://cdn.example.com")).unwrap();
        assert_eq!(r.as_str(), "https://cdn.example.com/piece.jpg");
    }

    #[test]
    fn test_rejections() {
        assert!(ImageRef::normalize("", BASE).is_err());
        assert!(ImageRef::normalize("   ", BASE).is_err());
        assert!(ImageRef::normalize("///", BASE).is_err());
        assert!(ImageRef::normalize("piece.jpg", None).is_err());
        assert!(ImageRef::normalize("piece.jpg", Some("  ")).is_err());
        assert!(ImageRef::normalize("ftp://host/a.jpg", BASE).is_err());
        assert!(ImageRef::normalize("a b.jpg", BASE).is_err());
    }
}
