//! Viewer fingerprint - pseudonymous per-viewer identity for reaction de-duplication
//!
//! The digest is SHA-256 over `address|user-agent|salt`, rendered as lowercase
//! hex. It is coarse on purpose: viewers behind the same NAT with the same
//! browser collapse into one identity.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use super::RequestMetadata;

/// Stand-in for request metadata that is absent or blank
const UNKNOWN: &str = "unknown";

/// Server-held secret mixed into every fingerprint
#[derive(Clone, PartialEq, Eq)]
pub struct FingerprintSalt(String);

impl FingerprintSalt {
    /// Weak fallback used when no salt is configured
    pub const DEFAULT: &'static str = "portfolio-default-salt";

    pub fn new(salt: impl Into<String>) -> Self {
        Self(salt.into())
    }

    /// Whether this is the built-in fallback
    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FingerprintSalt {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Debug for FingerprintSalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FingerprintSalt(***)")
    }
}

/// 64-character lowercase hex SHA-256 digest identifying a viewer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewerFingerprint(String);

impl ViewerFingerprint {
    /// Derive the fingerprint for a request. Never fails.
    pub fn derive(meta: &RequestMetadata, salt: &FingerprintSalt) -> Self {
        let address = present_or_unknown(meta.source_address.as_deref());
        let user_agent = present_or_unknown(meta.user_agent.as_deref());

        let mut hasher = Sha256::new();
        hasher.update(address.as_bytes());
        hasher.update(b"|");
        hasher.update(user_agent.as_bytes());
        hasher.update(b"|");
        hasher.update(salt.as_str().as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wrap a digest that was derived earlier, e.g. one read back from storage
    pub fn from_hex(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewerFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn present_or_unknown(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        let meta = RequestMetadata::new()
            .with_source_address("203.0.113.7")
            .with_user_agent("Mozilla/5.0");
        let fp = ViewerFingerprint::derive(&meta, &FingerprintSalt::new("s3cret"));
        assert_eq!(
            fp.as_str(),
            "58275fcb8bf9d3fa684f3c51dcbe12a869ea0c975755777c3e1046432a6be8cd"
        );
    }

    #[test]
    fn test_missing_metadata_uses_sentinel() {
        let fp = ViewerFingerprint::derive(&RequestMetadata::new(), &FingerprintSalt::default());
        assert_eq!(
            fp.as_str(),
            "fdeb127e170aea5f14b3d455aac2b5155a2b3ac7f95df839fe35d4969240d2af"
        );

        let blank = RequestMetadata::new()
            .with_source_address("  ")
            .with_user_agent("");
        assert_eq!(ViewerFingerprint::derive(&blank, &FingerprintSalt::default()), fp);
    }

    #[test]
    fn test_shape_is_lowercase_hex() {
        let meta = RequestMetadata::new().with_user_agent("curl/8.0");
        let fp = ViewerFingerprint::derive(&meta, &FingerprintSalt::default());
        assert_eq!(fp.as_str().len(), 64);
        assert!(fp
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_salt_and_inputs_change_digest() {
        let meta = RequestMetadata::new()
            .with_source_address("10.0.0.1")
            .with_user_agent("ua");
        let a = ViewerFingerprint::derive(&meta, &FingerprintSalt::new("one"));
        let b = ViewerFingerprint::derive(&meta, &FingerprintSalt::new("two"));
        assert_ne!(a, b);

        let other = meta.clone().with_source_address("10.0.0.2");
        let c = ViewerFingerprint::derive(&other, &FingerprintSalt::new("one"));
        assert_ne!(a, c);

        // Method and path do not participate
        let same = meta.with_method("POST").with_path("/x");
        assert_eq!(ViewerFingerprint::derive(&same, &FingerprintSalt::new("one")), a);
    }

    #[test]
    fn test_salt_debug_is_redacted() {
        let salt = FingerprintSalt::new("hunter2");
        assert!(!format!("{salt:?}").contains("hunter2"));
        assert!(FingerprintSalt::default().is_default());
        assert!(!salt.is_default());
    }
}
