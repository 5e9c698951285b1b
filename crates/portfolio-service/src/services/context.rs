//! Service context - dependency container for services
//!
//! Holds the repositories and the process-wide settings services need.
//! Built once at startup and shared behind an `Arc`.

use std::sync::Arc;

use portfolio_core::{FingerprintSalt, PostRepository, ReactionRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    post_repo: Arc<dyn PostRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,

    // Settings
    fingerprint_salt: FingerprintSalt,
    storage_public_base_url: Option<String>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        fingerprint_salt: FingerprintSalt,
        storage_public_base_url: Option<String>,
    ) -> Self {
        Self {
            post_repo,
            reaction_repo,
            fingerprint_salt,
            storage_public_base_url,
        }
    }

    // === Repositories ===

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    // === Settings ===

    /// Secret mixed into viewer fingerprints
    pub fn fingerprint_salt(&self) -> &FingerprintSalt {
        &self.fingerprint_salt
    }

    /// Base URL bare image keys are joined to
    pub fn storage_public_base_url(&self) -> Option<&str> {
        self.storage_public_base_url.as_deref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("fingerprint_salt", &self.fingerprint_salt)
            .field("storage_public_base_url", &self.storage_public_base_url)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    post_repo: Option<Arc<dyn PostRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    fingerprint_salt: Option<FingerprintSalt>,
    storage_public_base_url: Option<String>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn fingerprint_salt(mut self, salt: FingerprintSalt) -> Self {
        self.fingerprint_salt = Some(salt);
        self
    }

    pub fn storage_public_base_url(mut self, url: Option<String>) -> Self {
        self.storage_public_base_url = url;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository is missing.
    /// A missing salt falls back to the built-in default.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.post_repo
                .ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            self.reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            self.fingerprint_salt.unwrap_or_default(),
            self.storage_public_base_url,
        ))
    }
}
