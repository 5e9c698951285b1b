//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod context;
pub mod error;
pub mod post;
pub mod reaction;
pub mod reconciler;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use post::PostService;
pub use reaction::ReactionService;
pub use reconciler::spawn_reconciler;
