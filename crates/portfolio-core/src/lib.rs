//! # portfolio-core
//!
//! Domain layer containing posts, the reaction ledger types, value objects and
//! repository traits. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Post, PostStatus, ReactionAggregate, ReactionCounts, ReactionEvent, ReactionOutcome,
};
pub use error::DomainError;
pub use traits::{
    InsertOutcome, PostQuery, PostRepository, ReactionRepository, RepoResult,
};
pub use value_objects::{
    EmojiKind, FingerprintSalt, ImageRef, PostId, RequestMetadata, ViewerFingerprint,
};
