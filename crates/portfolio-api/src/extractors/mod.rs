//! Axum extractors for request handling
//!
//! Custom extractors for admin authentication, viewer metadata,
//! validation, and pagination.

mod admin;
mod pagination;
mod path;
mod validated;
mod viewer;

pub use admin::AdminUser;
pub use pagination::{AdminPostFilter, Pagination, PaginationParams};
pub use path::{ApiPath, PostIdPath, ReactionPath};
pub use validated::{OptionalValidatedJson, ValidatedJson};
pub use viewer::ViewerMeta;
