//! Error handling utilities for repositories

use portfolio_core::{DomainError, PostId};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Whether the error is a unique-constraint violation
pub fn is_unique_violation(e: &SqlxError) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Whether the error is a foreign-key violation
pub fn is_foreign_key_violation(e: &SqlxError) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}

/// Create a "post not found" error
pub fn post_not_found(id: &PostId) -> DomainError {
    DomainError::PostNotFound(id.clone())
}
