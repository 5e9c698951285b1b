//! Entity to model mappers
//!
//! This module provides conversions between domain entities (portfolio-core) and database models.
//! - `TryFrom<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert`/`*Update` structs: Prepare entity data for database operations

mod post;
mod reaction;

pub use post::{PostInsert, PostUpdate};

use portfolio_core::DomainError;

/// Convert a batch of rows, failing on the first one that does not map
pub fn into_entities<M, E>(rows: Vec<M>) -> Result<Vec<E>, DomainError>
where
    E: TryFrom<M, Error = DomainError>,
{
    rows.into_iter().map(E::try_from).collect()
}

/// Stored value that does not fit the domain type
pub(crate) fn corrupt_row(column: &str, value: &str) -> DomainError {
    DomainError::DatabaseError(format!("unexpected {column} value in row: {value:?}"))
}
