//! Error types for the store crate.

use superheroes_core::Entity;

/// Errors that can occur while reading or writing the store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The requested row does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i64 },

    /// An association referenced a row that does not exist.
    #[error("{entity} {id} does not exist")]
    UnknownReference { entity: Entity, id: i64 },

    /// Underlying database failure: connection, constraint, or decode error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
