//! Error types for the persistence layer.
//!
//! All fallible operations in this crate return [`DbError`], which wraps
//! the underlying [`sqlx`] and [`serde_json`] errors.

/// Errors that can occur in the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored grid or snapshot could not be (de)serialized. A symbol
    /// outside the `*`/`.` alphabet in a stored row surfaces here.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
