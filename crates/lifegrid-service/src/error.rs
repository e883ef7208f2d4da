//! Error types for the service layer.
//!
//! [`ServiceError`] unifies every failure mode a caller can observe:
//! rejected uploads, missing entities, engine validation failures, and
//! storage failures. Storage failures distinguish the read side
//! ([`ServiceError::Storage`]) from the write side
//! ([`ServiceError::Persistence`]); only the latter is potentially
//! transient, and it names the operation and entity so the caller can
//! decide whether to retry. The service itself never retries.

use lifegrid_db::DbError;
use lifegrid_engine::GameStateError;
use lifegrid_types::GameStateId;

/// Errors that can occur in the service layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The upload's declared content type does not denote plain text.
    #[error("unsupported media type: {declared}")]
    UnsupportedMediaType {
        /// The content type the caller declared.
        declared: String,
    },

    /// No game state with this id exists.
    #[error("game state not found: {0}")]
    NotFound(GameStateId),

    /// The engine rejected the operation: parse failure, invalid grid
    /// state, missing snapshot, or counter overflow.
    #[error(transparent)]
    Game(#[from] GameStateError),

    /// A durable write failed. The entity's externally visible state
    /// remains at its pre-operation values.
    #[error("persistence failure during {op} of game state {id}: {source}")]
    Persistence {
        /// The operation whose write failed.
        op: &'static str,
        /// The affected entity.
        id: GameStateId,
        /// The underlying storage error.
        #[source]
        source: DbError,
    },

    /// A read-side storage operation failed.
    #[error("storage error during {op}: {source}")]
    Storage {
        /// The operation whose read failed.
        op: &'static str,
        /// The underlying storage error.
        #[source]
        source: DbError,
    },
}
