//! The persisted game-state record and the repository trait.
//!
//! The record mirrors the logical storage layout: generation, dimensions,
//! the current grid as a 2-D symbol array, the embedded initial snapshot,
//! and the derived alive count. The repository trait is implemented by
//! [`PgGameStateStore`](crate::pg_store::PgGameStateStore) for production
//! and [`MemoryStore`](crate::memory::MemoryStore) for tests.

use chrono::{DateTime, Utc};
use lifegrid_engine::Snapshot;
use lifegrid_types::{Cell, GameStateId, OwnerId};
use serde::{Deserialize, Serialize};

use crate::error::DbError;

/// One persisted game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateRecord {
    /// Record identifier.
    pub id: GameStateId,
    /// The external account that owns this record.
    pub owner: OwnerId,
    /// Current generation counter.
    pub generation: u64,
    /// Row count.
    pub rows: usize,
    /// Column count.
    pub cols: usize,
    /// Current grid as a 2-D symbol array.
    pub cells: Vec<Vec<Cell>>,
    /// Immutable copy of the state at creation; deleted with the record.
    pub initial_snapshot: Snapshot,
    /// Derived count of live cells, for display only.
    pub alive_count: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Storage interface for game-state records.
///
/// Every mutation is a single record-level write; the store serializes
/// writes per record, which gives the engine its single-writer guarantee.
/// Operations on different records are independent.
pub trait GameStateRepository {
    /// Insert a freshly created record.
    fn insert(
        &self,
        record: &GameStateRecord,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Fetch a record by id. `None` if it does not exist.
    fn fetch(
        &self,
        id: GameStateId,
    ) -> impl Future<Output = Result<Option<GameStateRecord>, DbError>> + Send;

    /// Overwrite an existing record. Returns `false` if no row with the
    /// record's id exists.
    fn update(
        &self,
        record: &GameStateRecord,
    ) -> impl Future<Output = Result<bool, DbError>> + Send;

    /// Delete a record (and its embedded snapshot) by id. Returns `false`
    /// if no row existed.
    fn delete(
        &self,
        id: GameStateId,
    ) -> impl Future<Output = Result<bool, DbError>> + Send;

    /// List all records for an owner, newest first.
    fn list_for_owner(
        &self,
        owner: OwnerId,
    ) -> impl Future<Output = Result<Vec<GameStateRecord>, DbError>> + Send;
}
