//! `PostgreSQL`-backed game-state repository.
//!
//! The grid and the initial snapshot are stored as JSONB: the grid as a
//! 2-D array of one-character symbol strings, the snapshot as the full
//! `(generation, rows, cols, cells)` tuple. Deserialization re-checks the
//! symbol alphabet for free -- a corrupted stored symbol fails the read
//! instead of flowing into the engine.

use lifegrid_engine::Snapshot;
use lifegrid_types::{Cell, GameStateId, OwnerId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::{GameStateRecord, GameStateRepository};

/// Operations on the `game_states` table.
#[derive(Clone)]
pub struct PgGameStateStore {
    pool: PgPool,
}

impl PgGameStateStore {
    /// Create a store bound to a connection pool.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl GameStateRepository for PgGameStateStore {
    async fn insert(&self, record: &GameStateRecord) -> Result<(), DbError> {
        let grid = serde_json::to_value(&record.cells)?;
        let snapshot = serde_json::to_value(&record.initial_snapshot)?;

        sqlx::query(
            r"INSERT INTO game_states
              (id, owner_id, generation, grid_rows, grid_cols, grid, initial_snapshot, alive_count, created_at, updated_at)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(record.id.into_inner())
        .bind(record.owner.into_inner())
        .bind(i64::try_from(record.generation).unwrap_or(i64::MAX))
        .bind(i32::try_from(record.rows).unwrap_or(i32::MAX))
        .bind(i32::try_from(record.cols).unwrap_or(i32::MAX))
        .bind(grid)
        .bind(snapshot)
        .bind(i64::try_from(record.alive_count).unwrap_or(i64::MAX))
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %record.id, owner = %record.owner, "Inserted game state");
        Ok(())
    }

    async fn fetch(&self, id: GameStateId) -> Result<Option<GameStateRecord>, DbError> {
        let row = sqlx::query_as::<_, GameStateRow>(
            r"SELECT id, owner_id, generation, grid_rows, grid_cols, grid, initial_snapshot,
                     alive_count, created_at, updated_at
              FROM game_states
              WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        row.map(GameStateRow::into_record).transpose()
    }

    async fn update(&self, record: &GameStateRecord) -> Result<bool, DbError> {
        let grid = serde_json::to_value(&record.cells)?;

        // The snapshot column is immutable after creation; only the live
        // state and the updated_at timestamp move.
        let result = sqlx::query(
            r"UPDATE game_states
              SET generation = $2, grid_rows = $3, grid_cols = $4, grid = $5,
                  alive_count = $6, updated_at = $7
              WHERE id = $1",
        )
        .bind(record.id.into_inner())
        .bind(i64::try_from(record.generation).unwrap_or(i64::MAX))
        .bind(i32::try_from(record.rows).unwrap_or(i32::MAX))
        .bind(i32::try_from(record.cols).unwrap_or(i32::MAX))
        .bind(grid)
        .bind(i64::try_from(record.alive_count).unwrap_or(i64::MAX))
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            id = %record.id,
            generation = record.generation,
            "Updated game state"
        );
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: GameStateId) -> Result<bool, DbError> {
        let result = sqlx::query(r"DELETE FROM game_states WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await?;

        tracing::debug!(%id, "Deleted game state");
        Ok(result.rows_affected() > 0)
    }

    async fn list_for_owner(&self, owner: OwnerId) -> Result<Vec<GameStateRecord>, DbError> {
        let rows = sqlx::query_as::<_, GameStateRow>(
            r"SELECT id, owner_id, generation, grid_rows, grid_cols, grid, initial_snapshot,
                     alive_count, created_at, updated_at
              FROM game_states
              WHERE owner_id = $1
              ORDER BY created_at DESC",
        )
        .bind(owner.into_inner())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(GameStateRow::into_record).collect()
    }
}

/// A raw row from the `game_states` table.
#[derive(Debug, sqlx::FromRow)]
struct GameStateRow {
    id: Uuid,
    owner_id: Uuid,
    generation: i64,
    grid_rows: i32,
    grid_cols: i32,
    grid: serde_json::Value,
    initial_snapshot: serde_json::Value,
    alive_count: i64,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl GameStateRow {
    /// Convert the raw row into a typed record, re-validating the stored
    /// symbol arrays through serde.
    fn into_record(self) -> Result<GameStateRecord, DbError> {
        let cells: Vec<Vec<Cell>> = serde_json::from_value(self.grid)?;
        let initial_snapshot: Snapshot = serde_json::from_value(self.initial_snapshot)?;

        Ok(GameStateRecord {
            id: GameStateId::from(self.id),
            owner: OwnerId::from(self.owner_id),
            generation: u64::try_from(self.generation).unwrap_or_default(),
            rows: usize::try_from(self.grid_rows).unwrap_or_default(),
            cols: usize::try_from(self.grid_cols).unwrap_or_default(),
            cells,
            initial_snapshot,
            alive_count: u64::try_from(self.alive_count).unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
