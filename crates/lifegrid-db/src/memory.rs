//! In-memory game-state repository.
//!
//! Backs the service-layer tests and any embedded use where PostgreSQL is
//! not available. Behavior matches [`PgGameStateStore`] observably:
//! record-level writes, newest-first owner listing, `false` from
//! update/delete when the record is gone.
//!
//! [`PgGameStateStore`]: crate::pg_store::PgGameStateStore

use std::collections::BTreeMap;
use std::sync::Arc;

use lifegrid_types::{GameStateId, OwnerId};
use tokio::sync::RwLock;

use crate::error::DbError;
use crate::repository::{GameStateRecord, GameStateRepository};

/// Thread-safe in-memory record store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<BTreeMap<GameStateId, GameStateRecord>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl GameStateRepository for MemoryStore {
    async fn insert(&self, record: &GameStateRecord) -> Result<(), DbError> {
        self.records
            .write()
            .await
            .insert(record.id, record.clone());
        Ok(())
    }

    async fn fetch(&self, id: GameStateId) -> Result<Option<GameStateRecord>, DbError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn update(&self, record: &GameStateRecord) -> Result<bool, DbError> {
        let mut records = self.records.write().await;
        if !records.contains_key(&record.id) {
            return Ok(false);
        }
        records.insert(record.id, record.clone());
        Ok(true)
    }

    async fn delete(&self, id: GameStateId) -> Result<bool, DbError> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn list_for_owner(&self, owner: OwnerId) -> Result<Vec<GameStateRecord>, DbError> {
        let mut records: Vec<GameStateRecord> = self
            .records
            .read()
            .await
            .values()
            .filter(|record| record.owner == owner)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
