//! The game-state service: one method per exposed operation.
//!
//! Every mutation follows the same shape: fetch the record, rehydrate the
//! entity (which re-validates the stored grid), run the engine operation,
//! then commit the updated record through the repository. The repository
//! write is the single commit point -- if it fails, neither the store nor
//! the returned value reflects the attempted change.

use chrono::Utc;
use lifegrid_db::{DbError, GameStateRecord, GameStateRepository};
use lifegrid_engine::GameState;
use lifegrid_types::{GameStateId, OwnerId};

use crate::error::ServiceError;

/// The only media type accepted for uploads.
const PLAIN_TEXT: &str = "text/plain";

/// Orchestrates game-state operations over a repository.
#[derive(Debug, Clone)]
pub struct GameStateService<R> {
    repository: R,
}

impl<R: GameStateRepository> GameStateService<R> {
    /// Create a service over a repository.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Create a game state from an uploaded file.
    ///
    /// The declared content type must denote plain text (parameters such
    /// as `; charset=utf-8` are ignored). The bytes are decoded as UTF-8
    /// with replacement, then parsed, validated, and persisted. On any
    /// failure no entity exists.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::UnsupportedMediaType`], a parse/validation
    /// error via [`ServiceError::Game`], or [`ServiceError::Persistence`]
    /// if the insert fails.
    pub async fn create_from_upload(
        &self,
        owner: OwnerId,
        raw_bytes: &[u8],
        declared_content_type: &str,
    ) -> Result<GameStateRecord, ServiceError> {
        if !is_plain_text(declared_content_type) {
            return Err(ServiceError::UnsupportedMediaType {
                declared: declared_content_type.to_owned(),
            });
        }

        let text = String::from_utf8_lossy(raw_bytes);
        let entity = GameState::create(&text)?;
        let snapshot = entity
            .initial_snapshot()
            .cloned()
            .ok_or(ServiceError::Game(
                lifegrid_engine::GameStateError::NoSnapshotAvailable,
            ))?;

        let id = GameStateId::new();
        let now = Utc::now();
        let record = GameStateRecord {
            id,
            owner,
            generation: entity.generation(),
            rows: entity.rows(),
            cols: entity.cols(),
            cells: entity.grid().cells().to_vec(),
            initial_snapshot: snapshot,
            alive_count: entity.alive_count(),
            created_at: now,
            updated_at: now,
        };

        self.repository
            .insert(&record)
            .await
            .map_err(|source| persistence("create", id, source))?;

        tracing::info!(
            %id,
            %owner,
            generation = record.generation,
            rows = record.rows,
            cols = record.cols,
            alive = record.alive_count,
            "Created game state"
        );
        Ok(record)
    }

    /// Advance a game state by one generation.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the id does not resolve,
    /// [`ServiceError::Game`] if the stored grid fails validation, or
    /// [`ServiceError::Persistence`] if the write fails (in which case the
    /// stored state is unchanged).
    pub async fn advance(&self, id: GameStateId) -> Result<GameStateRecord, ServiceError> {
        let record = self.fetch_record(id).await?;
        let mut entity = rehydrate(&record)?;
        entity.advance()?;
        self.commit("advance", record, &entity).await
    }

    /// Restore a game state to its initial snapshot. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`], [`ServiceError::Game`] (including
    /// the defensive no-snapshot case), or [`ServiceError::Persistence`].
    pub async fn restore(&self, id: GameStateId) -> Result<GameStateRecord, ServiceError> {
        let record = self.fetch_record(id).await?;
        let mut entity = rehydrate(&record)?;
        entity.restore()?;
        self.commit("restore", record, &entity).await
    }

    /// Delete a game state and its embedded snapshot together.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the id does not resolve, or
    /// [`ServiceError::Persistence`] if the delete fails.
    pub async fn delete(&self, id: GameStateId) -> Result<(), ServiceError> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(|source| persistence("delete", id, source))?;
        if !removed {
            return Err(ServiceError::NotFound(id));
        }
        tracing::info!(%id, "Deleted game state");
        Ok(())
    }

    /// Read a single game state. No core logic.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] or [`ServiceError::Storage`].
    pub async fn get(&self, id: GameStateId) -> Result<GameStateRecord, ServiceError> {
        self.fetch_record(id).await
    }

    /// List an owner's game states, newest first. No core logic.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the read fails.
    pub async fn list(&self, owner: OwnerId) -> Result<Vec<GameStateRecord>, ServiceError> {
        self.repository
            .list_for_owner(owner)
            .await
            .map_err(|source| ServiceError::Storage { op: "list", source })
    }

    /// Fetch a record or report `NotFound`.
    async fn fetch_record(&self, id: GameStateId) -> Result<GameStateRecord, ServiceError> {
        self.repository
            .fetch(id)
            .await
            .map_err(|source| ServiceError::Storage { op: "fetch", source })?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Write the entity's state back over the record. The record handed to
    /// the caller is built only after the write succeeded.
    async fn commit(
        &self,
        op: &'static str,
        record: GameStateRecord,
        entity: &GameState,
    ) -> Result<GameStateRecord, ServiceError> {
        let mut updated = record;
        updated.generation = entity.generation();
        updated.rows = entity.rows();
        updated.cols = entity.cols();
        updated.cells = entity.grid().cells().to_vec();
        updated.alive_count = entity.alive_count();
        updated.updated_at = Utc::now();

        let found = self
            .repository
            .update(&updated)
            .await
            .map_err(|source| persistence(op, updated.id, source))?;
        if !found {
            return Err(ServiceError::NotFound(updated.id));
        }

        tracing::info!(
            id = %updated.id,
            generation = updated.generation,
            alive = updated.alive_count,
            "Game state {op} committed"
        );
        Ok(updated)
    }
}

/// Rebuild the engine entity from a stored record, re-validating the grid.
fn rehydrate(record: &GameStateRecord) -> Result<GameState, ServiceError> {
    let entity = GameState::from_parts(
        record.generation,
        record.rows,
        record.cols,
        record.cells.clone(),
        Some(record.initial_snapshot.clone()),
    )?;
    Ok(entity)
}

/// True if the declared content type denotes plain text, ignoring
/// parameters and ASCII case.
fn is_plain_text(declared: &str) -> bool {
    declared
        .split(';')
        .next()
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(PLAIN_TEXT))
}

/// Build the write-side persistence error.
const fn persistence(op: &'static str, id: GameStateId, source: DbError) -> ServiceError {
    ServiceError::Persistence { op, id, source }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use lifegrid_db::MemoryStore;
    use lifegrid_engine::{GameStateError, GridError};

    use super::*;

    const GLIDER: &str = "Generation 0:\n4 4\n.*..\n..*.\n***.\n....";
    const BLINKER: &str = "Generation 5:\n3 3\n.*.\n.*.\n.*.";

    fn service() -> GameStateService<MemoryStore> {
        GameStateService::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn create_from_upload_persists_record() {
        let service = service();
        let owner = OwnerId::new();
        let record = service
            .create_from_upload(owner, BLINKER.as_bytes(), "text/plain")
            .await
            .expect("create");

        assert_eq!(record.owner, owner);
        assert_eq!(record.generation, 5);
        assert_eq!((record.rows, record.cols), (3, 3));
        assert_eq!(record.alive_count, 3);
        assert_eq!(record.initial_snapshot.generation, 5);

        let fetched = service.get(record.id).await.expect("get");
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn create_accepts_content_type_parameters() {
        let service = service();
        let result = service
            .create_from_upload(
                OwnerId::new(),
                BLINKER.as_bytes(),
                "Text/Plain; charset=utf-8",
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn create_rejects_wrong_content_type() {
        let service = service();
        let result = service
            .create_from_upload(OwnerId::new(), BLINKER.as_bytes(), "application/json")
            .await;
        assert!(matches!(
            result,
            Err(ServiceError::UnsupportedMediaType { declared }) if declared == "application/json"
        ));
    }

    #[tokio::test]
    async fn create_rejects_bad_upload_without_entity() {
        let service = service();
        let owner = OwnerId::new();
        let result = service
            .create_from_upload(owner, b"Generation 1:\n2 2\n.X\n..", "text/plain")
            .await;
        assert!(matches!(
            result,
            Err(ServiceError::Game(GameStateError::InvalidGridState(
                GridError::InvalidCellSymbol { row: 0, col: 1, symbol: 'X' }
            )))
        ));
        // No partial entity persists.
        assert!(service.list(owner).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn advance_increments_generation_by_one() {
        let service = service();
        let record = service
            .create_from_upload(OwnerId::new(), BLINKER.as_bytes(), "text/plain")
            .await
            .expect("create");

        let advanced = service.advance(record.id).await.expect("advance");
        assert_eq!(advanced.generation, 6);
        assert_eq!((advanced.rows, advanced.cols), (3, 3));
        // The stored record reflects the commit.
        let fetched = service.get(record.id).await.expect("get");
        assert_eq!(fetched.generation, 6);
        assert_eq!(fetched.initial_snapshot, record.initial_snapshot);
    }

    #[tokio::test]
    async fn restore_resets_and_is_idempotent() {
        let service = service();
        let record = service
            .create_from_upload(OwnerId::new(), GLIDER.as_bytes(), "text/plain")
            .await
            .expect("create");

        for _ in 0..4 {
            service.advance(record.id).await.expect("advance");
        }

        let restored = service.restore(record.id).await.expect("restore");
        assert_eq!(restored.generation, 0);
        assert_eq!(restored.cells, record.cells);
        assert_eq!(restored.alive_count, record.alive_count);

        let again = service.restore(record.id).await.expect("second restore");
        assert_eq!(again.generation, restored.generation);
        assert_eq!(again.cells, restored.cells);
    }

    #[tokio::test]
    async fn operations_on_unknown_id_report_not_found() {
        let service = service();
        let id = GameStateId::new();
        assert!(matches!(service.get(id).await, Err(ServiceError::NotFound(found)) if found == id));
        assert!(matches!(service.advance(id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(service.restore(id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(service.delete(id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_entity_and_snapshot() {
        let service = service();
        let owner = OwnerId::new();
        let record = service
            .create_from_upload(owner, BLINKER.as_bytes(), "text/plain")
            .await
            .expect("create");

        service.delete(record.id).await.expect("delete");
        assert!(matches!(
            service.get(record.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(service.list(owner).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner() {
        let service = service();
        let owner = OwnerId::new();
        let other = OwnerId::new();

        service
            .create_from_upload(owner, BLINKER.as_bytes(), "text/plain")
            .await
            .expect("create");
        service
            .create_from_upload(other, GLIDER.as_bytes(), "text/plain")
            .await
            .expect("create");

        let listed = service.list(owner).await.expect("list");
        assert_eq!(listed.len(), 1);
        assert!(listed.iter().all(|r| r.owner == owner));
    }

    // -----------------------------------------------------------------
    // Persistence-failure atomicity
    // -----------------------------------------------------------------

    /// Repository whose writes always fail; reads delegate to the inner
    /// memory store.
    #[derive(Clone)]
    struct FailingWrites {
        inner: MemoryStore,
    }

    impl GameStateRepository for FailingWrites {
        async fn insert(&self, _record: &GameStateRecord) -> Result<(), DbError> {
            Err(DbError::Config("write refused".to_owned()))
        }

        async fn fetch(&self, id: GameStateId) -> Result<Option<GameStateRecord>, DbError> {
            self.inner.fetch(id).await
        }

        async fn update(&self, _record: &GameStateRecord) -> Result<bool, DbError> {
            Err(DbError::Config("write refused".to_owned()))
        }

        async fn delete(&self, _id: GameStateId) -> Result<bool, DbError> {
            Err(DbError::Config("write refused".to_owned()))
        }

        async fn list_for_owner(&self, owner: OwnerId) -> Result<Vec<GameStateRecord>, DbError> {
            self.inner.list_for_owner(owner).await
        }
    }

    #[tokio::test]
    async fn failed_advance_leaves_stored_state_untouched() {
        let store = MemoryStore::new();
        let record = GameStateService::new(store.clone())
            .create_from_upload(OwnerId::new(), BLINKER.as_bytes(), "text/plain")
            .await
            .expect("create");

        let failing = GameStateService::new(FailingWrites { inner: store.clone() });
        let result = failing.advance(record.id).await;
        assert!(matches!(
            result,
            Err(ServiceError::Persistence { op: "advance", id, .. }) if id == record.id
        ));

        // Last-known-good state is still visible.
        let fetched = GameStateService::new(store)
            .get(record.id)
            .await
            .expect("get");
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn failed_create_persists_nothing() {
        let store = MemoryStore::new();
        let failing = GameStateService::new(FailingWrites { inner: store.clone() });
        let result = failing
            .create_from_upload(OwnerId::new(), BLINKER.as_bytes(), "text/plain")
            .await;
        assert!(matches!(
            result,
            Err(ServiceError::Persistence { op: "create", .. })
        ));
        assert!(store.is_empty().await);
    }
}
