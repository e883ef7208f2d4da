//! Persistence layer for Lifegrid game states.
//!
//! One record per game state: generation, dimensions, the current grid as
//! a JSONB 2-D symbol array, the embedded initial snapshot, the derived
//! alive-cell count, and an owner reference. The owner itself (accounts,
//! authentication, cascade on account deletion) belongs to the external
//! account subsystem; this crate only stores the reference and an index
//! for per-owner listing.
//!
//! The [`GameStateRepository`] trait abstracts the store so the service
//! layer can run against PostgreSQL in production and the in-memory store
//! in tests. Writes are per-record and atomic at the statement level,
//! which is exactly the single-writer discipline the engine requires: the
//! repository `update` is the commit point of every advance/restore.
//!
//! # Modules
//!
//! - [`error`] -- Shared error types
//! - [`postgres`] -- `PostgreSQL` connection pool and migrations
//! - [`repository`] -- The record type and the repository trait
//! - [`pg_store`] -- `PostgreSQL`-backed repository over [`sqlx`]
//! - [`memory`] -- In-memory repository for tests and embedded use

pub mod error;
pub mod memory;
pub mod pg_store;
pub mod postgres;
pub mod repository;

// Re-export primary types for convenience.
pub use error::DbError;
pub use memory::MemoryStore;
pub use pg_store::PgGameStateStore;
pub use postgres::{PostgresConfig, PostgresPool};
pub use repository::{GameStateRecord, GameStateRepository};
