//! Shared type definitions for the Lifegrid engine.
//!
//! This crate is the single source of truth for the leaf types used across
//! the Lifegrid workspace: strongly-typed entity identifiers and the cell
//! symbol alphabet of the Game of Life grid.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`cell`] -- The two-symbol cell alphabet (`*` alive, `.` dead)

pub mod cell;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use cell::{ALIVE_SYMBOL, Cell, DEAD_SYMBOL};
pub use ids::{GameStateId, OwnerId};
