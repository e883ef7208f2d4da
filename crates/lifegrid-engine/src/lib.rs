//! Grid progression and serialization engine for Conway's Game of Life.
//!
//! This crate is the algorithmic core of the Lifegrid workspace. It converts
//! the plain-text upload format to a validated in-memory grid, computes the
//! next generation under the standard four Game of Life rules with finite
//! (non-wrapping) boundaries, and manages the entity lifecycle: creation
//! from an upload, generation advance, and restore to the initial snapshot.
//!
//! The surrounding persistence and transport layers live in their own
//! crates; nothing here performs I/O.
//!
//! # Modules
//!
//! - [`error`] -- Error types for parsing, validation, and lifecycle ops.
//! - [`format`] -- Parser and serializer for the line-oriented text format.
//! - [`grid`] -- The validated rows x cols cell matrix.
//! - [`transition`] -- Pure next-generation computation.
//! - [`game_state`] -- The [`GameState`] entity with its initial snapshot.
//!
//! [`GameState`]: game_state::GameState

pub mod error;
pub mod format;
pub mod game_state;
pub mod grid;
pub mod transition;

// Re-export primary types at crate root.
pub use error::{GameStateError, GridError, ParseError};
pub use format::ParsedUpload;
pub use game_state::{GameState, Snapshot};
pub use grid::Grid;
