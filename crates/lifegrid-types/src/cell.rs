//! The two-symbol cell alphabet of the Game of Life grid.
//!
//! A cell is either alive (`*`) or dead (`.`). The serde representation is
//! the one-character symbol string, so a serialized grid is exactly the 2-D
//! symbol array stored in the database, and a corrupted stored symbol fails
//! deserialization instead of being silently treated as dead.

use serde::{Deserialize, Serialize};

/// Text symbol for a live cell.
pub const ALIVE_SYMBOL: char = '*';

/// Text symbol for a dead cell.
pub const DEAD_SYMBOL: char = '.';

/// The state of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// A live cell, written as `*`.
    #[serde(rename = "*")]
    Alive,
    /// A dead cell, written as `.`.
    #[serde(rename = ".")]
    Dead,
}

impl Cell {
    /// Map a text symbol to a cell. Returns `None` for any character
    /// outside the two-symbol alphabet.
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            ALIVE_SYMBOL => Some(Self::Alive),
            DEAD_SYMBOL => Some(Self::Dead),
            _ => None,
        }
    }

    /// Return the text symbol for this cell.
    pub const fn symbol(self) -> char {
        match self {
            Self::Alive => ALIVE_SYMBOL,
            Self::Dead => DEAD_SYMBOL,
        }
    }

    /// Whether this cell is alive.
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
