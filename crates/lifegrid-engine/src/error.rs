//! Error types for the `lifegrid-engine` crate.
//!
//! Parse failures, grid validation failures, and entity lifecycle failures
//! each have their own enum. [`GameStateError`] is the umbrella returned by
//! entity operations and absorbs the other two via `#[from]`.

/// Errors produced while parsing the plain-text upload format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The upload contained no non-empty lines.
    #[error("file is empty or contains no usable lines")]
    EmptyInput,

    /// The first non-empty line did not match `Generation <digits>:`.
    #[error("missing or malformed generation line")]
    MalformedGeneration,

    /// The second non-empty line did not match `<digits> <digits>`.
    #[error("missing or malformed dimensions line")]
    MalformedDimensions,

    /// The grid body did not match the declared dimensions.
    #[error("grid dimensions do not match the declared {rows} rows and {cols} columns")]
    DimensionMismatch {
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
    },
}

/// Errors produced while validating or constructing a grid.
///
/// The grid is externally derived (parsed text or a stored snapshot), so
/// every construction path re-checks the full invariant: exactly `rows`
/// rows of exactly `cols` cells, every cell in the two-symbol alphabet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A grid must have at least one row and one column.
    #[error("grid must have at least one row and one column")]
    EmptyDimensions,

    /// The grid does not have exactly the declared number of rows.
    #[error("expected {expected} rows, found {actual}")]
    RowCountMismatch {
        /// Declared row count.
        expected: usize,
        /// Rows actually supplied.
        actual: usize,
    },

    /// A row does not have exactly the declared number of cells.
    /// Names the first offending row.
    #[error("row {row} has {actual} cells, expected {expected}")]
    ColCountMismatch {
        /// Index of the first offending row.
        row: usize,
        /// Declared column count.
        expected: usize,
        /// Cells actually supplied in that row.
        actual: usize,
    },

    /// A cell used a symbol outside the `*`/`.` alphabet.
    /// Names the first offending position.
    #[error("invalid cell symbol {symbol:?} at row {row}, column {col}")]
    InvalidCellSymbol {
        /// Row index of the first offending cell.
        row: usize,
        /// Column index of the first offending cell.
        col: usize,
        /// The unrecognized symbol.
        symbol: char,
    },
}

/// Errors returned by [`GameState`](crate::game_state::GameState) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameStateError {
    /// The upload could not be parsed; no entity is created.
    #[error("invalid upload: {0}")]
    Parse(#[from] ParseError),

    /// The grid failed validation, either at creation or defensively
    /// before an advance.
    #[error("invalid grid state: {0}")]
    InvalidGridState(#[from] GridError),

    /// No initial snapshot exists to restore from. Creation always takes
    /// one, so this is only reachable through corrupted persisted state.
    #[error("no initial snapshot available to restore")]
    NoSnapshotAvailable,

    /// The generation counter would overflow `u64::MAX`.
    #[error("generation counter overflow")]
    GenerationOverflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_symbol_names_position() {
        let err = GridError::InvalidCellSymbol {
            row: 2,
            col: 5,
            symbol: 'X',
        };
        let msg = err.to_string();
        assert!(msg.contains("row 2"));
        assert!(msg.contains("column 5"));
        assert!(msg.contains('X'));
    }

    #[test]
    fn grid_error_converts_to_game_state_error() {
        let err = GameStateError::from(GridError::EmptyDimensions);
        assert!(err.to_string().contains("invalid grid state"));
    }
}
