//! The validated rows x cols cell matrix.
//!
//! A [`Grid`] can only be constructed through validating constructors, so
//! any grid handed to the transition engine already satisfies the full
//! invariant: `rows > 0`, `cols > 0`, exactly `rows` rows of exactly `cols`
//! cells, every cell one of the two alphabet symbols. Unrecognized symbols
//! are rejected at the boundary ([`Grid::from_symbols`]) rather than being
//! silently treated as dead.

use lifegrid_types::Cell;

use crate::error::GridError;

/// A rectangular matrix of cells at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows. Fixed for the lifetime of the grid.
    rows: usize,
    /// Number of columns. Fixed for the lifetime of the grid.
    cols: usize,
    /// Cell matrix, exactly `rows` rows of exactly `cols` cells.
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Build a grid from raw parsed characters, enforcing the declared
    /// dimensions and the strict two-symbol alphabet.
    ///
    /// This is the gate every externally-supplied grid passes before the
    /// transition engine sees it.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyDimensions`], [`GridError::RowCountMismatch`],
    /// [`GridError::ColCountMismatch`] (first offending row), or
    /// [`GridError::InvalidCellSymbol`] (first offending position).
    pub fn from_symbols(
        rows: usize,
        cols: usize,
        lines: &[Vec<char>],
    ) -> Result<Self, GridError> {
        check_dimensions(rows, cols, lines.len(), |line| lines.get(line).map(Vec::len))?;

        let mut cells = Vec::with_capacity(rows);
        for (row, line) in lines.iter().enumerate() {
            let mut cell_row = Vec::with_capacity(cols);
            for (col, &symbol) in line.iter().enumerate() {
                let cell = Cell::from_symbol(symbol).ok_or(GridError::InvalidCellSymbol {
                    row,
                    col,
                    symbol,
                })?;
                cell_row.push(cell);
            }
            cells.push(cell_row);
        }

        Ok(Self { rows, cols, cells })
    }

    /// Build a grid from already-typed cells, enforcing the declared
    /// dimensions.
    ///
    /// Used when rehydrating from a persisted record or the initial
    /// snapshot, as a defense against storage corruption.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyDimensions`], [`GridError::RowCountMismatch`],
    /// or [`GridError::ColCountMismatch`].
    pub fn from_cells(
        rows: usize,
        cols: usize,
        cells: Vec<Vec<Cell>>,
    ) -> Result<Self, GridError> {
        check_dimensions(rows, cols, cells.len(), |row| cells.get(row).map(Vec::len))?;
        Ok(Self { rows, cols, cells })
    }

    /// Re-check the dimensional invariant on this grid.
    ///
    /// The constructors already enforce it; this exists so entity
    /// operations can re-validate defensively before stepping.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Grid::from_cells`].
    pub fn validate(&self) -> Result<(), GridError> {
        check_dimensions(self.rows, self.cols, self.cells.len(), |row| {
            self.cells.get(row).map(Vec::len)
        })
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Bounds-checked cell access.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// The cell matrix.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Consume the grid and return its cell matrix.
    pub fn into_cells(self) -> Vec<Vec<Cell>> {
        self.cells
    }

    /// Count of live cells. Derived display value, recomputed on demand;
    /// never an input to the transition rules.
    pub fn alive_count(&self) -> u64 {
        let count = self
            .cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_alive())
            .count();
        u64::try_from(count).unwrap_or(u64::MAX)
    }
}

/// Shared dimensional check used by both constructors and `validate`.
fn check_dimensions(
    rows: usize,
    cols: usize,
    actual_rows: usize,
    row_len: impl Fn(usize) -> Option<usize>,
) -> Result<(), GridError> {
    if rows == 0 || cols == 0 {
        return Err(GridError::EmptyDimensions);
    }
    if actual_rows != rows {
        return Err(GridError::RowCountMismatch {
            expected: rows,
            actual: actual_rows,
        });
    }
    for row in 0..rows {
        if let Some(actual) = row_len(row)
            && actual != cols
        {
            return Err(GridError::ColCountMismatch {
                row,
                expected: cols,
                actual,
            });
        }
    }
    Ok(())
}
