//! Pure next-generation computation under the standard Game of Life rules.
//!
//! Boundaries are finite: positions outside `[0, rows) x [0, cols)` simply
//! do not exist, so a corner cell considers at most 3 neighbors and an edge
//! cell at most 5. There is no wraparound and no infinite extension.
//!
//! [`step`] reads exclusively the pre-step grid while building a fully new
//! grid, so no cell's neighbor count is perturbed by writes from the same
//! step.

use lifegrid_types::Cell;

use crate::error::GridError;
use crate::grid::Grid;

/// Relative offsets of the eight neighboring positions.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Compute the next grid from the current grid.
///
/// The output grid has identical dimensions and is fully recomputed. The
/// input is validated first: a grid that fails the dimensional invariant
/// is rejected rather than stepped.
///
/// # Errors
///
/// Returns the underlying [`GridError`] if validation fails.
pub fn step(grid: &Grid) -> Result<Grid, GridError> {
    grid.validate()?;

    let mut next = Vec::with_capacity(grid.rows());
    for row in 0..grid.rows() {
        let mut next_row = Vec::with_capacity(grid.cols());
        for col in 0..grid.cols() {
            let alive = grid.get(row, col).is_some_and(Cell::is_alive);
            let neighbors = live_neighbors(grid, row, col);
            next_row.push(next_cell(alive, neighbors));
        }
        next.push(next_row);
    }

    Grid::from_cells(grid.rows(), grid.cols(), next)
}

/// Count live neighbors of `(row, col)`, considering only positions inside
/// the grid bounds.
fn live_neighbors(grid: &Grid, row: usize, col: usize) -> usize {
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|&&(row_offset, col_offset)| {
            let Some(neighbor_row) = offset_index(row, row_offset, grid.rows()) else {
                return false;
            };
            let Some(neighbor_col) = offset_index(col, col_offset, grid.cols()) else {
                return false;
            };
            grid.get(neighbor_row, neighbor_col)
                .is_some_and(Cell::is_alive)
        })
        .count()
}

/// Apply a signed offset to an index, returning `None` if the result falls
/// outside `[0, limit)`.
fn offset_index(base: usize, offset: i64, limit: usize) -> Option<usize> {
    let base = i64::try_from(base).ok()?;
    let limit = i64::try_from(limit).ok()?;
    let position = base.checked_add(offset)?;
    if (0..limit).contains(&position) {
        usize::try_from(position).ok()
    } else {
        None
    }
}

/// Next-cell policy: survival on 2 or 3 neighbors, birth on exactly 3,
/// death otherwise.
const fn next_cell(alive: bool, neighbors: usize) -> Cell {
    if (alive && matches!(neighbors, 2 | 3)) || (!alive && neighbors == 3) {
        Cell::Alive
    } else {
        Cell::Dead
    }
}
