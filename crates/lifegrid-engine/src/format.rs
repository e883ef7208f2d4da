//! Parser and serializer for the line-oriented upload format.
//!
//! ```text
//! Generation 3:
//! 4 8
//! ........
//! ....*...
//! ...**...
//! ........
//! ```
//!
//! Line one carries the generation counter, line two the grid dimensions,
//! and the remaining lines the grid body, one character per cell. Blank
//! lines are discarded and every line is trimmed before tokenizing, so
//! trailing whitespace and carriage returns are tolerated.
//!
//! Parsing is deliberately two-staged: [`parse`] checks only the header
//! lines and the declared dimensions, while the strict cell-alphabet check
//! happens when the raw characters are promoted to a
//! [`Grid`](crate::grid::Grid) via
//! [`Grid::from_symbols`](crate::grid::Grid::from_symbols). No grid reaches
//! the transition engine without passing both stages.

use crate::error::ParseError;
use crate::grid::Grid;

/// The raw result of parsing an upload: header values plus the grid body
/// as unvalidated characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUpload {
    /// Generation counter declared in the header.
    pub generation: u64,
    /// Declared row count.
    pub rows: usize,
    /// Declared column count.
    pub cols: usize,
    /// Grid body, one inner vector per row. Dimension-checked against the
    /// header, but the cell alphabet is not yet enforced.
    pub lines: Vec<Vec<char>>,
}

/// Parse the plain-text upload format.
///
/// # Errors
///
/// Returns [`ParseError::EmptyInput`] if there are no non-empty lines,
/// [`ParseError::MalformedGeneration`] or [`ParseError::MalformedDimensions`]
/// if the header lines do not match, and [`ParseError::DimensionMismatch`]
/// if the body does not supply exactly `rows` lines of `cols` characters.
pub fn parse(text: &str) -> Result<ParsedUpload, ParseError> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let header = lines.next().ok_or(ParseError::EmptyInput)?;
    let generation = parse_generation_line(header)?;

    let dimensions = lines.next().ok_or(ParseError::MalformedDimensions)?;
    let (rows, cols) = parse_dimensions_line(dimensions)?;

    let body: Vec<Vec<char>> = lines.map(|line| line.chars().collect()).collect();
    if body.len() != rows || body.iter().any(|line| line.len() != cols) {
        return Err(ParseError::DimensionMismatch { rows, cols });
    }

    Ok(ParsedUpload {
        generation,
        rows,
        cols,
        lines: body,
    })
}

/// Render a generation counter and grid back into the upload format.
///
/// Exact inverse of [`parse`] for any valid grid: one header line, one
/// dimensions line, then one line per row, newline-joined with no trailing
/// blank line.
pub fn serialize(generation: u64, grid: &Grid) -> String {
    let mut lines = Vec::with_capacity(grid.rows().saturating_add(2));
    lines.push(format!("Generation {generation}:"));
    lines.push(format!("{} {}", grid.rows(), grid.cols()));
    for row in grid.cells() {
        lines.push(row.iter().map(|cell| cell.symbol()).collect());
    }
    lines.join("\n")
}

/// Match `Generation <digits>:` with at least one whitespace character
/// after the keyword and the digits immediately before the colon.
fn parse_generation_line(line: &str) -> Result<u64, ParseError> {
    let rest = line
        .strip_prefix("Generation")
        .ok_or(ParseError::MalformedGeneration)?;
    if !rest.starts_with(char::is_whitespace) {
        return Err(ParseError::MalformedGeneration);
    }
    let digits = rest
        .trim_start()
        .strip_suffix(':')
        .ok_or(ParseError::MalformedGeneration)?;
    parse_digits(digits).ok_or(ParseError::MalformedGeneration)
}

/// Match `<digits> <digits>` with any run of whitespace between.
fn parse_dimensions_line(line: &str) -> Result<(usize, usize), ParseError> {
    let mut parts = line.split_whitespace();
    let (Some(first), Some(second), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseError::MalformedDimensions);
    };
    let rows = parse_digits(first).ok_or(ParseError::MalformedDimensions)?;
    let cols = parse_digits(second).ok_or(ParseError::MalformedDimensions)?;
    Ok((rows, cols))
}

/// Parse a non-empty all-ASCII-digit token. Rejects signs, whitespace, and
/// anything `str::parse` would otherwise tolerate.
fn parse_digits<T: core::str::FromStr>(token: &str) -> Option<T> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
