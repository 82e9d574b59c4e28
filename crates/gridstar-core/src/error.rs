//! Error types for grid construction, cell access and text maps.

use thiserror::Error;

use crate::geom::{Coord, Dimensions};

/// Errors arising from grid construction or cell access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// A grid dimension was zero or negative.
    #[error("invalid grid dimensions {rows}x{cols}: both must be positive")]
    InvalidDimension { rows: i32, cols: i32 },
    /// A coordinate lies outside the grid.
    #[error("coordinate {coord} out of bounds for {size} grid")]
    OutOfBounds { coord: Coord, size: Dimensions },
    /// A stored cell buffer does not match its dimensions.
    #[error("{size} grid has {found} cells, expected {expected}")]
    CellCount {
        size: Dimensions,
        expected: usize,
        found: usize,
    },
}

/// Errors from parsing a [`Coord`] out of `"row,col"` text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCoordError {
    #[error("expected \"row,col\", got {0:?}")]
    MissingSeparator(String),
    #[error("invalid coordinate component {0:?}")]
    InvalidComponent(String),
}

/// Errors from parsing a text map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapParseError {
    /// The map has no cells.
    #[error("map is empty")]
    Empty,
    /// A line has a different width than the first one.
    #[error("map line {line} has width {found}, expected {expected}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside the map alphabet.
    #[error("invalid map character {ch:?} at {coord}")]
    InvalidChar { ch: char, coord: Coord },
    /// Origin or destination marker appears more than once.
    #[error("duplicate {marker:?} marker at {coord}")]
    DuplicateMarker { marker: char, coord: Coord },
}
