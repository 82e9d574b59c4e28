//! Geometry primitives: [`Coord`], [`Dimensions`] and [`Direction`].
//!
//! Coordinates are matrix-style: `row` grows down, `col` grows right, and
//! the origin `(0, 0)` is the top-left cell.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::ParseCoordError;

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A grid coordinate `(row, col)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Top-left cell.
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// "No coordinate" marker. Never inside any grid.
    pub const NONE: Self = Self { row: -1, col: -1 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a coordinate shifted by `(drow, dcol)`.
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The adjacent coordinate one step towards `dir`.
    #[inline]
    pub const fn step(self, dir: Direction) -> Self {
        let (drow, dcol) = dir.offset();
        self.shift(drow, dcol)
    }

    /// Whether this is the [`NONE`](Self::NONE) marker.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.row == Self::NONE.row && self.col == Self::NONE.col
    }

    /// Absolute per-axis difference `(|Δrow|, |Δcol|)`.
    #[inline]
    pub fn abs_delta(self, other: Coord) -> (i32, i32) {
        ((self.row - other.row).abs(), (self.col - other.col).abs())
    }

    /// Whether `other` is one of the eight unit steps away from `self`.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        let (dr, dc) = self.abs_delta(other);
        dr <= 1 && dc <= 1 && (dr, dc) != (0, 0)
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Parses `"row,col"`, with optional surrounding parentheses and spaces.
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim();
        let inner = inner
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(inner);
        let (row, col) = inner
            .split_once(',')
            .ok_or_else(|| ParseCoordError::MissingSeparator(s.to_string()))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| ParseCoordError::InvalidComponent(part.trim().to_string()))
        };
        Ok(Self::new(parse(row)?, parse(col)?))
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl From<Coord> for (i32, i32) {
    fn from(c: Coord) -> Self {
        (c.row, c.col)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// The eight compass directions of an 8-connected grid.
///
/// North is towards row 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    SouthEast,
    NorthWest,
    SouthWest,
}

impl Direction {
    /// All directions, in expansion order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::NorthWest,
        Direction::SouthWest,
    ];

    /// `(drow, dcol)` unit offset.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (-1, 1),
            Direction::SouthEast => (1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthWest => (1, -1),
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        let (drow, dcol) = self.offset();
        drow != 0 && dcol != 0
    }
}

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

/// Size of a grid: `rows × cols`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub rows: i32,
    pub cols: i32,
}

impl Dimensions {
    /// Create new dimensions. No validation happens here; see
    /// [`Grid::new`](crate::Grid::new).
    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Square dimensions `n × n`.
    #[inline]
    pub const fn square(n: i32) -> Self {
        Self { rows: n, cols: n }
    }

    /// Whether both dimensions are strictly positive.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.rows > 0 && self.cols > 0
    }

    /// Total number of cells (0 for invalid dimensions).
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.rows as usize) * (self.cols as usize)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        !self.is_valid()
    }

    /// Whether `c` lies in `[0, rows) × [0, cols)`.
    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Row-major flat index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some((c.row as usize) * (self.cols as usize) + (c.col as usize))
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn coord(self, idx: usize) -> Coord {
        let cols = self.cols.max(1) as usize;
        Coord::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Row-major iterator over every coordinate.
    #[inline]
    pub fn iter(self) -> CoordIter {
        CoordIter {
            dims: self,
            cur: Coord::ZERO,
        }
    }
}

impl From<(i32, i32)> for Dimensions {
    fn from((rows, cols): (i32, i32)) -> Self {
        Self::new(rows, cols)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl IntoIterator for Dimensions {
    type Item = Coord;
    type IntoIter = CoordIter;
    #[inline]
    fn into_iter(self) -> CoordIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// CoordIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the coordinates of a [`Dimensions`].
#[derive(Clone, Debug)]
pub struct CoordIter {
    dims: Dimensions,
    cur: Coord,
}

impl Iterator for CoordIter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.dims.is_empty() || self.cur.row >= self.dims.rows {
            return None;
        }
        let c = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.dims.cols {
            self.cur.col = 0;
            self.cur.row += 1;
        }
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.dims.is_empty() || self.cur.row >= self.dims.rows {
            return (0, Some(0));
        }
        let remaining_in_row = (self.dims.cols - self.cur.col) as usize;
        let remaining_rows = (self.dims.rows - self.cur.row - 1) as usize;
        let total = remaining_in_row + remaining_rows * self.dims.cols as usize;
        (total, Some(total))
    }
}

impl ExactSizeIterator for CoordIter {}
