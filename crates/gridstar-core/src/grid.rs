//! The obstacle [`Grid`]: a fixed-size map of free and blocked cells.
//!
//! A `Grid` owns no search state. The same grid can serve any number of
//! searches; it only changes through [`Grid::mark_inaccessible`],
//! [`Grid::mark_accessible`] and [`Grid::resize`].

use crate::error::GridError;
use crate::geom::{Coord, CoordIter, Dimensions};

/// State of a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Free,
    Blocked,
}

impl CellState {
    #[inline]
    pub const fn is_free(self) -> bool {
        matches!(self, CellState::Free)
    }
}

/// A `rows × cols` grid of [`CellState`]s stored row-major.
///
/// With the `serde` feature, deserialization applies the same checks as
/// [`Grid::new`]: both dimensions positive and one cell per coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid {
    cells: Vec<CellState>,
    size: Dimensions,
}

/// Unchecked wire form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    cells: Vec<CellState>,
    size: Dimensions,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, GridError> {
        let size = Self::check_dimensions(repr.size.rows, repr.size.cols)?;
        if repr.cells.len() != size.len() {
            return Err(GridError::CellCount {
                size,
                expected: size.len(),
                found: repr.cells.len(),
            });
        }
        Ok(Self {
            cells: repr.cells,
            size,
        })
    }
}

impl Grid {
    /// Default side length used when no size is given.
    pub const DEFAULT_SIZE: i32 = 100;

    /// Create a new grid with every cell free.
    ///
    /// Fails with [`GridError::InvalidDimension`] if either dimension is not
    /// strictly positive.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        let size = Self::check_dimensions(rows, cols)?;
        Ok(Self {
            cells: vec![CellState::Free; size.len()],
            size,
        })
    }

    /// Create an `n × n` free grid.
    pub fn square(n: i32) -> Result<Self, GridError> {
        Self::new(n, n)
    }

    fn check_dimensions(rows: i32, cols: i32) -> Result<Dimensions, GridError> {
        let size = Dimensions::new(rows, cols);
        if !size.is_valid() {
            return Err(GridError::InvalidDimension { rows, cols });
        }
        Ok(size)
    }

    /// Reallocate to the given dimensions. Every cell is reset to free;
    /// no obstacle survives a resize. On error the grid is left unchanged.
    pub fn resize(&mut self, rows: i32, cols: i32) -> Result<(), GridError> {
        let size = Self::check_dimensions(rows, cols)?;
        self.cells.clear();
        self.cells.resize(size.len(), CellState::Free);
        self.size = size;
        Ok(())
    }

    /// Grid dimensions.
    #[inline]
    pub fn size(&self) -> Dimensions {
        self.size
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.size.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.size.cols
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.size.contains(c)
    }

    /// The cell at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Coord) -> Option<CellState> {
        self.size.index(c).and_then(|i| self.cells.get(i).copied())
    }

    /// True iff `c` is inside the grid and free.
    #[inline]
    pub fn is_passable(&self, c: Coord) -> bool {
        self.at(c).is_some_and(CellState::is_free)
    }

    /// Block the cell at `c`.
    pub fn mark_inaccessible(&mut self, c: Coord) -> Result<(), GridError> {
        self.set(c, CellState::Blocked)
    }

    /// Free the cell at `c`.
    pub fn mark_accessible(&mut self, c: Coord) -> Result<(), GridError> {
        self.set(c, CellState::Free)
    }

    /// Set the cell at `c`, failing with [`GridError::OutOfBounds`] outside
    /// the grid.
    pub fn set(&mut self, c: Coord, state: CellState) -> Result<(), GridError> {
        let idx = self.checked_index(c)?;
        let cell = self.cells.get_mut(idx).ok_or(GridError::OutOfBounds {
            coord: c,
            size: self.size,
        })?;
        *cell = state;
        Ok(())
    }

    /// Flat index of `c`, or an [`GridError::OutOfBounds`] error.
    pub fn checked_index(&self, c: Coord) -> Result<usize, GridError> {
        self.size.index(c).ok_or(GridError::OutOfBounds {
            coord: c,
            size: self.size,
        })
    }

    /// Reset every cell to free, keeping the dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Free);
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_free()).count()
    }

    /// Row-major iterator over `(Coord, CellState)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            inner: self.size.iter(),
        }
    }
}

impl Default for Grid {
    /// A free `100 × 100` grid.
    fn default() -> Self {
        let size = Dimensions::square(Self::DEFAULT_SIZE);
        Self {
            cells: vec![CellState::Free; size.len()],
            size,
        }
    }
}

/// Iterator over `(Coord, CellState)` pairs in a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    inner: CoordIter,
}

impl Iterator for GridIter<'_> {
    type Item = (Coord, CellState);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let c = self.inner.next()?;
        Some((c, self.grid.at(c)?))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_free() {
        let g = Grid::new(4, 3).unwrap();
        assert_eq!(g.size(), Dimensions::new(4, 3));
        assert_eq!(g.blocked_count(), 0);
        assert!(g.iter().all(|(_, s)| s == CellState::Free));
        assert_eq!(g.iter().count(), 12);
    }

    #[test]
    fn default_grid_is_100_square() {
        let g = Grid::default();
        assert_eq!(g.size(), Dimensions::square(100));
        assert!(g.is_passable(Coord::new(99, 99)));
    }

    #[test]
    fn invalid_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(GridError::InvalidDimension { rows: 0, cols: 5 })
        );
        assert!(Grid::new(3, -2).is_err());
        assert!(Grid::square(0).is_err());
    }

    #[test]
    fn mark_and_query() {
        let mut g = Grid::new(3, 3).unwrap();
        let c = Coord::new(1, 2);
        g.mark_inaccessible(c).unwrap();
        assert!(!g.is_passable(c));
        assert_eq!(g.at(c), Some(CellState::Blocked));
        assert_eq!(g.blocked_count(), 1);
        g.mark_accessible(c).unwrap();
        assert!(g.is_passable(c));
    }

    #[test]
    fn out_of_bounds_is_checked() {
        let mut g = Grid::new(3, 3).unwrap();
        let err = g.mark_inaccessible(Coord::new(3, 0)).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                coord: Coord::new(3, 0),
                size: Dimensions::new(3, 3),
            }
        );
        assert!(g.mark_inaccessible(Coord::NONE).is_err());
        assert_eq!(g.blocked_count(), 0);
    }

    #[test]
    fn passable_is_false_outside() {
        let g = Grid::new(2, 2).unwrap();
        assert!(!g.is_passable(Coord::new(-1, 0)));
        assert!(!g.is_passable(Coord::new(0, 2)));
        assert!(!g.is_passable(Coord::new(2, 0)));
        assert_eq!(g.at(Coord::new(5, 5)), None);
    }

    #[test]
    fn resize_resets_obstacles() {
        let mut g = Grid::new(3, 3).unwrap();
        g.mark_inaccessible(Coord::new(0, 0)).unwrap();
        g.resize(5, 2).unwrap();
        assert_eq!(g.size(), Dimensions::new(5, 2));
        assert_eq!(g.blocked_count(), 0);
        assert!(g.is_passable(Coord::new(4, 1)));
        assert!(!g.is_passable(Coord::new(0, 2)));
    }

    #[test]
    fn failed_resize_keeps_grid() {
        let mut g = Grid::new(3, 3).unwrap();
        g.mark_inaccessible(Coord::new(1, 1)).unwrap();
        assert!(g.resize(0, 3).is_err());
        assert_eq!(g.size(), Dimensions::new(3, 3));
        assert_eq!(g.blocked_count(), 1);
    }

    #[test]
    fn clear_keeps_size() {
        let mut g = Grid::new(2, 4).unwrap();
        g.mark_inaccessible(Coord::new(1, 3)).unwrap();
        g.clear();
        assert_eq!(g.size(), Dimensions::new(2, 4));
        assert_eq!(g.blocked_count(), 0);
    }
}
