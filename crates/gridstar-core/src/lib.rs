//! **gridstar-core** — grid and coordinate types for gridstar path planning.
//!
//! This crate provides the map model shared across the *gridstar* workspace:
//! matrix-style coordinates and directions, a fixed-size obstacle grid, and
//! a plain-text map format for rendering and loading grids.

pub mod ascii;
pub mod error;
pub mod geom;
pub mod grid;

pub use ascii::{ParsedMap, parse_map, render};
pub use error::{GridError, MapParseError, ParseCoordError};
pub use geom::{Coord, CoordIter, Dimensions, Direction};
pub use grid::{CellState, Grid, GridIter};
