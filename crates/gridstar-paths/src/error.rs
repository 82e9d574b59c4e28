use std::fmt;

use gridstar_core::{Coord, Dimensions, GridError};
use thiserror::Error;

/// Which search endpoint an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Origin => f.write_str("origin"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Errors from configuring or running a search.
///
/// Not finding a path is not an error; see
/// [`Outcome::Exhausted`](crate::Outcome::Exhausted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Grid(#[from] GridError),
    /// An endpoint lies outside the grid.
    #[error("{which} {coord} is outside the {size} grid")]
    OutOfBounds {
        which: Endpoint,
        coord: Coord,
        size: Dimensions,
    },
    #[error("origin {0} is blocked")]
    OriginBlocked(Coord),
    #[error("destination {0} is blocked")]
    DestinationBlocked(Coord),
}
