//! A* path planning on bounded 2D obstacle grids.
//!
//! This crate provides the search engine of the *gridstar* workspace:
//!
//! - **A\*** best-first search with 8-directional unit-cost movement
//!   ([`AStar::run`])
//! - pluggable distance estimates ([`Heuristic`])
//! - the open and closed sets it is built from ([`Frontier`], [`Visited`])
//!
//! [`AStar`] owns its [`Grid`](gridstar_core::Grid) and reuses its internal
//! allocations, so repeated queries against the same map are cheap.
//!
//! # Search model
//!
//! | Piece | Role |
//! |---|---|
//! | [`Node`] | coordinate with `g`, `h`, `f = g + h` and a parent coordinate |
//! | [`Frontier`] | min-`f` extraction, ties broken by insertion order |
//! | [`Visited`] | finalized nodes by coordinate; parent chains resolve here |
//! | [`DuplicatePolicy`] | whether rediscovered coordinates are pushed again |
//!
//! The engine logs through the [`log`] facade: `debug` for each search and
//! its outcome, `trace` for every frontier operation.

mod astar;
mod config;
mod error;
mod frontier;
mod heuristic;
mod neighbors;
mod node;

pub use astar::{AStar, Outcome, SearchState, SearchStats};
pub use config::{DuplicatePolicy, SearchConfig};
pub use error::{Endpoint, SearchError};
pub use frontier::{Frontier, Visited};
pub use heuristic::{Heuristic, ParseHeuristicError};
pub use neighbors::{Neighbors, expand};
pub use node::{COST, Node};
