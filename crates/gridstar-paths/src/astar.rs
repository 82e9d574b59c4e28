//! The A* search engine.

use gridstar_core::{Coord, Dimensions, Grid, GridError, ascii};
use log::{debug, trace};

use crate::config::{DuplicatePolicy, SearchConfig};
use crate::error::{Endpoint, SearchError};
use crate::frontier::{Frontier, Visited};
use crate::heuristic::Heuristic;
use crate::neighbors::Neighbors;
use crate::node::{COST, Node};

/// Lifecycle of the engine's most recent search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// No search has completed since construction or the last failed
    /// validation.
    #[default]
    Idle,
    /// Set while [`AStar::run`] executes. `run` holds `&mut self`, so no
    /// caller can observe it; a finished run is always `Succeeded`,
    /// `Exhausted` or, on an endpoint error, `Idle`.
    Running,
    Succeeded,
    Exhausted,
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The destination was reached; the path runs from origin to destination
    /// inclusive.
    Succeeded(Vec<Coord>),
    /// The frontier ran dry without reaching the destination.
    Exhausted,
}

impl Outcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Coord]> {
        match self {
            Outcome::Succeeded(path) => Some(path),
            Outcome::Exhausted => None,
        }
    }
}

/// Counters for the most recent search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes finalized into the closed set.
    pub expanded: usize,
    /// Nodes pushed onto the frontier, the origin included.
    pub pushed: usize,
    /// Frontier entries popped for an already finalized coordinate.
    pub stale: usize,
    /// Neighbors dropped because their coordinate was already finalized.
    pub pruned: usize,
    /// Neighbors not pushed because the frontier already held a cheaper
    /// entry ([`DuplicatePolicy::DecreaseKey`] only).
    pub skipped: usize,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
}

/// Best `g` pushed per coordinate in the current search.
struct OpenCosts {
    size: Dimensions,
    slots: Vec<(u32, f32)>,
    generation: u32,
}

impl OpenCosts {
    fn new(size: Dimensions) -> Self {
        Self {
            size,
            slots: vec![(0, f32::INFINITY); size.len()],
            generation: 0,
        }
    }

    fn reset(&mut self, size: Dimensions) {
        if size == self.size {
            self.generation = self.generation.wrapping_add(1);
            if self.generation == 0 {
                self.slots.fill((0, f32::INFINITY));
            }
            return;
        }
        *self = Self::new(size);
    }

    /// Record `g` for `c` if it beats what was recorded; report whether it
    /// did.
    fn improve(&mut self, c: Coord, g: f32) -> bool {
        let generation = self.generation;
        let Some(slot) = self.size.index(c).and_then(|i| self.slots.get_mut(i)) else {
            return false;
        };
        if slot.0 != generation || g < slot.1 {
            *slot = (generation, g);
            return true;
        }
        false
    }
}

/// A* planner over an owned obstacle [`Grid`].
///
/// The engine keeps its grid, endpoints and settings between searches, and
/// reuses its open/closed set allocations; every [`run`](Self::run) starts
/// from an empty frontier and closed set.
///
/// ```
/// use gridstar_core::Coord;
/// use gridstar_paths::{AStar, Outcome};
///
/// let mut astar = AStar::with_size(10, 10, Coord::new(0, 0), Coord::new(6, 6)).unwrap();
/// astar.mark_inaccessible(Coord::new(1, 1)).unwrap();
/// let outcome = astar.run().unwrap();
/// assert!(outcome.is_found());
/// assert_eq!(astar.path().first(), Some(&Coord::new(0, 0)));
/// assert_eq!(astar.path().last(), Some(&Coord::new(6, 6)));
/// ```
pub struct AStar {
    grid: Grid,
    origin: Coord,
    destination: Coord,
    heuristic: Heuristic,
    duplicates: DuplicatePolicy,
    validate_endpoints: bool,
    // per-search state
    frontier: Frontier,
    visited: Visited,
    open_costs: OpenCosts,
    neighbors: Neighbors,
    path: Vec<Coord>,
    state: SearchState,
    stats: SearchStats,
}

impl AStar {
    /// An engine on a free 100×100 grid with default settings.
    pub fn new(origin: Coord, destination: Coord) -> Self {
        Self::with_grid(Grid::default(), origin, destination)
    }

    /// An engine on a free `rows × cols` grid.
    pub fn with_size(
        rows: i32,
        cols: i32,
        origin: Coord,
        destination: Coord,
    ) -> Result<Self, SearchError> {
        Ok(Self::with_grid(Grid::new(rows, cols)?, origin, destination))
    }

    /// An engine on an existing grid, obstacles included.
    pub fn with_grid(grid: Grid, origin: Coord, destination: Coord) -> Self {
        let size = grid.size();
        let cfg = SearchConfig::default();
        Self {
            grid,
            origin,
            destination,
            heuristic: cfg.heuristic,
            duplicates: cfg.duplicates,
            validate_endpoints: cfg.validate_endpoints,
            frontier: Frontier::new(),
            visited: Visited::new(size),
            open_costs: OpenCosts::new(size),
            neighbors: Neighbors::new(),
            path: Vec::new(),
            state: SearchState::Idle,
            stats: SearchStats::default(),
        }
    }

    /// An engine on a free grid sized and tuned by `config`.
    pub fn from_config(
        config: &SearchConfig,
        origin: Coord,
        destination: Coord,
    ) -> Result<Self, SearchError> {
        let mut astar = Self::with_size(config.rows, config.cols, origin, destination)?;
        astar.apply_config(config);
        Ok(astar)
    }

    /// Take over the heuristic, duplicate policy and validation flag of
    /// `config`. The grid is left alone.
    pub fn apply_config(&mut self, config: &SearchConfig) {
        self.heuristic = config.heuristic;
        self.duplicates = config.duplicates;
        self.validate_endpoints = config.validate_endpoints;
    }

    /// The current settings, grid size included.
    pub fn config(&self) -> SearchConfig {
        let size = self.grid.size();
        SearchConfig {
            rows: size.rows,
            cols: size.cols,
            heuristic: self.heuristic,
            duplicates: self.duplicates,
            validate_endpoints: self.validate_endpoints,
        }
    }

    // -----------------------------------------------------------------------
    // Setters
    // -----------------------------------------------------------------------

    pub fn set_origin(&mut self, origin: Coord) {
        self.origin = origin;
    }

    pub fn set_destination(&mut self, destination: Coord) {
        self.destination = destination;
    }

    /// Reallocate the grid. All obstacles are cleared.
    pub fn set_map_size(&mut self, rows: i32, cols: i32) -> Result<(), SearchError> {
        self.grid.resize(rows, cols)?;
        Ok(())
    }

    /// Reallocate the grid to `n × n`. All obstacles are cleared.
    pub fn set_square_map_size(&mut self, n: i32) -> Result<(), SearchError> {
        self.set_map_size(n, n)
    }

    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.heuristic = heuristic;
    }

    pub fn set_duplicate_policy(&mut self, policy: DuplicatePolicy) {
        self.duplicates = policy;
    }

    pub fn set_validate_endpoints(&mut self, validate: bool) {
        self.validate_endpoints = validate;
    }

    /// Block a grid cell.
    pub fn mark_inaccessible(&mut self, c: Coord) -> Result<(), GridError> {
        self.grid.mark_inaccessible(c)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[inline]
    pub fn origin(&self) -> Coord {
        self.origin
    }

    #[inline]
    pub fn destination(&self) -> Coord {
        self.destination
    }

    #[inline]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    #[inline]
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }

    #[inline]
    pub fn map_size(&self) -> Dimensions {
        self.grid.size()
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Counters from the most recent search.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Path found by the most recent search, origin first. Empty if no
    /// search has succeeded or the last one did not.
    #[inline]
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// Render the map as text, marking the last path when `show_path` is set.
    pub fn render(&self, show_path: bool) -> String {
        let path = show_path.then_some(self.path.as_slice());
        ascii::render(&self.grid, self.origin, self.destination, path)
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    fn check_endpoints(&self) -> Result<(), SearchError> {
        let size = self.grid.size();
        for (which, coord) in [
            (Endpoint::Origin, self.origin),
            (Endpoint::Destination, self.destination),
        ] {
            if !self.grid.contains(coord) {
                return Err(SearchError::OutOfBounds { which, coord, size });
            }
        }
        if self.validate_endpoints {
            if !self.grid.is_passable(self.origin) {
                return Err(SearchError::OriginBlocked(self.origin));
            }
            if !self.grid.is_passable(self.destination) {
                return Err(SearchError::DestinationBlocked(self.destination));
            }
        }
        Ok(())
    }

    /// Search from origin to destination.
    ///
    /// Returns `Ok(Outcome::Exhausted)` when the destination cannot be
    /// reached; errors are reserved for invalid endpoints. Runs to
    /// completion; the cost is bounded by the number of free cells.
    pub fn run(&mut self) -> Result<Outcome, SearchError> {
        self.path.clear();
        self.stats = SearchStats::default();
        self.state = SearchState::Idle;
        self.check_endpoints()?;

        self.state = SearchState::Running;
        let size = self.grid.size();
        self.frontier.clear();
        self.visited.reset(size);
        self.open_costs.reset(size);

        debug!(
            "A* {} -> {} on {} grid ({}, {:?})",
            self.origin, self.destination, size, self.heuristic, self.duplicates
        );

        self.frontier.push(Node::root(self.origin));
        self.open_costs.improve(self.origin, 0.0);
        self.stats.pushed = 1;
        self.stats.peak_frontier = 1;

        let mut neighbors = std::mem::take(&mut self.neighbors);

        let goal = 'search: loop {
            let Some(current) = self.frontier.pop() else {
                break 'search None;
            };

            // Dominated duplicate of a finalized coordinate.
            if !self.visited.insert(current) {
                self.stats.stale += 1;
                continue;
            }
            self.stats.expanded += 1;
            trace!(
                "finalize {} g={} h={} f={} parent={:?}",
                current.coord,
                current.g(),
                current.h(),
                current.f(),
                current.parent
            );

            if current.coord == self.destination {
                break 'search Some(current);
            }

            for child in neighbors.expand(&current, &self.grid) {
                if self.visited.contains(child.coord) {
                    self.stats.pruned += 1;
                    continue;
                }
                let mut child = *child;
                child.set_scores(
                    current.g() + COST,
                    self.heuristic.estimate(child.coord, self.destination),
                );

                if self.duplicates == DuplicatePolicy::DecreaseKey
                    && !self.open_costs.improve(child.coord, child.g())
                {
                    self.stats.skipped += 1;
                    continue;
                }

                trace!("push {} f={}", child.coord, child.f());
                self.frontier.push(child);
                self.stats.pushed += 1;
            }
            self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
        };

        self.neighbors = neighbors;

        let Some(goal) = goal else {
            self.state = SearchState::Exhausted;
            debug!("A* exhausted: {:?}", self.stats);
            return Ok(Outcome::Exhausted);
        };

        self.path = self.reconstruct(&goal);
        self.state = SearchState::Succeeded;
        debug!("A* found {} steps: {:?}", self.path.len(), self.stats);
        Ok(Outcome::Succeeded(self.path.clone()))
    }

    /// Walk parent links through the closed set back to the root.
    fn reconstruct(&self, goal: &Node) -> Vec<Coord> {
        let mut path = vec![goal.coord];
        let mut parent = goal.parent;
        while let Some(p) = parent {
            let Some(node) = self.visited.get(p) else {
                break;
            };
            path.push(node.coord);
            parent = node.parent;
        }
        path.reverse();
        path
    }
}
