use gridstar_core::{Dimensions, Grid};

use crate::heuristic::Heuristic;

/// How the frontier treats a rediscovered coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DuplicatePolicy {
    /// Push every rescored neighbor, even if the frontier already holds the
    /// same coordinate at a lower cost. Dominated entries are discarded when
    /// extracted.
    #[default]
    Keep,
    /// Push a neighbor only if it improves on the best `g` seen for its
    /// coordinate in this search. Fewer pushes, same path cost.
    DecreaseKey,
}

/// Engine settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Grid rows.
    pub rows: i32,
    /// Grid columns.
    pub cols: i32,
    pub heuristic: Heuristic,
    pub duplicates: DuplicatePolicy,
    /// Reject a blocked origin or destination before searching instead of
    /// running the search to exhaustion.
    pub validate_endpoints: bool,
}

impl SearchConfig {
    pub fn size(&self) -> Dimensions {
        Dimensions::new(self.rows, self.cols)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            rows: Grid::DEFAULT_SIZE,
            cols: Grid::DEFAULT_SIZE,
            heuristic: Heuristic::default(),
            duplicates: DuplicatePolicy::default(),
            validate_endpoints: true,
        }
    }
}
