use std::fmt;
use std::str::FromStr;

use gridstar_core::Coord;
use thiserror::Error;

/// Distance estimate used to rank frontier nodes.
///
/// Every variant is a pure function of two coordinates. Only
/// [`Chebyshev`](Heuristic::Chebyshev) is admissible under unit-cost
/// 8-directional movement; the others overestimate diagonal steps and trade
/// optimality for fewer expansions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heuristic {
    /// `|Δrow| + |Δcol|`
    Manhattan,
    /// `sqrt(Δrow² + Δcol²)`
    #[default]
    Euclidean,
    /// `10·(|Δrow| + |Δcol|) − 6·min(|Δrow|, |Δcol|)`
    Octagonal,
    /// `max(|Δrow|, |Δcol|)`
    Chebyshev,
}

impl Heuristic {
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Manhattan,
        Heuristic::Euclidean,
        Heuristic::Octagonal,
        Heuristic::Chebyshev,
    ];

    /// Estimated remaining cost from `a` to `b`.
    #[inline]
    pub fn estimate(self, a: Coord, b: Coord) -> f32 {
        let (dr, dc) = a.abs_delta(b);
        match self {
            Heuristic::Manhattan => manhattan(dr, dc),
            Heuristic::Euclidean => ((dr as f32).powi(2) + (dc as f32).powi(2)).sqrt(),
            Heuristic::Octagonal => 10.0 * manhattan(dr, dc) - 6.0 * dr.min(dc) as f32,
            Heuristic::Chebyshev => dr.max(dc) as f32,
        }
    }

    /// Whether the estimate never exceeds the true remaining cost when
    /// every step, diagonal or not, costs 1.
    #[inline]
    pub const fn is_admissible(self) -> bool {
        matches!(self, Heuristic::Chebyshev)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::Octagonal => "octagonal",
            Heuristic::Chebyshev => "chebyshev",
        }
    }
}

#[inline]
fn manhattan(dr: i32, dc: i32) -> f32 {
    (dr + dc) as f32
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a heuristic name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown heuristic {0:?} (expected manhattan, euclidean, octagonal or chebyshev)")]
pub struct ParseHeuristicError(pub String);

impl FromStr for Heuristic {
    type Err = ParseHeuristicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name() == lower)
            .ok_or_else(|| ParseHeuristicError(s.to_string()))
    }
}
