use gridstar_core::Coord;

/// Cost of one step in any of the eight directions.
pub const COST: f32 = 1.0;

/// A candidate cell annotated with its scores.
///
/// `parent` names the predecessor by coordinate; the predecessor itself lives
/// in the closed set, so reconstruction is a lookup rather than a pointer
/// walk. A node without a parent is the search root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub coord: Coord,
    g: f32,
    h: f32,
    f: f32,
    pub parent: Option<Coord>,
}

impl Node {
    /// A root node at `coord` with all scores zero.
    pub const fn root(coord: Coord) -> Self {
        Self {
            coord,
            g: 0.0,
            h: 0.0,
            f: 0.0,
            parent: None,
        }
    }

    /// A child of `parent` at `coord`, seeded with the parent's scores until
    /// [`set_scores`](Self::set_scores) is called.
    pub const fn child_of(parent: &Node, coord: Coord) -> Self {
        Self {
            coord,
            g: parent.g,
            h: parent.h,
            f: parent.f,
            parent: Some(parent.coord),
        }
    }

    /// Set `g` and `h`; `f` is always their sum.
    #[inline]
    pub fn set_scores(&mut self, g: f32, h: f32) {
        self.g = g;
        self.h = h;
        self.f = g + h;
    }

    /// Accumulated cost from the origin.
    #[inline]
    pub fn g(&self) -> f32 {
        self.g
    }

    /// Heuristic estimate to the destination.
    #[inline]
    pub fn h(&self) -> f32 {
        self.h
    }

    /// Priority, `g + h`.
    #[inline]
    pub fn f(&self) -> f32 {
        self.f
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
