use gridstar_core::{Direction, Grid};

use crate::node::Node;

/// Cached neighbor expansion helper.
///
/// Produces the passable 8-directional children of a node, in
/// [`Direction::ALL`] order, reusing one buffer across calls.
pub struct Neighbors {
    buf: Vec<Node>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Children of `node` that are passable in `grid`.
    ///
    /// Each child is seeded with the parent's scores and links back to it by
    /// coordinate; the caller rescores it before use.
    pub fn expand(&mut self, node: &Node, grid: &Grid) -> &[Node] {
        self.buf.clear();
        for dir in Direction::ALL {
            let c = node.coord.step(dir);
            if grid.is_passable(c) {
                self.buf.push(Node::child_of(node, c));
            }
        }
        &self.buf
    }
}

/// Allocating form of [`Neighbors::expand`].
pub fn expand(node: &Node, grid: &Grid) -> Vec<Node> {
    Neighbors::new().expand(node, grid).to_vec()
}
