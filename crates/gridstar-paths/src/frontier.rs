//! Open and closed sets for best-first search.
//!
//! [`Frontier`] is a binary heap ordered by `f` with insertion order as the
//! tie-break, so extraction is deterministic. [`Visited`] is a flat,
//! coordinate-indexed table invalidated in O(1) per search by bumping a
//! generation counter.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridstar_core::{Coord, Dimensions};

use crate::node::Node;

// ---------------------------------------------------------------------------
// Frontier
// ---------------------------------------------------------------------------

/// Heap entry: a node plus its insertion sequence number.
#[derive(Clone, Copy)]
struct Entry {
    node: Node,
    seq: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, then the
        // earliest insertion.
        other
            .node
            .f()
            .total_cmp(&self.node.f())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// The open set: nodes discovered but not yet finalized.
///
/// Several entries may share a coordinate; callers decide whether that is
/// allowed (see [`DuplicatePolicy`](crate::DuplicatePolicy)).
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node.
    pub fn push(&mut self, node: Node) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { node, seq });
    }

    /// Remove and return the node with the smallest `f`; among equal `f`,
    /// the one inserted first.
    pub fn pop(&mut self) -> Option<Node> {
        self.heap.pop().map(|e| e.node)
    }

    /// The node [`pop`](Self::pop) would return next.
    pub fn peek(&self) -> Option<&Node> {
        self.heap.peek().map(|e| &e.node)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every entry and restart the insertion sequence. Keeps the
    /// allocation.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }
}

// ---------------------------------------------------------------------------
// Visited
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
struct Slot {
    node: Node,
    generation: u32,
}

/// The closed set: finalized nodes keyed by coordinate.
///
/// A coordinate is finalized at most once per search; later inserts for the
/// same coordinate are refused.
pub struct Visited {
    size: Dimensions,
    slots: Vec<Option<Slot>>,
    generation: u32,
    len: usize,
}

impl Visited {
    /// An empty closed set covering a grid of `size`.
    pub fn new(size: Dimensions) -> Self {
        Self {
            size,
            slots: vec![None; size.len()],
            generation: 0,
            len: 0,
        }
    }

    /// Forget every finalized node.
    ///
    /// If `size` matches the current extent, this is O(1): the generation is
    /// bumped and stale slots are ignored from then on. Otherwise the table
    /// is reallocated.
    pub fn reset(&mut self, size: Dimensions) {
        self.len = 0;
        if size == self.size {
            self.generation = self.generation.wrapping_add(1);
            if self.generation == 0 {
                // Wrapped: stale slots could now look current.
                self.slots.fill(None);
            }
            return;
        }
        self.size = size;
        self.slots.clear();
        self.slots.resize(size.len(), None);
        self.generation = 0;
    }

    fn slot(&self, c: Coord) -> Option<&Slot> {
        let idx = self.size.index(c)?;
        self.slots
            .get(idx)?
            .as_ref()
            .filter(|s| s.generation == self.generation)
    }

    /// Whether `c` has been finalized in the current search.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.slot(c).is_some()
    }

    /// The finalized node at `c`.
    #[inline]
    pub fn get(&self, c: Coord) -> Option<&Node> {
        self.slot(c).map(|s| &s.node)
    }

    /// Finalize `node`. Returns `false` (and changes nothing) if its
    /// coordinate is outside the table or already finalized.
    pub fn insert(&mut self, node: Node) -> bool {
        if self.contains(node.coord) {
            return false;
        }
        let Some(slot) = self
            .size
            .index(node.coord)
            .and_then(|idx| self.slots.get_mut(idx))
        else {
            return false;
        };
        *slot = Some(Slot {
            node,
            generation: self.generation,
        });
        self.len += 1;
        true
    }

    /// Number of nodes finalized in the current search.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(row: i32, col: i32, g: f32, h: f32) -> Node {
        let mut n = Node::root(Coord::new(row, col));
        n.set_scores(g, h);
        n
    }

    #[test]
    fn pops_lowest_f_first() {
        let mut f = Frontier::new();
        f.push(scored(0, 0, 5.0, 1.0));
        f.push(scored(0, 1, 1.0, 1.0));
        f.push(scored(0, 2, 3.0, 0.5));
        assert_eq!(f.len(), 3);
        assert_eq!(f.peek().map(|n| n.coord), Some(Coord::new(0, 1)));
        let order: Vec<_> = std::iter::from_fn(|| f.pop()).map(|n| n.coord).collect();
        assert_eq!(
            order,
            vec![Coord::new(0, 1), Coord::new(0, 2), Coord::new(0, 0)]
        );
        assert!(f.is_empty());
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let mut f = Frontier::new();
        f.push(scored(3, 3, 2.0, 2.0));
        f.push(scored(0, 0, 1.0, 3.0));
        f.push(scored(1, 1, 4.0, 0.0));
        let order: Vec<_> = std::iter::from_fn(|| f.pop()).map(|n| n.coord).collect();
        assert_eq!(
            order,
            vec![Coord::new(3, 3), Coord::new(0, 0), Coord::new(1, 1)]
        );
    }

    #[test]
    fn duplicates_are_kept() {
        let mut f = Frontier::new();
        f.push(scored(1, 1, 4.0, 1.0));
        f.push(scored(1, 1, 2.0, 1.0));
        assert_eq!(f.len(), 2);
        assert_eq!(f.pop().map(|n| n.g()), Some(2.0));
        assert_eq!(f.pop().map(|n| n.g()), Some(4.0));
    }

    #[test]
    fn clear_restarts_sequence() {
        let mut f = Frontier::new();
        f.push(scored(0, 0, 1.0, 0.0));
        f.clear();
        assert!(f.is_empty());
        f.push(scored(2, 2, 1.0, 0.0));
        f.push(scored(1, 1, 1.0, 0.0));
        assert_eq!(f.pop().map(|n| n.coord), Some(Coord::new(2, 2)));
    }

    #[test]
    fn visited_finalizes_once() {
        let mut v = Visited::new(Dimensions::new(4, 4));
        let c = Coord::new(2, 3);
        assert!(!v.contains(c));
        assert!(v.insert(scored(2, 3, 1.0, 0.0)));
        assert!(!v.insert(scored(2, 3, 0.5, 0.0)));
        assert_eq!(v.get(c).map(|n| n.g()), Some(1.0));
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn visited_rejects_out_of_bounds() {
        let mut v = Visited::new(Dimensions::new(2, 2));
        assert!(!v.insert(Node::root(Coord::new(2, 0))));
        assert!(!v.insert(Node::root(Coord::NONE)));
        assert!(v.is_empty());
    }

    #[test]
    fn reset_same_size_invalidates() {
        let size = Dimensions::new(3, 3);
        let mut v = Visited::new(size);
        v.insert(Node::root(Coord::new(1, 1)));
        v.reset(size);
        assert!(!v.contains(Coord::new(1, 1)));
        assert!(v.get(Coord::new(1, 1)).is_none());
        assert!(v.is_empty());
        assert!(v.insert(Node::root(Coord::new(1, 1))));
    }

    #[test]
    fn reset_new_size_reallocates() {
        let mut v = Visited::new(Dimensions::new(2, 2));
        v.insert(Node::root(Coord::new(1, 1)));
        v.reset(Dimensions::new(5, 5));
        assert!(!v.contains(Coord::new(1, 1)));
        assert!(v.insert(Node::root(Coord::new(4, 4))));
    }
}
