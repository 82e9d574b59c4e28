//! End-to-end search scenarios and properties.

use gridstar_core::{Coord, Grid, parse_map};
use gridstar_paths::{AStar, DuplicatePolicy, Heuristic, Outcome, SearchError};
use proptest::prelude::*;

fn c(row: i32, col: i32) -> Coord {
    Coord::new(row, col)
}

fn check_path(grid: &Grid, path: &[Coord], origin: Coord, destination: Coord) {
    assert_eq!(path.first(), Some(&origin));
    assert_eq!(path.last(), Some(&destination));
    for w in path.windows(2) {
        assert!(w[0].is_adjacent(w[1]), "{} -> {}", w[0], w[1]);
    }
    for p in path {
        assert!(grid.is_passable(*p), "{p} blocked");
    }
}

/// Reachability by flood fill, independent of the engine.
fn reachable(grid: &Grid, from: Coord, to: Coord) -> bool {
    let mut seen = vec![false; grid.size().len()];
    let mut stack = vec![from];
    while let Some(p) = stack.pop() {
        let Some(i) = grid.size().index(p) else { continue };
        if seen[i] || !grid.is_passable(p) {
            continue;
        }
        if p == to {
            return true;
        }
        seen[i] = true;
        for dr in -1..=1 {
            for dc in -1..=1 {
                if (dr, dc) != (0, 0) {
                    stack.push(p.shift(dr, dc));
                }
            }
        }
    }
    false
}

/// Fewest 8-directional steps, by breadth-first search.
fn bfs_steps(grid: &Grid, from: Coord, to: Coord) -> Option<usize> {
    let size = grid.size();
    let mut dist = vec![usize::MAX; size.len()];
    let mut queue = std::collections::VecDeque::new();
    dist[size.index(from)?] = 0;
    queue.push_back(from);
    while let Some(p) = queue.pop_front() {
        let d = dist[size.index(p)?];
        if p == to {
            return Some(d);
        }
        for dr in -1..=1 {
            for dc in -1..=1 {
                let n = p.shift(dr, dc);
                if (dr, dc) == (0, 0) || !grid.is_passable(n) {
                    continue;
                }
                let Some(i) = size.index(n) else { continue };
                if dist[i] == usize::MAX {
                    dist[i] = d + 1;
                    queue.push_back(n);
                }
            }
        }
    }
    None
}

#[test]
fn ten_by_ten_open() {
    let mut a = AStar::with_size(10, 10, c(0, 0), c(6, 6)).unwrap();
    let Outcome::Succeeded(path) = a.run().unwrap() else {
        panic!("expected a path");
    };
    assert!(path.len() >= 7);
    check_path(a.grid(), &path, c(0, 0), c(6, 6));
}

#[test]
fn ten_by_ten_with_obstacles() {
    let blocked = [c(1, 1), c(2, 1), c(1, 2), c(1, 3), c(3, 1)];
    let mut a = AStar::with_size(10, 10, c(0, 0), c(6, 6)).unwrap();
    for b in blocked {
        a.mark_inaccessible(b).unwrap();
    }
    let out = a.run().unwrap();
    let path = out.path().expect("expected a path");
    assert!(blocked.iter().all(|b| !path.contains(b)));
    check_path(a.grid(), path, c(0, 0), c(6, 6));
}

#[test]
fn three_by_three_blocked_destination() {
    let mut a = AStar::with_size(3, 3, c(0, 0), c(2, 2)).unwrap();
    a.mark_inaccessible(c(2, 2)).unwrap();
    // Checked up front by default.
    assert_eq!(a.run(), Err(SearchError::DestinationBlocked(c(2, 2))));
    // Unchecked, the destination is never enqueued and the search drains
    // the frontier.
    a.set_validate_endpoints(false);
    assert_eq!(a.run().unwrap(), Outcome::Exhausted);
    assert!(a.path().is_empty());
}

#[test]
fn maze_from_text() {
    let map = parse_map(
        "
O.#.....
..#.##..
..#..#..
..##.#..
.....#.X",
    )
    .unwrap();
    let origin = map.origin.unwrap();
    let destination = map.destination.unwrap();
    let mut a = AStar::with_grid(map.grid, origin, destination);
    a.set_heuristic(Heuristic::Chebyshev);
    a.run().unwrap();
    check_path(a.grid(), a.path(), origin, destination);
    assert_eq!(
        a.path().len() - 1,
        bfs_steps(a.grid(), origin, destination).unwrap()
    );
    let rendered = a.render(true);
    assert_eq!(rendered.lines().count(), 5);
    assert_eq!(rendered.matches('*').count(), a.path().len() - 2);
}

#[test]
fn engine_reused_across_endpoints() {
    let mut a = AStar::with_size(20, 20, c(0, 0), c(19, 19)).unwrap();
    for col in 0..19 {
        a.mark_inaccessible(c(10, col)).unwrap();
    }
    assert!(a.run().unwrap().is_found());
    a.set_origin(c(19, 0));
    a.set_destination(c(0, 0));
    assert!(a.run().unwrap().is_found());
    check_path(a.grid(), a.path(), c(19, 0), c(0, 0));
    assert!(a.path().contains(&c(10, 19)));
}

// Same path cost under both policies when the heuristic is admissible. The
// node counts differ: `Keep` pushes every rediscovery, `DecreaseKey` only
// improvements.
#[test]
fn duplicate_policies_agree_on_cost() {
    let mut a = AStar::with_size(30, 30, c(0, 0), c(29, 29)).unwrap();
    a.set_heuristic(Heuristic::Chebyshev);
    for r in 0..25 {
        a.mark_inaccessible(c(r, 10)).unwrap();
        a.mark_inaccessible(c(29 - r, 20)).unwrap();
    }
    a.run().unwrap();
    let keep = (a.path().len(), a.stats());
    a.set_duplicate_policy(DuplicatePolicy::DecreaseKey);
    a.run().unwrap();
    let decrease = (a.path().len(), a.stats());
    assert_eq!(keep.0, decrease.0);
    assert_eq!(decrease.1.expanded, keep.1.expanded);
    assert_eq!(decrease.1.pushed + decrease.1.skipped, keep.1.pushed);
}

fn arb_grid() -> impl Strategy<Value = (Grid, Coord, Coord)> {
    (2i32..12, 2i32..12).prop_flat_map(|(rows, cols)| {
        let cells = (rows * cols) as usize;
        (
            Just((rows, cols)),
            prop::collection::vec(prop::bool::weighted(0.3), cells),
            (0..rows, 0..cols),
            (0..rows, 0..cols),
        )
            .prop_map(|((rows, cols), walls, o, d)| {
                let mut grid = Grid::new(rows, cols).unwrap();
                for (i, wall) in walls.into_iter().enumerate() {
                    if wall {
                        grid.mark_inaccessible(grid.size().coord(i)).unwrap();
                    }
                }
                let origin = Coord::from(o);
                let destination = Coord::from(d);
                grid.mark_accessible(origin).unwrap();
                grid.mark_accessible(destination).unwrap();
                (grid, origin, destination)
            })
    })
}

fn arb_heuristic() -> impl Strategy<Value = Heuristic> {
    prop::sample::select(Heuristic::ALL.to_vec())
}

fn arb_policy() -> impl Strategy<Value = DuplicatePolicy> {
    prop_oneof![Just(DuplicatePolicy::Keep), Just(DuplicatePolicy::DecreaseKey)]
}

proptest! {
    #[test]
    fn found_iff_reachable(
        (grid, origin, destination) in arb_grid(),
        heuristic in arb_heuristic(),
        policy in arb_policy(),
    ) {
        let expect = reachable(&grid, origin, destination);
        let mut a = AStar::with_grid(grid, origin, destination);
        a.set_heuristic(heuristic);
        a.set_duplicate_policy(policy);
        let out = a.run().unwrap();
        prop_assert_eq!(out.is_found(), expect);
        if expect {
            check_path(a.grid(), a.path(), origin, destination);
        } else {
            prop_assert!(a.path().is_empty());
        }
    }

    #[test]
    fn runs_are_deterministic(
        (grid, origin, destination) in arb_grid(),
        heuristic in arb_heuristic(),
    ) {
        let mut a = AStar::with_grid(grid, origin, destination);
        a.set_heuristic(heuristic);
        let first = a.run().unwrap();
        let stats = a.stats();
        prop_assert_eq!(a.run().unwrap(), first);
        prop_assert_eq!(a.stats(), stats);
    }

    #[test]
    fn chebyshev_is_optimal(
        (grid, origin, destination) in arb_grid(),
        policy in arb_policy(),
    ) {
        let best = bfs_steps(&grid, origin, destination);
        let mut a = AStar::with_grid(grid, origin, destination);
        a.set_heuristic(Heuristic::Chebyshev);
        a.set_duplicate_policy(policy);
        a.run().unwrap();
        prop_assert_eq!(a.path().len().checked_sub(1), best);
    }

    #[test]
    fn symmetric_heuristics(
        ar in -50i32..50, ac in -50i32..50,
        br in -50i32..50, bc in -50i32..50,
        heuristic in arb_heuristic(),
    ) {
        let a = Coord::new(ar, ac);
        let b = Coord::new(br, bc);
        prop_assert_eq!(heuristic.estimate(a, a), 0.0);
        prop_assert_eq!(heuristic.estimate(a, b), heuristic.estimate(b, a));
        prop_assert!(heuristic.estimate(a, b) >= 0.0);
    }
}
