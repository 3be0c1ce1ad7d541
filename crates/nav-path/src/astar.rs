//! Pathfinder trait and default A* implementation.
//!
//! # Pluggability
//!
//! `nav-mobility` searches through the [`Pathfinder`] trait, so hosts can
//! swap in jump-point search, hierarchical planners or a scripted mock
//! without touching the coordinator.  [`AStarPathfinder`] is the default.
//!
//! # Costs
//!
//! Entering a cell costs its terrain cost, multiplied by `√2` for a diagonal
//! step.  Cells with infinite cost (unwalkable) are pruned before insertion.
//!
//! # Ties
//!
//! The open set orders by `f`, then by lower `h` (prefer nodes nearer the
//! goal), then by `GridPos`.  Among equally cheap routes the one returned is
//! therefore deterministic for a given grid, but which one it is depends on
//! this ordering and is not part of the contract.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use nav_core::GridPos;
use nav_core::pos::{DIAGONAL_STEPS, ORTHOGONAL_STEPS};
use nav_grid::NavGrid;

use crate::fallback::resolve_goal;
use crate::options::PathOptions;
use crate::result::PathResult;

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable search engine.
///
/// Implementations must be pure with respect to `grid`: a search never
/// mutates the world, whether it succeeds or fails.
pub trait Pathfinder {
    /// Search from `start` toward `goal`.
    ///
    /// Never fails: "no route" is an empty [`PathResult`].
    fn find_path<G: NavGrid + ?Sized>(
        &self,
        grid: &G,
        start: GridPos,
        goal: GridPos,
        options: &PathOptions,
    ) -> PathResult;
}

// ── AStarPathfinder ───────────────────────────────────────────────────────────

/// A* over the 4- or 8-neighborhood, with optional corner-cut prevention and
/// fallback goal resolution.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarPathfinder;

impl Pathfinder for AStarPathfinder {
    fn find_path<G: NavGrid + ?Sized>(
        &self,
        grid: &G,
        start: GridPos,
        goal: GridPos,
        options: &PathOptions,
    ) -> PathResult {
        find_path(grid, start, goal, options)
    }
}

/// Run A* from `start` to `goal` over `grid`.
pub fn find_path<G: NavGrid + ?Sized>(
    grid: &G,
    start: GridPos,
    goal: GridPos,
    options: &PathOptions,
) -> PathResult {
    let ignore = options.ignore_body;

    if !grid.is_walkable(start, ignore) {
        trace!(%start, %goal, "start unwalkable");
        return PathResult::empty();
    }

    let Some((target, used_fallback)) = resolve_goal(grid, goal, options) else {
        trace!(%start, %goal, "goal unwalkable, no fallback");
        return PathResult::empty();
    };

    if start == target {
        return PathResult {
            path: vec![start],
            resolved_goal: Some(target),
            used_fallback,
            cost: 0.0,
        };
    }

    match astar(grid, start, target, options) {
        Some((path, cost)) => {
            trace!(%start, %target, len = path.len(), cost, used_fallback, "path found");
            PathResult { path, resolved_goal: Some(target), used_fallback, cost }
        }
        None => {
            trace!(%start, %target, "no route");
            PathResult::empty()
        }
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Total order over finite, non-NaN costs for use as a heap key.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// `true` if the step `from → to` is allowed under the corner-cut rule.
#[inline]
fn corner_clear<G: NavGrid + ?Sized>(
    grid: &G,
    from: GridPos,
    to: GridPos,
    options: &PathOptions,
) -> bool {
    if !options.prevent_corner_cutting || !from.is_diagonal_step(to) {
        return true;
    }
    grid.is_walkable(GridPos::new(to.x, from.y), options.ignore_body)
        && grid.is_walkable(GridPos::new(from.x, to.y), options.ignore_body)
}

fn astar<G: NavGrid + ?Sized>(
    grid: &G,
    start: GridPos,
    goal: GridPos,
    options: &PathOptions,
) -> Option<(Vec<GridPos>, f64)> {
    let diagonal: &[(i32, i32)] = if options.allow_diagonal { &DIAGONAL_STEPS } else { &[] };

    // g[p] = best known cost from start to p.
    let mut g: FxHashMap<GridPos, f64> = FxHashMap::default();
    let mut came_from: FxHashMap<GridPos, GridPos> = FxHashMap::default();
    let mut closed: FxHashSet<GridPos> = FxHashSet::default();

    // Min-heap on (f, h, pos).  Reverse turns BinaryHeap (max) into a min-heap.
    let mut open: BinaryHeap<Reverse<(Cost, Cost, GridPos)>> = BinaryHeap::new();

    g.insert(start, 0.0);
    let h0 = options.heuristic(start, goal);
    open.push(Reverse((Cost(h0), Cost(h0), start)));

    let mut iterations = 0u32;

    while let Some(Reverse((_, _, current))) = open.pop() {
        if current == goal {
            let cost = g.get(&goal).copied().unwrap_or(0.0);
            return Some((reconstruct(&came_from, goal), cost));
        }

        // Skip stale heap entries.
        if !closed.insert(current) {
            continue;
        }

        iterations += 1;
        if iterations > options.max_iterations {
            trace!(%start, %goal, iterations, "iteration cap reached");
            return None;
        }

        let g_current = g.get(&current).copied().unwrap_or(f64::INFINITY);

        for &(dx, dy) in ORTHOGONAL_STEPS.iter().chain(diagonal) {
            let next = current.offset(dx, dy);
            if closed.contains(&next) {
                continue;
            }

            let enter = grid.movement_cost(next, options.ignore_body);
            if !enter.is_finite() {
                continue;
            }
            if !corner_clear(grid, current, next, options) {
                continue;
            }

            let step = if dx != 0 && dy != 0 { std::f64::consts::SQRT_2 } else { 1.0 };
            let tentative = g_current + step * enter;

            if tentative < g.get(&next).copied().unwrap_or(f64::INFINITY) {
                g.insert(next, tentative);
                came_from.insert(next, current);
                let h = options.heuristic(next, goal);
                open.push(Reverse((Cost(tentative + h), Cost(h), next)));
            }
        }
    }

    None
}

fn reconstruct(came_from: &FxHashMap<GridPos, GridPos>, goal: GridPos) -> Vec<GridPos> {
    let mut path = vec![goal];
    let mut cur = goal;
    while let Some(&prev) = came_from.get(&cur) {
        path.push(prev);
        cur = prev;
    }
    path.reverse();
    path
}
