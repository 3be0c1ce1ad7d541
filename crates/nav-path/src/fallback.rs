//! Reachable-goal fallback.
//!
//! When the requested goal cannot be stood on (a wall, a closed door, an
//! occupied cell) the search may retarget to a nearby walkable cell.  Rings
//! of Chebyshev radius `1..=max_fallback_radius` are tried in turn; within a
//! ring the perimeter is scanned row by row, top to bottom, left to right,
//! and the first walkable cell wins.
//!
//! ```text
//! r = 1        r = 2
//!              a b c d e
//!   1 2 3      f . . . g
//!   4 G 5      h . G . i
//!   6 7 8      j . . . k
//!              l m n o p
//! ```

use nav_core::GridPos;
use nav_grid::NavGrid;

use crate::options::PathOptions;

/// Pick the cell the search should aim for.
///
/// Returns `(cell, used_fallback)`, or `None` when the goal is unwalkable
/// and no substitute is allowed or found.
pub fn resolve_goal<G: NavGrid + ?Sized>(
    grid: &G,
    goal: GridPos,
    options: &PathOptions,
) -> Option<(GridPos, bool)> {
    if grid.is_walkable(goal, options.ignore_body) {
        return Some((goal, false));
    }
    if !options.allow_target_fallback {
        return None;
    }
    (1..=options.max_fallback_radius as i32)
        .flat_map(|r| ring(goal, r))
        .find(|&cell| grid.is_walkable(cell, options.ignore_body))
        .map(|cell| (cell, true))
}

/// Perimeter of the square of Chebyshev radius `r` around `center`, in
/// row-major order.
pub fn ring(center: GridPos, r: i32) -> impl Iterator<Item = GridPos> {
    (-r..=r).flat_map(move |dy| {
        // Interior rows only contribute their two edge cells.
        let xs: Vec<i32> = if dy.abs() == r { (-r..=r).collect() } else { vec![-r, r] };
        xs.into_iter().map(move |dx| center.offset(dx, dy))
    })
}
