//! Read-only query contract consumed by the pathfinder.
//!
//! `nav-path` searches through [`NavGrid`] rather than the concrete
//! [`GridModel`](crate::GridModel), so tests and hosts can plug in their own
//! terrain source (a flat array, a chunked world, a mock).

use nav_core::{EntityId, GridPos};

/// Walkability and cost queries over a grid snapshot.
pub trait NavGrid {
    /// `true` if an actor may stand on `pos`.
    ///
    /// `ignore` names one entity (usually the mover itself) whose body
    /// obstacle or occupancy entry must not count as blocking.
    fn is_walkable(&self, pos: GridPos, ignore: Option<EntityId>) -> bool;

    /// Raw terrain cost of the tile at `pos`, or `None` if no tile exists.
    fn terrain_cost(&self, pos: GridPos) -> Option<f64>;

    /// Cost of entering `pos`: the terrain cost when walkable, `+∞` otherwise.
    fn movement_cost(&self, pos: GridPos, ignore: Option<EntityId>) -> f64 {
        if !self.is_walkable(pos, ignore) {
            return f64::INFINITY;
        }
        self.terrain_cost(pos).unwrap_or(f64::INFINITY)
    }
}
