//! `GridModel` — sparse tiles, obstacles and live occupancy.
//!
//! # Storage
//!
//! Three position-keyed `FxHashMap`s plus one id-keyed map:
//!
//! ```text
//! tiles        GridPos  → Tile
//! obstacles    EntityId → Obstacle
//! obstacle_at  GridPos  → EntityId     (reverse index, one obstacle per cell)
//! occupancy    GridPos  → EntityId     (moving actors, rewritten every step)
//! ```
//!
//! Sparse maps keep unbounded or oddly-shaped worlds cheap.  A dense
//! `x + y * width` array would have better locality on large rectangular
//! maps; the [`NavGrid`] trait lets a host swap one in without touching the
//! pathfinder.
//!
//! # Mutation contract
//!
//! Every setter is an idempotent upsert and never fails.  Door guards
//! (locked doors refusing `open`, key/lockpick checks) live in
//! [`GridModel::try_open_door`] and in the movement coordinator; the raw
//! [`GridModel::set_door_state`] overwrites unconditionally.

use rustc_hash::FxHashMap;

use nav_core::{EntityId, GridPos};

use crate::obstacle::{DEFAULT_LOCKPICK_THRESHOLD, Door, DoorCredentials, DoorState, Obstacle};
use crate::query::NavGrid;
use crate::sight::line_between;
use crate::tile::Tile;

// ── GridModel ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GridModel {
    tiles:              FxHashMap<GridPos, Tile>,
    obstacles:          FxHashMap<EntityId, Obstacle>,
    obstacle_at:        FxHashMap<GridPos, EntityId>,
    occupancy:          FxHashMap<GridPos, EntityId>,
    lockpick_threshold: u32,
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GridModel {
    pub fn new() -> Self {
        Self {
            tiles:              FxHashMap::default(),
            obstacles:          FxHashMap::default(),
            obstacle_at:        FxHashMap::default(),
            occupancy:          FxHashMap::default(),
            lockpick_threshold: DEFAULT_LOCKPICK_THRESHOLD,
        }
    }

    /// A `width × height` block of plain floor with its corner at the origin.
    pub fn filled(width: i32, height: i32) -> Self {
        let mut grid = Self::new();
        for y in 0..height {
            for x in 0..width {
                grid.set_tile(GridPos::new(x, y), Tile::floor());
            }
        }
        grid
    }

    /// Override the lockpick skill needed to defeat a locked door.
    pub fn with_lockpick_threshold(mut self, threshold: u32) -> Self {
        self.lockpick_threshold = threshold;
        self
    }

    #[inline]
    pub fn lockpick_threshold(&self) -> u32 {
        self.lockpick_threshold
    }

    pub fn set_lockpick_threshold(&mut self, threshold: u32) {
        self.lockpick_threshold = threshold;
    }

    // ── Tiles ─────────────────────────────────────────────────────────────

    /// Insert or replace the tile at `pos`.
    pub fn set_tile(&mut self, pos: GridPos, tile: Tile) {
        self.tiles.insert(pos, tile);
    }

    #[inline]
    pub fn tile(&self, pos: GridPos) -> Option<&Tile> {
        self.tiles.get(&pos)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Every position carrying a tile, in unspecified order.
    pub fn tile_positions(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.tiles.keys().copied()
    }

    // ── Obstacles ─────────────────────────────────────────────────────────

    /// Insert or move an obstacle.
    ///
    /// If the id was already placed elsewhere it is moved.  Any *other*
    /// obstacle standing on the target cell is evicted: one obstacle per cell,
    /// last write wins.
    pub fn set_obstacle(&mut self, obstacle: Obstacle) {
        let id = obstacle.id();
        let pos = obstacle.pos();

        if let Some(previous) = self.obstacles.get(&id) {
            let old_pos = previous.pos();
            if self.obstacle_at.get(&old_pos) == Some(&id) {
                self.obstacle_at.remove(&old_pos);
            }
        }
        if let Some(evicted) = self.obstacle_at.insert(pos, id) {
            if evicted != id {
                self.obstacles.remove(&evicted);
            }
        }
        self.obstacles.insert(id, obstacle);
    }

    /// Remove an obstacle by id.  Removing an unknown id is a no-op.
    pub fn remove_obstacle(&mut self, id: EntityId) -> Option<Obstacle> {
        let removed = self.obstacles.remove(&id)?;
        if self.obstacle_at.get(&removed.pos()) == Some(&id) {
            self.obstacle_at.remove(&removed.pos());
        }
        Some(removed)
    }

    #[inline]
    pub fn obstacle(&self, id: EntityId) -> Option<&Obstacle> {
        self.obstacles.get(&id)
    }

    #[inline]
    pub fn obstacle_at(&self, pos: GridPos) -> Option<&Obstacle> {
        self.obstacle_at.get(&pos).and_then(|id| self.obstacles.get(id))
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles.values()
    }

    // ── Doors ─────────────────────────────────────────────────────────────

    /// Snapshot of the door at `pos`, if the obstacle there is a door.
    pub fn door_at(&self, pos: GridPos) -> Option<Door> {
        self.obstacle_at(pos).and_then(Obstacle::as_door).copied()
    }

    /// Snapshot of a door by id.
    pub fn door(&self, id: EntityId) -> Option<Door> {
        self.obstacle(id).and_then(Obstacle::as_door).copied()
    }

    /// Overwrite a door's state with no transition guard.
    ///
    /// Returns `false` (and changes nothing) if `id` is absent or not a door.
    pub fn set_door_state(&mut self, id: EntityId, state: DoorState) -> bool {
        match self.obstacles.get_mut(&id) {
            Some(Obstacle::Door(door)) => {
                door.state = state;
                true
            }
            _ => false,
        }
    }

    /// Attempt to open a door with the given credentials.
    ///
    /// | Current state | Result                                                |
    /// |---------------|-------------------------------------------------------|
    /// | open          | `true`, unchanged                                     |
    /// | closed        | `true`, now open                                      |
    /// | locked        | `true` and open if key or skill ≥ threshold, else `false` |
    ///
    /// Missing or non-door ids return `false`.
    pub fn try_open_door(&mut self, id: EntityId, credentials: DoorCredentials) -> bool {
        let threshold = self.lockpick_threshold;
        let Some(Obstacle::Door(door)) = self.obstacles.get_mut(&id) else {
            return false;
        };
        match door.state {
            DoorState::Open => true,
            DoorState::Closed => {
                door.state = DoorState::Open;
                true
            }
            DoorState::Locked => {
                if credentials.unlocks(threshold) {
                    door.state = DoorState::Open;
                    true
                } else {
                    false
                }
            }
        }
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    pub fn set_occupied(&mut self, pos: GridPos, body: EntityId) {
        self.occupancy.insert(pos, body);
    }

    /// Clear the occupancy entry at `pos`, returning its previous owner.
    pub fn clear_occupied(&mut self, pos: GridPos) -> Option<EntityId> {
        self.occupancy.remove(&pos)
    }

    #[inline]
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.occupancy.contains_key(&pos)
    }

    #[inline]
    pub fn occupant(&self, pos: GridPos) -> Option<EntityId> {
        self.occupancy.get(&pos).copied()
    }

    /// Move an occupancy entry from `from` to `to`.  The `from` entry is only
    /// cleared if it still belongs to `body`.
    pub fn move_occupied(&mut self, body: EntityId, from: GridPos, to: GridPos) {
        if self.occupancy.get(&from) == Some(&body) {
            self.occupancy.remove(&from);
        }
        self.occupancy.insert(to, body);
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Whether an actor may stand on `pos`.
    ///
    /// Checked in order: tile exists and is walkable; no wall; no door
    /// unless open; no body obstacle other than `ignore`; no occupant other
    /// than `ignore`.
    pub fn is_walkable(&self, pos: GridPos, ignore: Option<EntityId>) -> bool {
        match self.tiles.get(&pos) {
            Some(tile) if tile.walkable => {}
            _ => return false,
        }
        match self.obstacle_at(pos) {
            Some(Obstacle::Wall(_)) => return false,
            Some(Obstacle::Door(door)) if !door.state.is_open() => return false,
            Some(Obstacle::Body(body)) if Some(body.id) != ignore => return false,
            _ => {}
        }
        match self.occupancy.get(&pos) {
            Some(&owner) => Some(owner) == ignore,
            None => true,
        }
    }

    /// Terrain cost of `pos` if walkable (no ignored body), else `+∞`.
    pub fn movement_cost(&self, pos: GridPos) -> f64 {
        NavGrid::movement_cost(self, pos, None)
    }

    /// Whether `pos` hides what lies beyond it.  Cells without a tile block.
    pub fn blocks_line_of_sight(&self, pos: GridPos) -> bool {
        let Some(tile) = self.tiles.get(&pos) else {
            return true;
        };
        if tile.blocks_line_of_sight {
            return true;
        }
        match self.obstacle_at(pos) {
            Some(Obstacle::Wall(wall)) => wall.blocks_line_of_sight,
            Some(Obstacle::Door(door)) => door.blocks_line_of_sight(),
            Some(Obstacle::Body(_)) | None => false,
        }
    }

    /// `true` if no cell strictly between `from` and `to` blocks sight.
    pub fn has_line_of_sight(&self, from: GridPos, to: GridPos) -> bool {
        line_between(from, to)
            .into_iter()
            .all(|cell| !self.blocks_line_of_sight(cell))
    }
}

impl NavGrid for GridModel {
    #[inline]
    fn is_walkable(&self, pos: GridPos, ignore: Option<EntityId>) -> bool {
        GridModel::is_walkable(self, pos, ignore)
    }

    #[inline]
    fn terrain_cost(&self, pos: GridPos) -> Option<f64> {
        self.tiles.get(&pos).map(Tile::terrain_cost)
    }
}
