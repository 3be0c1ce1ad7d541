//! CSV tile and obstacle loaders.
//!
//! # Tile CSV
//!
//! ```csv
//! x,y,walkable,blocks_line_of_sight,terrain_cost
//! 0,0,true,false,1.0
//! 1,0,true,false,3.5
//! 2,0,false,true,1.0
//! ```
//!
//! # Obstacle CSV
//!
//! `state` is required for doors and ignored otherwise.  `blocks_line_of_sight`
//! maps to a wall's flag and a door's `blocks_line_of_sight_when_closed`; it
//! defaults to `true` when left empty.
//!
//! ```csv
//! id,kind,x,y,state,blocks_line_of_sight
//! 100,wall,2,2,,
//! 101,door,3,3,locked,true
//! 102,body,4,1,,
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use nav_core::{EntityId, GridPos};

use crate::GridError;
use crate::grid::GridModel;
use crate::obstacle::{Body, Door, DoorState, Obstacle, Wall};
use crate::tile::Tile;

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TileRecord {
    x:                    i32,
    y:                    i32,
    walkable:             bool,
    blocks_line_of_sight: bool,
    terrain_cost:         f64,
}

#[derive(Deserialize)]
struct ObstacleRecord {
    id:                   u32,
    kind:                 String,
    x:                    i32,
    y:                    i32,
    state:                Option<String>,
    blocks_line_of_sight: Option<bool>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load tiles from a CSV file into `grid`.  Returns the number of rows read.
pub fn load_tiles_csv(path: &Path, grid: &mut GridModel) -> Result<usize, GridError> {
    let file = std::fs::File::open(path)?;
    load_tiles_reader(file, grid)
}

/// Like [`load_tiles_csv`] but accepts any `Read` source.
pub fn load_tiles_reader<R: Read>(reader: R, grid: &mut GridModel) -> Result<usize, GridError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut count = 0;

    for result in csv_reader.deserialize::<TileRecord>() {
        let row = result.map_err(|e| GridError::Parse(e.to_string()))?;
        grid.set_tile(
            GridPos::new(row.x, row.y),
            Tile::new(row.walkable, row.blocks_line_of_sight, row.terrain_cost),
        );
        count += 1;
    }
    Ok(count)
}

/// Load obstacles from a CSV file into `grid`.  Returns the number of rows read.
pub fn load_obstacles_csv(path: &Path, grid: &mut GridModel) -> Result<usize, GridError> {
    let file = std::fs::File::open(path)?;
    load_obstacles_reader(file, grid)
}

/// Like [`load_obstacles_csv`] but accepts any `Read` source.
///
/// The file is validated in full before anything is written, so a bad row
/// leaves `grid` untouched.
pub fn load_obstacles_reader<R: Read>(reader: R, grid: &mut GridModel) -> Result<usize, GridError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut parsed: Vec<Obstacle> = Vec::new();
    let mut seen = rustc_hash::FxHashSet::default();

    for result in csv_reader.deserialize::<ObstacleRecord>() {
        let row = result.map_err(|e| GridError::Parse(e.to_string()))?;
        let obstacle = parse_obstacle(row)?;
        if !seen.insert(obstacle.id()) {
            return Err(GridError::DuplicateObstacle(obstacle.id()));
        }
        parsed.push(obstacle);
    }

    let count = parsed.len();
    for obstacle in parsed {
        grid.set_obstacle(obstacle);
    }
    Ok(count)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_obstacle(row: ObstacleRecord) -> Result<Obstacle, GridError> {
    let id = EntityId(row.id);
    let pos = GridPos::new(row.x, row.y);
    let blocks = row.blocks_line_of_sight.unwrap_or(true);

    match row.kind.trim() {
        "wall" => Ok(Obstacle::Wall(Wall { id, pos, blocks_line_of_sight: blocks })),
        "door" => {
            let state = parse_door_state(row.state.as_deref().unwrap_or(""))?;
            Ok(Obstacle::Door(Door { id, pos, state, blocks_line_of_sight_when_closed: blocks }))
        }
        "body" => Ok(Obstacle::Body(Body { id, pos })),
        other => Err(GridError::UnknownObstacleKind(other.to_string())),
    }
}

fn parse_door_state(s: &str) -> Result<DoorState, GridError> {
    match s.trim() {
        "open"   => Ok(DoorState::Open),
        "closed" => Ok(DoorState::Closed),
        "locked" => Ok(DoorState::Locked),
        other    => Err(GridError::UnknownDoorState(other.to_string())),
    }
}
