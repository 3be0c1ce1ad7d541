//! ASCII map layouts.
//!
//! One character per cell, one line per row; row `n` of the text is `y = n`
//! and column `m` is `x = m`.
//!
//! | Glyph   | Cell                                               |
//! |---------|----------------------------------------------------|
//! | `.`     | floor                                              |
//! | `~`     | rough floor, terrain cost [`ROUGH_TERRAIN_COST`]   |
//! | `#`     | floor tile under a wall                            |
//! | `%`     | floor tile under a window (wall, does not block sight) |
//! | `D`     | floor tile under a closed door                     |
//! | `L`     | floor tile under a locked door                     |
//! | `O`     | floor tile under an open door                      |
//! | space   | no tile                                            |
//!
//! Obstacles receive consecutive ids starting at `first_id`, in row-major
//! order, so a layout always produces the same ids.
//!
//! ```text
//! #####
//! #..~#
//! #.#.#
//! #.D.#
//! #####
//! ```

use nav_core::{EntityId, GridPos};

use crate::GridError;
use crate::grid::GridModel;
use crate::obstacle::{DoorState, Obstacle, Wall};
use crate::tile::Tile;

/// Terrain cost assigned to `~` cells.
pub const ROUGH_TERRAIN_COST: f64 = 3.0;

/// Parse an ASCII layout into a fresh [`GridModel`].
pub fn parse_ascii_layout(text: &str, first_id: EntityId) -> Result<GridModel, GridError> {
    let mut grid = GridModel::new();
    let mut next_id = first_id.0;

    for (row, line) in text.lines().enumerate() {
        for (column, glyph) in line.chars().enumerate() {
            let pos = GridPos::new(column as i32, row as i32);
            let obstacle_kind: Option<fn(EntityId, GridPos) -> Obstacle> = match glyph {
                ' ' => continue,
                '.' => None,
                '~' => {
                    grid.set_tile(pos, Tile::rough(ROUGH_TERRAIN_COST));
                    continue;
                }
                '#' => Some(Obstacle::wall),
                '%' => Some(|id, pos| Obstacle::Wall(Wall { id, pos, blocks_line_of_sight: false })),
                'D' => Some(|id, pos| Obstacle::door(id, pos, DoorState::Closed)),
                'L' => Some(|id, pos| Obstacle::door(id, pos, DoorState::Locked)),
                'O' => Some(|id, pos| Obstacle::door(id, pos, DoorState::Open)),
                other => return Err(GridError::Layout { row, column, glyph: other }),
            };

            grid.set_tile(pos, Tile::floor());
            if let Some(make) = obstacle_kind {
                grid.set_obstacle(make(EntityId(next_id), pos));
                next_id += 1;
            }
        }
    }
    Ok(grid)
}
