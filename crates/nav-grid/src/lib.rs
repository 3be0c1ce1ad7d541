//! `nav-grid` — tile, obstacle and occupancy model.
//!
//! Owns everything the pathfinder and movement coordinator ask about a cell:
//! can an actor stand here, what does it cost to enter, does it block sight,
//! is there a door and in what state.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`tile`]     | `Tile`, terrain-cost clamping                             |
//! | [`obstacle`] | `Obstacle` (`Wall`/`Door`/`Body`), `DoorState`, `DoorCredentials` |
//! | [`grid`]     | `GridModel`: storage, door transitions, walkability, sight |
//! | [`query`]    | `NavGrid` trait consumed by `nav-path`                    |
//! | [`sight`]    | Bresenham `line_between`                                  |
//! | [`layout`]   | `parse_ascii_layout`                                      |
//! | [`loader`]   | `load_tiles_reader`, `load_obstacles_reader` (CSV)        |
//! | [`error`]    | `GridError`, `GridResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on tiles and obstacles.    |

pub mod error;
pub mod grid;
pub mod layout;
pub mod loader;
pub mod obstacle;
pub mod query;
pub mod sight;
pub mod tile;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use grid::GridModel;
pub use layout::parse_ascii_layout;
pub use loader::{load_obstacles_csv, load_obstacles_reader, load_tiles_csv, load_tiles_reader};
pub use obstacle::{Body, DEFAULT_LOCKPICK_THRESHOLD, Door, DoorCredentials, DoorState, Obstacle, Wall};
pub use query::NavGrid;
pub use tile::{MIN_TERRAIN_COST, Tile};
