//! `nav-path` — deterministic grid search.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`astar`]    | `Pathfinder` trait, `AStarPathfinder`, `find_path`        |
//! | [`fallback`] | Ring search for a walkable substitute goal                |
//! | [`options`]  | `PathOptions` and its defaults                            |
//! | [`result`]   | `PathResult`                                              |
//!
//! The search reads the world only through [`nav_grid::NavGrid`] and never
//! writes to it.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on options and results.    |

pub mod astar;
pub mod fallback;
pub mod options;
pub mod result;


pub use astar::{AStarPathfinder, Pathfinder, find_path};
pub use options::{DEFAULT_FALLBACK_RADIUS, DEFAULT_MAX_ITERATIONS, PathOptions};
pub use result::PathResult;
