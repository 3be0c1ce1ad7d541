//! `nav-core` — foundational types for the `isonav` navigation engine.
//!
//! This crate is a dependency of every other `nav-*` crate.  It has no
//! `nav-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                 |
//! |-----------|----------------------------------------------------------|
//! | [`ids`]   | `EntityId`                                               |
//! | [`pos`]   | `GridPos`, Chebyshev/Manhattan distance, neighbor steps  |
//! | [`time`]  | `Frame`, `SimClock`, `SimConfig`                         |
//! | [`rng`]   | `ActorRng` (per-actor, seed-mixed)                       |
//! | [`error`] | `NavError`, `NavResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod pos;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{NavError, NavResult};
pub use ids::EntityId;
pub use pos::GridPos;
pub use rng::ActorRng;
pub use time::{Frame, SimClock, SimConfig};
