//! `nav-sim` — headless frame driver for the isonav engine.
//!
//! # Frame loop
//!
//! ```text
//! for frame in 0..config.total_frames:
//!   ① Decide  : BehaviorModel::decide for every actor without a session.
//!   ② Apply   : for each actor's intents in ascending EntityId order:
//!                 MoveTo(cell)          → Coordinator::move_to
//!                 Door { door, action } → Coordinator::interact_door
//!                 Cancel                → Coordinator::cancel
//!   ③ Update  : Coordinator::update(grid, frame_duration); events go to the
//!               observer.
//! ```
//!
//! Interactive hosts usually skip this crate and call the coordinator with
//! their own frame deltas; `Sim` is for tests, demos and batch runs.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`sim`]      | `Sim<B, P>`: `step`, `run`, `run_frames`                 |
//! | [`builder`]  | `SimBuilder`                                             |
//! | [`observer`] | `SimObserver`, `NoopObserver`, `EventLog`                |
//! | [`model`]    | `BehaviorModel` trait                                    |
//! | [`intent`]   | `Intent` (`MoveTo`, `Door`, `Cancel`)                    |
//! | [`context`]  | `BehaviorContext<'a>`: clock + read-only grid            |
//! | [`noop`]     | `NoopBehavior`                                           |
//! | [`wander`]   | `WanderBehavior`: seeded random walk                     |
//! | [`error`]    | `SimError`, `SimResult<T>`                               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nav_core::{EntityId, GridPos, SimConfig};
//! use nav_grid::parse_ascii_layout;
//! use nav_path::AStarPathfinder;
//! use nav_sim::{NoopObserver, SimBuilder, WanderBehavior};
//!
//! let grid = parse_ascii_layout("......\n......", EntityId(1000))?;
//! let mut sim = SimBuilder::new(SimConfig::default(), grid, WanderBehavior::default(), AStarPathfinder)
//!     .actor(EntityId(1), GridPos::new(0, 0))
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod intent;
pub mod model;
pub mod noop;
pub mod observer;
pub mod sim;
pub mod wander;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use context::BehaviorContext;
pub use error::{SimError, SimResult};
pub use intent::Intent;
pub use model::BehaviorModel;
pub use noop::NoopBehavior;
pub use observer::{EventLog, NoopObserver, SimObserver};
pub use sim::Sim;
pub use wander::WanderBehavior;
