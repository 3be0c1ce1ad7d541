//! `nav-mobility` — frame-driven movement over a `nav-grid` world.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`coordinator`] | `Coordinator<P>`: commands, per-frame update, snapshots    |
//! | [`actor`]       | `Actor`: position, state, status, session, patrol          |
//! | [`session`]     | `MovementSession`, `PatrolRoute`                           |
//! | [`fsm`]         | `MotionState`, `MotionInput`, `transition` table           |
//! | [`status`]      | `MovementStatus`, `PathPreview` signal vocabularies        |
//! | [`door`]        | `DoorAction`, `PendingDoor`, `apply_door_action`           |
//! | [`reservation`] | `ReservationTable`                                         |
//! | [`event`]       | `MovementEvent`, `EventKind`                               |
//! | [`snapshot`]    | `ActorSnapshot`, `CoordinatorSnapshot`                     |
//! | [`config`]      | `MovementConfig`                                           |
//! | [`error`]       | `MobilityError`, `MobilityResult<T>`, `MoveFailure`        |
//!
//! # Movement model
//!
//! 1. `Coordinator::move_to` searches with fallback enabled and opens a
//!    session, or reports `blocked` when the path has no steps.
//! 2. `Coordinator::update` accumulates frame time; every `step_duration`
//!    the actor advances one cell, so speed is independent of frame rate.
//! 3. A blocked step re-paths from the current cell toward the original
//!    target, at most `max_repath_attempts` times per session.
//! 4. Arrival runs a pending door action, then a queued target, then the
//!    next patrol waypoint.

pub mod actor;
pub mod config;
pub mod coordinator;
pub mod door;
pub mod error;
pub mod event;
pub mod fsm;
pub mod reservation;
pub mod session;
pub mod snapshot;
pub mod status;


pub use actor::Actor;
pub use config::{DEFAULT_MAX_REPATH_ATTEMPTS, DEFAULT_STEP_DURATION, MovementConfig};
pub use coordinator::Coordinator;
pub use door::{DoorAction, DoorOutcome, PendingDoor, apply_door_action};
pub use error::{MobilityError, MobilityResult, MoveFailure};
pub use event::{EventKind, MovementEvent};
pub use fsm::{MotionInput, MotionState, transition};
pub use reservation::ReservationTable;
pub use session::{MovementSession, PatrolRoute};
pub use snapshot::{ActorSnapshot, CoordinatorSnapshot};
pub use status::{MovementStatus, PathPreview};
