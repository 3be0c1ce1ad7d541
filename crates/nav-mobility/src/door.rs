//! Door interaction protocol.
//!
//! Acting on a door needs the actor on one of the eight cells around it.
//! A far-away actor is first walked to the nearest reachable neighbor (see
//! `Coordinator::interact_door`) and the action is stored as a
//! [`PendingDoor`] that runs on arrival.
//!
//! | Action     | open                | closed              | locked                         |
//! |------------|---------------------|---------------------|--------------------------------|
//! | `Open`     | `door-already-open` | → open              | `door-locked`                  |
//! | `Close`    | → closed ¹          | `door-already-closed` | `door-already-closed`        |
//! | `UseKey`   | `door-not-locked`   | `door-not-locked`   | → closed if key, else `door-locked` |
//! | `Lockpick` | `door-not-locked`   | `door-not-locked`   | → closed if skill ≥ threshold, else `door-locked` |
//!
//! ¹ refused with `blocked` while someone stands in the doorway.
//!
//! Unlocking leaves the door shut; opening it is a separate action.

use serde::{Deserialize, Serialize};
use tracing::debug;

use nav_core::EntityId;
use nav_grid::{DoorCredentials, DoorState, GridModel};

use crate::{MoveFailure, MovementStatus};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorAction {
    Open,
    Close,
    UseKey,
    Lockpick,
}

/// A door action deferred until the actor reaches the door.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDoor {
    pub door: EntityId,
    pub action: DoorAction,
}

/// Outcome of one door action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DoorOutcome {
    pub status: MovementStatus,
    pub failure: Option<MoveFailure>,
}

impl DoorOutcome {
    fn ok(status: MovementStatus) -> Self {
        Self { status, failure: None }
    }

    fn locked(door: EntityId) -> Self {
        Self {
            status: MovementStatus::DoorLocked,
            failure: Some(MoveFailure::LockDenied { door }),
        }
    }
}

/// Apply `action` to `door` right now.  Adjacency is the caller's concern.
///
/// Returns `None` if `door` is not a door on `grid`.
pub fn apply_door_action(
    grid: &mut GridModel,
    door: EntityId,
    action: DoorAction,
    credentials: DoorCredentials,
) -> Option<DoorOutcome> {
    let (state, pos) = grid.door(door).map(|d| (d.state, d.pos))?;

    let outcome = match (action, state) {
        (DoorAction::Open, DoorState::Open) => DoorOutcome::ok(MovementStatus::DoorAlreadyOpen),
        (DoorAction::Open, DoorState::Locked) => DoorOutcome::locked(door),
        (DoorAction::Open, DoorState::Closed) => {
            grid.set_door_state(door, DoorState::Open);
            DoorOutcome::ok(MovementStatus::DoorOpened)
        }

        (DoorAction::Close, DoorState::Closed | DoorState::Locked) => {
            DoorOutcome::ok(MovementStatus::DoorAlreadyClosed)
        }
        (DoorAction::Close, DoorState::Open) => {
            if grid.is_occupied(pos) {
                DoorOutcome::ok(MovementStatus::Blocked)
            } else {
                grid.set_door_state(door, DoorState::Closed);
                DoorOutcome::ok(MovementStatus::DoorClosed)
            }
        }

        (DoorAction::UseKey | DoorAction::Lockpick, DoorState::Open | DoorState::Closed) => {
            DoorOutcome::ok(MovementStatus::DoorNotLocked)
        }
        (DoorAction::UseKey, DoorState::Locked) => {
            let attempt = DoorCredentials { has_key: credentials.has_key, lockpick_skill: None };
            unlock(grid, door, attempt, MovementStatus::DoorUnlockedKey)
        }
        (DoorAction::Lockpick, DoorState::Locked) => {
            let attempt = DoorCredentials { has_key: false, lockpick_skill: credentials.lockpick_skill };
            unlock(grid, door, attempt, MovementStatus::DoorUnlockedLockpick)
        }
    };

    debug!(%door, ?action, status = %outcome.status, "door action");
    Some(outcome)
}

fn unlock(
    grid: &mut GridModel,
    door: EntityId,
    attempt: DoorCredentials,
    success: MovementStatus,
) -> DoorOutcome {
    if grid.try_open_door(door, attempt) {
        grid.set_door_state(door, DoorState::Closed);
        DoorOutcome::ok(success)
    } else {
        DoorOutcome::locked(door)
    }
}
