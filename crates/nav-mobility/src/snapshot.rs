//! Save/load contract for in-flight movement.
//!
//! Paths are not stored: import re-plans from the saved position toward the
//! saved target, since the world may have changed between save and load.

use serde::{Deserialize, Serialize};

use nav_core::{EntityId, GridPos, SimClock};
use nav_grid::DoorCredentials;

use crate::{MotionState, MovementStatus, PatrolRoute, PendingDoor};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub id: EntityId,
    pub position: GridPos,
    pub state: MotionState,
    pub status: MovementStatus,
    pub credentials: DoorCredentials,
    /// Target of the running session, if any.
    pub current_target: Option<GridPos>,
    /// Where the running session's path ends.
    pub destination: Option<GridPos>,
    pub queued_target: Option<GridPos>,
    pub pending_door: Option<PendingDoor>,
    pub repath_attempts: u32,
    pub patrol: Option<PatrolRoute>,
    pub patrol_index: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinatorSnapshot {
    pub clock: SimClock,
    pub actors: Vec<ActorSnapshot>,
}
