//! Coordinator error type and movement failure outcomes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use nav_core::{EntityId, GridPos, NavError};

/// Input the coordinator refuses.  Every other problem during movement is a
/// [`MoveFailure`] reported through status and events.
#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("actor {0} is not registered")]
    UnknownActor(EntityId),

    #[error("door {0} does not exist")]
    UnknownDoor(EntityId),

    #[error("cannot place actor {actor} on blocked cell {pos}")]
    SpawnBlocked { actor: EntityId, pos: GridPos },

    #[error("movement configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Nav(#[from] NavError),
}

pub type MobilityResult<T> = Result<T, MobilityError>;

/// Why a movement did not complete.  Carried in events and kept on the actor;
/// never returned as `Err`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveFailure {
    #[error("no route to {target}")]
    Unreachable { target: GridPos },

    #[error("still blocked after {attempts} re-path attempts")]
    RepathExhausted { attempts: u32 },

    #[error("door {door} is locked")]
    LockDenied { door: EntityId },
}
