//! Per-actor record owned by the coordinator.

use nav_core::{EntityId, GridPos};
use nav_grid::DoorCredentials;

use crate::{MotionState, MoveFailure, MovementSession, MovementStatus, PatrolRoute};

#[derive(Clone, Debug)]
pub struct Actor {
    pub(crate) id:           EntityId,
    pub(crate) position:     GridPos,
    pub(crate) state:        MotionState,
    pub(crate) status:       MovementStatus,
    pub(crate) credentials:  DoorCredentials,
    pub(crate) session:      Option<MovementSession>,
    pub(crate) patrol:       Option<PatrolRoute>,
    pub(crate) patrol_index: usize,
    pub(crate) last_failure: Option<MoveFailure>,
}

impl Actor {
    pub(crate) fn new(id: EntityId, position: GridPos, credentials: DoorCredentials) -> Self {
        Self {
            id,
            position,
            state: MotionState::Idle,
            status: MovementStatus::Idle,
            credentials,
            session: None,
            patrol: None,
            patrol_index: 0,
            last_failure: None,
        }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> GridPos {
        self.position
    }

    #[inline]
    pub fn state(&self) -> MotionState {
        self.state
    }

    #[inline]
    pub fn status(&self) -> MovementStatus {
        self.status
    }

    pub fn credentials(&self) -> DoorCredentials {
        self.credentials
    }

    pub fn session(&self) -> Option<&MovementSession> {
        self.session.as_ref()
    }

    pub fn patrol(&self) -> Option<&PatrolRoute> {
        self.patrol.as_ref()
    }

    pub fn patrol_index(&self) -> usize {
        self.patrol_index
    }

    /// Most recent failure, kept until the next one replaces it.
    pub fn last_failure(&self) -> Option<MoveFailure> {
        self.last_failure
    }

    /// `true` while a movement session is running.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.session.is_some()
    }
}
