//! Discrete movement events for animation and effects.
//!
//! Events are appended to a caller-supplied `Vec` so hosts can reuse one
//! buffer per frame.

use serde::{Deserialize, Serialize};

use nav_core::{EntityId, Frame, GridPos, SimClock};

use crate::{MoveFailure, MovementStatus};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovementEvent {
    /// Actor the event is about.
    pub source: EntityId,
    pub frame: Frame,
    /// Milliseconds of simulated time since the coordinator started.
    pub timestamp_ms: u64,
    pub kind: EventKind,
}

impl MovementEvent {
    pub fn new(source: EntityId, clock: &SimClock, kind: EventKind) -> Self {
        Self {
            source,
            frame: clock.frame,
            timestamp_ms: clock.timestamp_ms(),
            kind,
        }
    }

    /// Wire name of the event kind.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A session started toward `destination`.
    MoveStarted {
        target: GridPos,
        destination: GridPos,
        steps: usize,
        used_fallback: bool,
    },
    /// The actor entered a new cell.
    StepReached {
        from: GridPos,
        to: GridPos,
        remaining: usize,
    },
    /// A command or a step could not proceed.  `cell` is the cell that
    /// refused entry, absent when a command found no path at all.
    Blocked {
        at: GridPos,
        cell: Option<GridPos>,
        failure: Option<MoveFailure>,
    },
    RepathStarted {
        attempt: u32,
        max_attempts: u32,
    },
    RepathFailed {
        failure: MoveFailure,
    },
    StatusChanged {
        status: MovementStatus,
        failure: Option<MoveFailure>,
    },
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::MoveStarted { .. }   => "move_started",
            EventKind::StepReached { .. }   => "step_reached",
            EventKind::Blocked { .. }       => "blocked",
            EventKind::RepathStarted { .. } => "repath_started",
            EventKind::RepathFailed { .. }  => "repath_failed",
            EventKind::StatusChanged { .. } => "status_changed",
        }
    }
}
