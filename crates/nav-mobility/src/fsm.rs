//! Movement state machine.
//!
//! ```text
//!            PathAccepted              ReachedGoal
//!   Idle ───────────────▶ Moving ─────────────────▶ Arrived
//!    │                    │  ▲ │                       │
//!    │ PathRejected       │  │ │ CommandQueued         │ PathAccepted
//!    ▼                    │  │ ▼                       ▼
//!  Blocked    StepBlocked │  │ Queued ── ReachedGoal ▶ Arrived ─▶ Moving
//!                         ▼  │ RepathSucceeded
//!                     Repathing ── RepathExhausted ──▶ RepathFailed
//!
//!   any active state ── Cancel ──▶ Cancelled          (Idle ── Cancel ──▶ Idle)
//! ```
//!
//! Every transition not listed in [`transition`] is rejected; the
//! coordinator logs and ignores it.

use serde::{Deserialize, Serialize};

use crate::MovementStatus;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionState {
    #[default]
    Idle,
    Moving,
    Queued,
    Repathing,
    Arrived,
    Blocked,
    RepathFailed,
    Cancelled,
}

impl MotionState {
    /// `true` while a movement session exists.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, MotionState::Moving | MotionState::Queued | MotionState::Repathing)
    }

    /// The status reported when nothing more specific applies.
    pub fn default_status(self) -> MovementStatus {
        match self {
            MotionState::Idle         => MovementStatus::Idle,
            MotionState::Moving       => MovementStatus::Moving,
            MotionState::Queued       => MovementStatus::Queued,
            MotionState::Repathing    => MovementStatus::Repathing,
            MotionState::Arrived      => MovementStatus::Arrived,
            MotionState::Blocked      => MovementStatus::Blocked,
            MotionState::RepathFailed => MovementStatus::RepathFailed,
            MotionState::Cancelled    => MovementStatus::Cancelled,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MotionInput {
    /// A search returned a path with at least one step.
    PathAccepted,
    /// A move command produced no usable path.
    PathRejected,
    /// A command arrived while a session was running.
    CommandQueued,
    /// The next cell was unwalkable or reserved.
    StepBlocked,
    RepathSucceeded,
    RepathExhausted,
    ReachedGoal,
    Cancel,
}

/// The transition table.  `None` means the input is not valid in `state`.
pub fn transition(state: MotionState, input: MotionInput) -> Option<MotionState> {
    use MotionInput as I;
    use MotionState as S;

    match (state, input) {
        (S::Idle | S::Arrived | S::Blocked | S::RepathFailed | S::Cancelled, I::PathAccepted) => {
            Some(S::Moving)
        }
        (S::Idle | S::Arrived | S::Blocked | S::RepathFailed | S::Cancelled, I::PathRejected) => {
            Some(S::Blocked)
        }

        (S::Moving | S::Queued | S::Repathing, I::CommandQueued) => Some(S::Queued),

        (S::Moving | S::Queued | S::Repathing, I::StepBlocked) => Some(S::Repathing),
        (S::Repathing, I::RepathSucceeded) => Some(S::Moving),
        (S::Repathing, I::RepathExhausted) => Some(S::RepathFailed),

        (S::Moving | S::Queued | S::Repathing, I::ReachedGoal) => Some(S::Arrived),

        (S::Idle, I::Cancel) => Some(S::Idle),
        (_, I::Cancel) => Some(S::Cancelled),

        _ => None,
    }
}
