//! Outward-facing status signals.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-actor movement status, as consumed by the presentation layer.
///
/// This is a superset of [`MotionState`](crate::MotionState): door outcomes
/// and path variants are reported here while the state machine itself only
/// tracks motion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MovementStatus {
    #[default]
    Idle,
    Moving,
    FallbackPath,
    Blocked,
    Repathing,
    RepathFailed,
    Arrived,
    Queued,
    Cancelled,
    DoorOpened,
    DoorClosed,
    DoorLocked,
    DoorAlreadyOpen,
    DoorAlreadyClosed,
    DoorNotLocked,
    DoorUnlockedKey,
    DoorUnlockedLockpick,
    DoorUnreachable,
    MovingToDoor,
}

impl MovementStatus {
    pub const ALL: [MovementStatus; 19] = [
        MovementStatus::Idle,
        MovementStatus::Moving,
        MovementStatus::FallbackPath,
        MovementStatus::Blocked,
        MovementStatus::Repathing,
        MovementStatus::RepathFailed,
        MovementStatus::Arrived,
        MovementStatus::Queued,
        MovementStatus::Cancelled,
        MovementStatus::DoorOpened,
        MovementStatus::DoorClosed,
        MovementStatus::DoorLocked,
        MovementStatus::DoorAlreadyOpen,
        MovementStatus::DoorAlreadyClosed,
        MovementStatus::DoorNotLocked,
        MovementStatus::DoorUnlockedKey,
        MovementStatus::DoorUnlockedLockpick,
        MovementStatus::DoorUnreachable,
        MovementStatus::MovingToDoor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MovementStatus::Idle                 => "idle",
            MovementStatus::Moving               => "moving",
            MovementStatus::FallbackPath         => "fallback-path",
            MovementStatus::Blocked              => "blocked",
            MovementStatus::Repathing            => "repathing",
            MovementStatus::RepathFailed         => "repath-failed",
            MovementStatus::Arrived              => "arrived",
            MovementStatus::Queued               => "queued",
            MovementStatus::Cancelled            => "cancelled",
            MovementStatus::DoorOpened           => "door-opened",
            MovementStatus::DoorClosed           => "door-closed",
            MovementStatus::DoorLocked           => "door-locked",
            MovementStatus::DoorAlreadyOpen      => "door-already-open",
            MovementStatus::DoorAlreadyClosed    => "door-already-closed",
            MovementStatus::DoorNotLocked        => "door-not-locked",
            MovementStatus::DoorUnlockedKey      => "door-unlocked-key",
            MovementStatus::DoorUnlockedLockpick => "door-unlocked-lockpick",
            MovementStatus::DoorUnreachable      => "door-unreachable",
            MovementStatus::MovingToDoor         => "moving-to-door",
        }
    }

    /// Door outcomes reported by the door protocol.
    pub fn is_door_outcome(self) -> bool {
        matches!(
            self,
            MovementStatus::DoorOpened
                | MovementStatus::DoorClosed
                | MovementStatus::DoorLocked
                | MovementStatus::DoorAlreadyOpen
                | MovementStatus::DoorAlreadyClosed
                | MovementStatus::DoorNotLocked
                | MovementStatus::DoorUnlockedKey
                | MovementStatus::DoorUnlockedLockpick
                | MovementStatus::DoorUnreachable
        )
    }
}

impl fmt::Display for MovementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a hover/preview path shown before a move is committed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathPreview {
    /// Nothing is being previewed.
    #[default]
    Idle,
    /// The target itself is reachable.
    Valid,
    /// No route, or the actor is already there.
    Invalid,
    /// Reachable only through a fallback goal near the target.
    Fallback,
}

impl PathPreview {
    pub fn as_str(self) -> &'static str {
        match self {
            PathPreview::Idle     => "idle",
            PathPreview::Valid    => "valid",
            PathPreview::Invalid  => "invalid",
            PathPreview::Fallback => "fallback",
        }
    }
}

impl fmt::Display for PathPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
