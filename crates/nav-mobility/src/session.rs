//! Per-actor movement session and patrol route.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use nav_core::GridPos;

use crate::door::PendingDoor;

/// In-flight movement: created when a move command is accepted, dropped on
/// arrival, cancellation or an exhausted re-path budget.
#[derive(Clone, Debug, PartialEq)]
pub struct MovementSession {
    /// Cells from the actor's position when the path was planned to
    /// `destination`, inclusive.
    pub path: Vec<GridPos>,
    /// Index into `path` of the cell the actor stands on.
    pub cursor: usize,
    /// Cell the command asked for.
    pub target: GridPos,
    /// Cell the path actually ends on (differs from `target` after fallback).
    pub destination: GridPos,
    /// Single overwriting slot for a command received mid-move.
    pub queued_target: Option<GridPos>,
    /// Time accumulated toward the next step.
    pub accumulated: Duration,
    pub repath_attempts: u32,
    /// Set after a blocked step until a re-path succeeds.
    pub needs_repath: bool,
    pub used_fallback: bool,
    /// Door action to run on arrival.
    pub pending_door: Option<PendingDoor>,
}

impl MovementSession {
    pub fn new(path: Vec<GridPos>, target: GridPos, used_fallback: bool) -> Self {
        let destination = path.last().copied().unwrap_or(target);
        Self {
            path,
            cursor: 0,
            target,
            destination,
            queued_target: None,
            accumulated: Duration::ZERO,
            repath_attempts: 0,
            needs_repath: false,
            used_fallback,
            pending_door: None,
        }
    }

    /// Cell after the current one, if any.
    #[inline]
    pub fn next_cell(&self) -> Option<GridPos> {
        self.path.get(self.cursor + 1).copied()
    }

    /// Steps left until `destination`.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.path.len().saturating_sub(self.cursor + 1)
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    /// Replace the path after a successful re-path.
    pub fn replan(&mut self, path: Vec<GridPos>, used_fallback: bool) {
        self.destination = path.last().copied().unwrap_or(self.destination);
        self.path = path;
        self.cursor = 0;
        self.needs_repath = false;
        self.used_fallback = used_fallback;
    }
}

/// Ordered waypoints an idle actor walks through.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatrolRoute {
    pub waypoints: Vec<GridPos>,
    /// Wrap back to the first waypoint after the last one.
    pub looping: bool,
}

impl PatrolRoute {
    pub fn new(waypoints: Vec<GridPos>, looping: bool) -> Self {
        Self { waypoints, looping }
    }

    /// Index of the waypoint after `index`, or `None` at the end of a
    /// non-looping route.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        if self.waypoints.is_empty() {
            return None;
        }
        let next = index + 1;
        if next < self.waypoints.len() {
            Some(next)
        } else if self.looping {
            Some(0)
        } else {
            None
        }
    }
}
