//! Coordinator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use nav_path::PathOptions;

use crate::MobilityError;

/// Default time an actor spends crossing one cell.
pub const DEFAULT_STEP_DURATION: Duration = Duration::from_millis(150);

/// Default re-path budget per movement session.
pub const DEFAULT_MAX_REPATH_ATTEMPTS: u32 = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Time per cell, independent of frame rate and of diagonal vs
    /// orthogonal steps.
    pub step_duration: Duration,

    /// Re-path attempts allowed before a blocked session is abandoned.
    pub max_repath_attempts: u32,

    /// Base options for every search the coordinator issues.  Fallback is
    /// forced on for move commands and off for door-approach searches; the
    /// mover's own id is always ignored.
    pub path_options: PathOptions,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            step_duration:       DEFAULT_STEP_DURATION,
            max_repath_attempts: DEFAULT_MAX_REPATH_ATTEMPTS,
            path_options:        PathOptions::default(),
        }
    }
}

impl MovementConfig {
    pub fn validate(&self) -> Result<(), MobilityError> {
        if self.step_duration.is_zero() {
            return Err(MobilityError::Config("step_duration must be non-zero".into()));
        }
        if self.path_options.max_iterations == 0 {
            return Err(MobilityError::Config("path_options.max_iterations must be non-zero".into()));
        }
        Ok(())
    }
}
