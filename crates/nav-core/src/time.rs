//! Frame-driven time model.
//!
//! # Design
//!
//! The engine is advanced once per rendered frame by an arbitrary wall-clock
//! delta.  `SimClock` records two things per advance:
//!
//!   frame   += 1
//!   elapsed += dt
//!
//! Movement is *not* tied to the frame counter: sessions accumulate `dt` and
//! step one cell each time a fixed per-cell duration is reached, so actors
//! move at the same speed at 30 or 144 frames per second.  The frame index
//! and elapsed time are stamped onto every emitted event.

use std::fmt;
use std::time::Duration;

// ── Frame ─────────────────────────────────────────────────────────────────────

/// Monotonic frame counter.  Frame 0 is "before the first update".
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Frame = Frame(0);

    /// Return the frame `n` updates after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Frame {
        Frame(self.0 + n)
    }
}

impl std::ops::Add<u64> for Frame {
    type Output = Frame;
    #[inline]
    fn add(self, rhs: u64) -> Frame {
        Frame(self.0 + rhs)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Current frame index plus total elapsed simulated time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Number of completed updates.
    pub frame: Frame,
    /// Sum of every `dt` passed to [`SimClock::advance`].
    pub elapsed: Duration,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame of length `dt`.
    #[inline]
    pub fn advance(&mut self, dt: Duration) {
        self.frame = self.frame + 1;
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Elapsed time in whole milliseconds, the timestamp unit carried by events.
    #[inline]
    pub fn timestamp_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{} ms)", self.frame, self.timestamp_ms())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration for the fixed-rate sim driver.
///
/// Interactive hosts call the coordinator with their own frame deltas and
/// never need this; it exists for headless runs, tests and demos.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Wall-clock length of one frame.  Default: 1/60 s.
    pub frame_duration: Duration,

    /// Total frames covered by a headless `Sim::run`.
    pub total_frames: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// The frame at which a run ends (exclusive upper bound).
    #[inline]
    pub fn end_frame(&self) -> Frame {
        Frame(self.total_frames)
    }

    /// Construct a zeroed `SimClock` for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new()
    }

    /// Total simulated time covered by a full run.
    pub fn run_duration(&self) -> Duration {
        self.frame_duration
            .saturating_mul(u32::try_from(self.total_frames).unwrap_or(u32::MAX))
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frame_duration: Duration::from_micros(16_667),
            total_frames:   600,
            seed:           0,
        }
    }
}
