//! Simulation observer trait for progress reporting and event collection.

use nav_core::SimClock;
use nav_mobility::MovementEvent;

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] and
/// [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called at the very start of each frame, before behaviors run.
    fn on_frame_start(&mut self, _clock: &SimClock) {}

    /// Every event emitted during the frame, in emission order.  Not called
    /// for frames without events.
    fn on_events(&mut self, _clock: &SimClock, _events: &[MovementEvent]) {}

    /// Called at the end of each frame.  `decided` is the number of actors
    /// whose behavior produced at least one intent.
    fn on_frame_end(&mut self, _clock: &SimClock, _decided: usize) {}

    /// Called once after the final frame of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _clock: &SimClock) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Collects every event, e.g. for assertions or a JSON dump.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<MovementEvent>,
    pub frames: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events of one kind, by wire name (`"step_reached"`, ...).
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MovementEvent> + 'a {
        self.events.iter().filter(move |e| e.name() == name)
    }
}

impl SimObserver for EventLog {
    fn on_events(&mut self, _clock: &SimClock, events: &[MovementEvent]) {
        self.events.extend_from_slice(events);
    }

    fn on_frame_end(&mut self, _clock: &SimClock, _decided: usize) {
        self.frames += 1;
    }
}
