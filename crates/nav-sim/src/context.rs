//! Read-only world view passed to every behavior call.

use nav_core::SimClock;
use nav_grid::GridModel;

/// Snapshot shared by all [`BehaviorModel`][crate::BehaviorModel] calls in
/// one frame's decide phase.
///
/// The grid is borrowed immutably: behaviors observe the world, and every
/// change goes through an [`Intent`][crate::Intent] applied afterwards.
pub struct BehaviorContext<'a> {
    /// Clock as of the end of the previous frame.
    pub clock: SimClock,

    pub grid: &'a GridModel,
}

impl<'a> BehaviorContext<'a> {
    #[inline]
    pub fn new(clock: SimClock, grid: &'a GridModel) -> Self {
        Self { clock, grid }
    }
}
