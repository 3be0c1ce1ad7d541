//! Actor intents: what a behavior asks the coordinator to do.

use nav_core::{EntityId, GridPos};
use nav_mobility::DoorAction;

/// A request produced by [`BehaviorModel::decide`][crate::BehaviorModel::decide]
/// and applied by the sim in ascending actor order.
///
/// Several intents may be returned at once; they are applied in order, so a
/// `MoveTo` followed by another `MoveTo` queues the second target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Walk to a cell (fallback goal resolution applies).
    MoveTo(GridPos),

    /// Approach a door and act on it.
    Door {
        door:   EntityId,
        action: DoorAction,
    },

    /// Stop and drop any queued target or patrol.
    Cancel,
}
