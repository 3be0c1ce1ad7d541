//! Search output.

use nav_core::GridPos;

/// Outcome of one search.
///
/// `path` runs from the start to `resolved_goal` inclusive.  An empty path
/// means no route; `resolved_goal` is then `None` as well.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub path: Vec<GridPos>,
    pub resolved_goal: Option<GridPos>,
    /// `true` when the requested goal was unwalkable and a ring cell was used.
    pub used_fallback: bool,
    /// Sum of edge costs along `path`.
    pub cost: f64,
}

impl PathResult {
    /// No route.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of cells in the path, start included.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Number of moves needed to walk the path.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// `true` if walking the path actually moves the actor.
    pub fn is_movable(&self) -> bool {
        self.path.len() > 1
    }
}
