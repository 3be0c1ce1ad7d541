//! Search options.

use nav_core::{EntityId, GridPos};

/// Default cap on A* node expansions per search.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10_000;

/// Default radius of the fallback ring search around an unwalkable goal.
pub const DEFAULT_FALLBACK_RADIUS: u32 = 3;

/// Knobs for a single [`find_path`](crate::find_path) call.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathOptions {
    /// Allow the four diagonal steps.  Also selects the heuristic:
    /// Chebyshev when `true`, Manhattan when `false`.
    pub allow_diagonal: bool,

    /// Refuse a diagonal step unless both orthogonal corner cells are walkable.
    pub prevent_corner_cutting: bool,

    /// When the goal is unwalkable, retarget to the first walkable cell on a
    /// square ring around it.
    pub allow_target_fallback: bool,

    /// Largest ring (Chebyshev radius) tried by the fallback.
    pub max_fallback_radius: u32,

    /// Node expansions before the search gives up with an empty path.
    pub max_iterations: u32,

    /// Entity whose own body and occupancy never block this search.  Set to
    /// the mover so it is not blocked by the cell it stands on.
    pub ignore_body: Option<EntityId>,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            allow_diagonal:         true,
            prevent_corner_cutting: true,
            allow_target_fallback:  false,
            max_fallback_radius:    DEFAULT_FALLBACK_RADIUS,
            max_iterations:         DEFAULT_MAX_ITERATIONS,
            ignore_body:            None,
        }
    }
}

impl PathOptions {
    /// Enable or disable the fallback goal search.
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.allow_target_fallback = enabled;
        self
    }

    pub fn with_diagonal(mut self, enabled: bool) -> Self {
        self.allow_diagonal = enabled;
        self
    }

    pub fn ignoring(mut self, body: EntityId) -> Self {
        self.ignore_body = Some(body);
        self
    }

    /// Admissible distance estimate for the configured move set.
    #[inline]
    pub fn heuristic(&self, from: GridPos, to: GridPos) -> f64 {
        if self.allow_diagonal {
            f64::from(from.chebyshev(to))
        } else {
            f64::from(from.manhattan(to))
        }
    }
}
