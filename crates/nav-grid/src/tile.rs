//! Per-position terrain record.

/// Cheapest allowed terrain cost; anything lower or non-finite becomes this.
pub const MIN_TERRAIN_COST: f64 = 1.0;

/// Terrain at one grid position.
///
/// Tiles are sparse: a position with no `Tile` is impassable and blocks
/// line of sight.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawTile"))]
pub struct Tile {
    pub walkable: bool,
    pub blocks_line_of_sight: bool,
    terrain_cost: f64,
}

impl Tile {
    /// Build a tile; a non-finite `terrain_cost` or one below 1 is clamped.
    pub fn new(walkable: bool, blocks_line_of_sight: bool, terrain_cost: f64) -> Self {
        Self {
            walkable,
            blocks_line_of_sight,
            terrain_cost: sanitize_cost(terrain_cost),
        }
    }

    /// Open, walkable, see-through floor with the minimum cost.
    pub fn floor() -> Self {
        Self::new(true, false, MIN_TERRAIN_COST)
    }

    /// Walkable floor that is more expensive to cross (mud, rubble, water).
    pub fn rough(terrain_cost: f64) -> Self {
        Self::new(true, false, terrain_cost)
    }

    /// Solid terrain: not walkable and opaque.
    pub fn solid() -> Self {
        Self::new(false, true, MIN_TERRAIN_COST)
    }

    #[inline]
    pub fn terrain_cost(&self) -> f64 {
        self.terrain_cost
    }
}

/// Wire form of [`Tile`]; deserialized costs go through [`Tile::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTile {
    walkable: bool,
    blocks_line_of_sight: bool,
    terrain_cost: f64,
}

#[cfg(feature = "serde")]
impl From<RawTile> for Tile {
    fn from(raw: RawTile) -> Self {
        Tile::new(raw.walkable, raw.blocks_line_of_sight, raw.terrain_cost)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::floor()
    }
}

/// Replace a non-finite cost, or one below [`MIN_TERRAIN_COST`], with
/// [`MIN_TERRAIN_COST`].  Keeping every step at least 1 keeps the search
/// heuristics admissible.
pub fn sanitize_cost(raw: f64) -> f64 {
    if raw.is_finite() && raw >= MIN_TERRAIN_COST {
        raw
    } else {
        MIN_TERRAIN_COST
    }
}
