//! Integer grid coordinates.
//!
//! `GridPos` is the only spatial type in the engine.  Coordinates are signed
//! so worlds may extend into negative space; the grid itself is sparse, so
//! there is no implicit `[0, width)` bound.

use std::fmt;

/// Orthogonal unit steps in scan order: north, east, south, west.
pub const ORTHOGONAL_STEPS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Diagonal unit steps: north-east, south-east, south-west, north-west.
pub const DIAGONAL_STEPS: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// A tile coordinate on the navigation grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Canonical integer key: `x` in the high 32 bits, `y` in the low 32.
    ///
    /// Unique for every `(x, y)` pair, so it can stand in for the position in
    /// foreign-keyed stores.
    #[inline]
    pub fn key(self) -> i64 {
        ((self.x as i64) << 32) | (self.y as u32 as i64)
    }

    /// Inverse of [`GridPos::key`].
    #[inline]
    pub fn from_key(key: i64) -> Self {
        Self {
            x: (key >> 32) as i32,
            y: key as u32 as i32,
        }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Chebyshev (king-move) distance.
    #[inline]
    pub fn chebyshev(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Manhattan (rook-move) distance.
    #[inline]
    pub fn manhattan(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// `true` when `other` is one of the eight cells surrounding `self`.
    /// A cell is not adjacent to itself.
    #[inline]
    pub fn is_adjacent(self, other: GridPos) -> bool {
        self.chebyshev(other) == 1
    }

    /// `true` when the step `self → other` changes both axes.
    #[inline]
    pub fn is_diagonal_step(self, other: GridPos) -> bool {
        self.x != other.x && self.y != other.y
    }

    /// The four orthogonal neighbors in [`ORTHOGONAL_STEPS`] order.
    pub fn neighbors4(self) -> impl Iterator<Item = GridPos> {
        ORTHOGONAL_STEPS.into_iter().map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// All eight neighbors: orthogonal first, then diagonal.
    pub fn neighbors8(self) -> impl Iterator<Item = GridPos> {
        ORTHOGONAL_STEPS
            .into_iter()
            .chain(DIAGONAL_STEPS)
            .map(move |(dx, dy)| self.offset(dx, dy))
    }
}

impl From<(i32, i32)> for GridPos {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Canonical string key `"x,y"`.
impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
