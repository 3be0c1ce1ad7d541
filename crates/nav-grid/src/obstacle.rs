//! Static and stateful obstacles.

use nav_core::{EntityId, GridPos};

/// Lockpick skill required to open a locked door when no threshold is
/// configured on the grid.
pub const DEFAULT_LOCKPICK_THRESHOLD: u32 = 60;

/// Door state machine values.  Guards between states live in the door
/// protocol, not here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorState {
    Open,
    Closed,
    Locked,
}

impl DoorState {
    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, DoorState::Open)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DoorState::Open   => "open",
            DoorState::Closed => "closed",
            DoorState::Locked => "locked",
        }
    }
}

impl std::fmt::Display for DoorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Solid wall segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wall {
    pub id: EntityId,
    pub pos: GridPos,
    pub blocks_line_of_sight: bool,
}

/// Stateful door.  Walkable only while open.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Door {
    pub id: EntityId,
    pub pos: GridPos,
    pub state: DoorState,
    pub blocks_line_of_sight_when_closed: bool,
}

impl Door {
    /// Whether the door currently hides what lies behind it.
    #[inline]
    pub fn blocks_line_of_sight(&self) -> bool {
        self.blocks_line_of_sight_when_closed && !self.state.is_open()
    }
}

/// A body placed as an obstacle (corpse, crate, sleeping NPC).  Live actor
/// positions go through the occupancy map instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    pub id: EntityId,
    pub pos: GridPos,
}

/// Anything that can block a tile, keyed by a stable [`EntityId`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Obstacle {
    Wall(Wall),
    Door(Door),
    Body(Body),
}

impl Obstacle {
    pub fn wall(id: EntityId, pos: GridPos) -> Self {
        Obstacle::Wall(Wall { id, pos, blocks_line_of_sight: true })
    }

    pub fn door(id: EntityId, pos: GridPos, state: DoorState) -> Self {
        Obstacle::Door(Door { id, pos, state, blocks_line_of_sight_when_closed: true })
    }

    pub fn body(id: EntityId, pos: GridPos) -> Self {
        Obstacle::Body(Body { id, pos })
    }

    pub fn id(&self) -> EntityId {
        match self {
            Obstacle::Wall(w) => w.id,
            Obstacle::Door(d) => d.id,
            Obstacle::Body(b) => b.id,
        }
    }

    pub fn pos(&self) -> GridPos {
        match self {
            Obstacle::Wall(w) => w.pos,
            Obstacle::Door(d) => d.pos,
            Obstacle::Body(b) => b.pos,
        }
    }

    pub fn as_door(&self) -> Option<&Door> {
        match self {
            Obstacle::Door(d) => Some(d),
            Obstacle::Wall(_) | Obstacle::Body(_) => None,
        }
    }
}

/// What an actor brings to a locked door.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorCredentials {
    pub has_key: bool,
    pub lockpick_skill: Option<u32>,
}

impl DoorCredentials {
    pub fn key() -> Self {
        Self { has_key: true, lockpick_skill: None }
    }

    pub fn lockpick(skill: u32) -> Self {
        Self { has_key: false, lockpick_skill: Some(skill) }
    }

    /// `true` if these credentials defeat a lock at `threshold`.
    #[inline]
    pub fn unlocks(&self, threshold: u32) -> bool {
        self.has_key || self.lockpick_skill.is_some_and(|skill| skill >= threshold)
    }
}
