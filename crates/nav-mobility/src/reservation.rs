//! Short-lived tile claims.
//!
//! An actor claims the cell it is about to enter, moves onto it and releases
//! the claim as soon as its own position has been updated.  Anyone who
//! checks the cell while the claim is held treats their step as blocked.

use rustc_hash::FxHashMap;

use nav_core::{EntityId, GridPos};

#[derive(Clone, Debug, Default)]
pub struct ReservationTable {
    claims: FxHashMap<GridPos, EntityId>,
}

impl ReservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `pos` for `actor`.  Returns `false` if another actor holds it.
    /// Re-claiming one's own cell succeeds.
    pub fn reserve(&mut self, pos: GridPos, actor: EntityId) -> bool {
        match self.claims.get(&pos) {
            Some(&holder) if holder != actor => false,
            _ => {
                self.claims.insert(pos, actor);
                true
            }
        }
    }

    /// `true` if someone other than `actor` holds `pos`.
    #[inline]
    pub fn is_reserved_by_other(&self, pos: GridPos, actor: EntityId) -> bool {
        self.claims.get(&pos).is_some_and(|&holder| holder != actor)
    }

    #[inline]
    pub fn holder(&self, pos: GridPos) -> Option<EntityId> {
        self.claims.get(&pos).copied()
    }

    /// Release `pos` if `actor` holds it.
    pub fn release(&mut self, pos: GridPos, actor: EntityId) {
        if self.claims.get(&pos) == Some(&actor) {
            self.claims.remove(&pos);
        }
    }

    /// Drop every claim held by `actor`.
    pub fn release_all(&mut self, actor: EntityId) {
        self.claims.retain(|_, holder| *holder != actor);
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn clear(&mut self) {
        self.claims.clear();
    }
}
