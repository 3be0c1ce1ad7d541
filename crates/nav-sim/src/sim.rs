//! The `Sim` struct and its frame loop.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, info};

use nav_core::{ActorRng, EntityId, GridPos, SimClock, SimConfig};
use nav_grid::{DoorCredentials, GridModel};
use nav_mobility::{Coordinator, MovementEvent};
use nav_path::Pathfinder;

use crate::{BehaviorContext, BehaviorModel, Intent, SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// Headless runner that owns a grid, a coordinator and a behavior model.
///
/// Each [`step`](Sim::step) runs three phases:
///
/// 1. **Decide**: call [`BehaviorModel::decide`] for every actor without a
///    running session.  Read-only over the grid and coordinator.
/// 2. **Apply** (ascending `EntityId`): `MoveTo` → `move_to`, `Door` →
///    `interact_door`, `Cancel` → `cancel`.
/// 3. **Update**: advance the coordinator by `dt`, then hand the frame's
///    events to the observer.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: BehaviorModel, P: Pathfinder> {
    /// Frame length, run length and master seed.
    pub config: SimConfig,

    /// The world.  Hosts may edit it between steps (e.g. drop a body
    /// obstacle); the coordinator re-paths around changes.
    pub grid: GridModel,

    pub coordinator: Coordinator<P>,

    pub behavior: B,

    /// Per-actor deterministic RNGs, kept apart from the coordinator for the
    /// split borrow in the decide phase.
    pub rngs: BTreeMap<EntityId, ActorRng>,

    /// Events emitted outside `step` (spawns, patrol setup) waiting to be
    /// delivered with the next frame's batch.
    pub(crate) pending: Vec<MovementEvent>,
}

impl<B: BehaviorModel, P: Pathfinder> Sim<B, P> {
    // ── Public API ────────────────────────────────────────────────────────

    #[inline]
    pub fn clock(&self) -> &SimClock {
        self.coordinator.clock()
    }

    /// Register a new actor mid-run.  Its RNG is derived from the run seed.
    pub fn spawn(&mut self, id: EntityId, pos: GridPos, credentials: DoorCredentials) -> SimResult<()> {
        self.coordinator.spawn(id, pos, credentials, &mut self.grid)?;
        self.rngs.insert(id, ActorRng::new(self.config.seed, id));
        Ok(())
    }

    /// Run from the current frame to `config.end_frame()`, one
    /// `config.frame_duration` at a time.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self.config.end_frame();
        info!(
            actors = self.coordinator.actor_count(),
            from = %self.clock().frame,
            to = %end,
            "sim run started"
        );
        while self.clock().frame < end {
            self.step(self.config.frame_duration, observer)?;
        }
        observer.on_sim_end(self.clock());
        info!(clock = %self.clock(), "sim run finished");
        Ok(())
    }

    /// Run exactly `n` frames of `config.frame_duration` (ignores
    /// `total_frames`).
    pub fn run_frames<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(self.config.frame_duration, observer)?;
        }
        Ok(())
    }

    /// Advance one frame of length `dt`.  Returns how many actors produced
    /// intents.
    pub fn step<O: SimObserver>(&mut self, dt: Duration, observer: &mut O) -> SimResult<usize> {
        observer.on_frame_start(self.clock());

        let intents = self.decide();
        let decided = intents.len();
        for (actor, actor_intents) in intents {
            self.apply_intents(actor, actor_intents)?;
        }

        let mut events = std::mem::take(&mut self.pending);
        self.coordinator.update(&mut self.grid, dt, &mut events);

        let clock = *self.clock();
        if !events.is_empty() {
            observer.on_events(&clock, &events);
        }
        observer.on_frame_end(&clock, decided);
        Ok(decided)
    }

    // ── Phases ────────────────────────────────────────────────────────────

    fn decide(&mut self) -> Vec<(EntityId, Vec<Intent>)> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let behavior = &self.behavior;
        let rngs = &mut self.rngs;
        let seed = self.config.seed;
        let ctx = BehaviorContext::new(*self.coordinator.clock(), &self.grid);

        let mut out = Vec::new();
        for actor in self.coordinator.actors() {
            if actor.is_moving() {
                continue;
            }
            let rng = rngs
                .entry(actor.id())
                .or_insert_with(|| ActorRng::new(seed, actor.id()));
            let intents = behavior.decide(actor, &ctx, rng);
            if !intents.is_empty() {
                out.push((actor.id(), intents));
            }
        }
        out
    }

    fn apply_intents(&mut self, actor: EntityId, intents: Vec<Intent>) -> SimResult<()> {
        for intent in intents {
            let status = match intent {
                Intent::MoveTo(target) => {
                    self.coordinator.move_to(actor, target, &mut self.grid, &mut self.pending)?
                }
                Intent::Door { door, action } => self.coordinator.interact_door(
                    actor,
                    door,
                    action,
                    &mut self.grid,
                    &mut self.pending,
                )?,
                Intent::Cancel => self.coordinator.cancel(actor, &mut self.pending)?,
            };
            debug!(actor = %actor, ?intent, %status, "intent applied");
        }
        Ok(())
    }
}
