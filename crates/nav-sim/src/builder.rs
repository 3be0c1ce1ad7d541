//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeMap;

use tracing::info;

use nav_core::{ActorRng, EntityId, GridPos, SimConfig};
use nav_grid::{DoorCredentials, GridModel};
use nav_mobility::{Coordinator, MovementConfig, PatrolRoute};
use nav_path::Pathfinder;

use crate::{BehaviorModel, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<B, P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: frame duration, total frames, seed
/// - [`GridModel`]: the world, e.g. from `nav_grid::parse_ascii_layout`
/// - `B: BehaviorModel`
/// - `P: Pathfinder` (e.g. [`nav_path::AStarPathfinder`])
///
/// # Optional inputs
///
/// | Method              | Default                        |
/// |---------------------|--------------------------------|
/// | `.movement(c)`      | `MovementConfig::default()`    |
/// | `.actor(id, pos)`   | no actors                      |
/// | `.actor_with(..)`   | (same, with door credentials)  |
/// | `.patrol(id, r)`    | no patrols                     |
///
/// # Example
///
/// ```rust,ignore
/// let grid = parse_ascii_layout(MAP, EntityId(1000))?;
/// let mut sim = SimBuilder::new(config, grid, WanderBehavior::default(), AStarPathfinder)
///     .actor(EntityId(1), GridPos::new(1, 1))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<B: BehaviorModel, P: Pathfinder> {
    config:     SimConfig,
    grid:       GridModel,
    movement:   MovementConfig,
    actors:     Vec<(EntityId, GridPos, DoorCredentials)>,
    patrols:    Vec<(EntityId, PatrolRoute)>,
    behavior:   B,
    pathfinder: P,
}

impl<B: BehaviorModel, P: Pathfinder> SimBuilder<B, P> {
    pub fn new(config: SimConfig, grid: GridModel, behavior: B, pathfinder: P) -> Self {
        Self {
            config,
            grid,
            movement: MovementConfig::default(),
            actors:   Vec::new(),
            patrols:  Vec::new(),
            behavior,
            pathfinder,
        }
    }

    pub fn movement(mut self, movement: MovementConfig) -> Self {
        self.movement = movement;
        self
    }

    /// Add an actor without door credentials.
    pub fn actor(self, id: EntityId, pos: GridPos) -> Self {
        self.actor_with(id, pos, DoorCredentials::default())
    }

    pub fn actor_with(mut self, id: EntityId, pos: GridPos, credentials: DoorCredentials) -> Self {
        self.actors.push((id, pos, credentials));
        self
    }

    /// Start `id` on a patrol route once the sim is built.
    pub fn patrol(mut self, id: EntityId, route: PatrolRoute) -> Self {
        self.patrols.push((id, route));
        self
    }

    /// Validate inputs, spawn actors, start patrols and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<B, P>> {
        if self.config.frame_duration.is_zero() {
            return Err(SimError::Config("frame_duration must be non-zero".into()));
        }

        let mut grid = self.grid;
        let mut coordinator = Coordinator::new(self.pathfinder, self.movement)?;
        let mut rngs = BTreeMap::new();

        for (id, pos, credentials) in self.actors {
            coordinator.spawn(id, pos, credentials, &mut grid)?;
            rngs.insert(id, ActorRng::new(self.config.seed, id));
        }

        let mut pending = Vec::new();
        for (id, route) in self.patrols {
            coordinator.set_patrol(id, route, &mut grid, &mut pending)?;
        }

        info!(
            actors = coordinator.actor_count(),
            tiles = grid.tile_count(),
            seed = self.config.seed,
            "sim built"
        );

        Ok(Sim {
            config: self.config,
            grid,
            coordinator,
            behavior: self.behavior,
            rngs,
            pending,
        })
    }
}
