//! Integration tests for nav-sim.

use std::time::Duration;

use nav_core::{ActorRng, EntityId, GridPos, SimConfig};
use nav_grid::{DoorState, GridModel, parse_ascii_layout};
use nav_mobility::{Actor, DoorAction, MovementStatus};
use nav_path::AStarPathfinder;

use crate::{
    BehaviorContext, BehaviorModel, EventLog, Intent, NoopBehavior, NoopObserver, SimBuilder,
    SimError, WanderBehavior,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const HERO: EntityId = EntityId(1);
const FIRST_OBSTACLE: EntityId = EntityId(1000);

fn p(x: i32, y: i32) -> GridPos {
    GridPos::new(x, y)
}

/// 50 ms frames: three frames per 150 ms cell step.
fn test_config(total_frames: u64) -> SimConfig {
    SimConfig {
        frame_duration: Duration::from_millis(50),
        total_frames,
        seed:           42,
    }
}

fn layout(text: &str) -> GridModel {
    parse_ascii_layout(text, FIRST_OBSTACLE).expect("valid layout")
}

/// Walk to a fixed cell whenever not already there.
struct GoTo(GridPos);

impl BehaviorModel for GoTo {
    fn decide(&self, actor: &Actor, _ctx: &BehaviorContext<'_>, _rng: &mut ActorRng) -> Vec<Intent> {
        if actor.position() == self.0 {
            vec![]
        } else {
            vec![Intent::MoveTo(self.0)]
        }
    }
}

/// Open a door until it is open.
struct OpenDoor(EntityId);

impl BehaviorModel for OpenDoor {
    fn decide(&self, _actor: &Actor, ctx: &BehaviorContext<'_>, _rng: &mut ActorRng) -> Vec<Intent> {
        match ctx.grid.door(self.0) {
            Some(door) if door.state != DoorState::Open => {
                vec![Intent::Door { door: self.0, action: DoorAction::Open }]
            }
            _ => vec![],
        }
    }
}

/// Issues a move and changes its mind in the same breath.
struct Fickle;

impl BehaviorModel for Fickle {
    fn decide(&self, _actor: &Actor, _ctx: &BehaviorContext<'_>, _rng: &mut ActorRng) -> Vec<Intent> {
        vec![Intent::MoveTo(GridPos::new(5, 0)), Intent::Cancel]
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_and_places_actors() {
        let sim = SimBuilder::new(test_config(10), layout("...."), NoopBehavior, AStarPathfinder)
            .actor(HERO, p(0, 0))
            .actor(EntityId(2), p(3, 0))
            .build()
            .unwrap();
        assert_eq!(sim.coordinator.actor_count(), 2);
        assert_eq!(sim.grid.occupant(p(3, 0)), Some(EntityId(2)));
        assert_eq!(sim.rngs.len(), 2);
    }

    #[test]
    fn zero_frame_duration_errors() {
        let config = SimConfig { frame_duration: Duration::ZERO, ..test_config(10) };
        let result = SimBuilder::new(config, layout("...."), NoopBehavior, AStarPathfinder).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn actor_on_wall_errors() {
        let result = SimBuilder::new(test_config(10), layout("..#"), NoopBehavior, AStarPathfinder)
            .actor(HERO, p(2, 0))
            .build();
        assert!(matches!(result, Err(SimError::Mobility(_))));
    }

    #[test]
    fn patrol_events_arrive_with_first_frame() {
        let route = nav_mobility::PatrolRoute::new(vec![p(3, 0), p(0, 0)], true);
        let mut sim = SimBuilder::new(test_config(10), layout("...."), NoopBehavior, AStarPathfinder)
            .actor(HERO, p(0, 0))
            .patrol(HERO, route)
            .build()
            .unwrap();

        let mut log = EventLog::new();
        sim.step(Duration::from_millis(50), &mut log).unwrap();
        assert_eq!(log.named("move_started").count(), 1);
        assert_eq!(log.events[0].frame.0, 0);
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn noop_runs_to_end_frame() {
        let mut sim = SimBuilder::new(test_config(10), layout("...."), NoopBehavior, AStarPathfinder)
            .actor(HERO, p(0, 0))
            .build()
            .unwrap();
        let mut log = EventLog::new();
        sim.run(&mut log).unwrap();

        assert_eq!(sim.clock().frame.0, 10);
        assert_eq!(sim.clock().elapsed, Duration::from_millis(500));
        assert_eq!(log.frames, 10);
        assert!(log.events.is_empty());
    }

    #[test]
    fn run_is_idempotent_at_end() {
        let mut sim = SimBuilder::new(test_config(5), layout("...."), NoopBehavior, AStarPathfinder)
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.clock().frame.0, 5);
    }

    #[test]
    fn run_frames_ignores_total() {
        let mut sim = SimBuilder::new(test_config(5), layout("...."), NoopBehavior, AStarPathfinder)
            .build()
            .unwrap();
        sim.run_frames(8, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock().frame.0, 8);
    }
}

// ── Intents ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod intent_tests {
    use super::*;

    #[test]
    fn move_intent_walks_to_target() {
        let mut sim = SimBuilder::new(test_config(20), layout("......"), GoTo(p(5, 0)), AStarPathfinder)
            .actor(HERO, p(0, 0))
            .build()
            .unwrap();
        let mut log = EventLog::new();

        let decided = sim.step(Duration::from_millis(50), &mut log).unwrap();
        assert_eq!(decided, 1);

        sim.run(&mut log).unwrap();
        assert_eq!(sim.coordinator.position(HERO), Some(p(5, 0)));
        assert_eq!(sim.coordinator.status(HERO), Some(MovementStatus::Arrived));
        assert_eq!(log.named("move_started").count(), 1);
        assert_eq!(log.named("step_reached").count(), 5);
    }

    #[test]
    fn walking_actors_are_not_asked_to_decide() {
        let mut sim = SimBuilder::new(test_config(20), layout("......"), GoTo(p(5, 0)), AStarPathfinder)
            .actor(HERO, p(0, 0))
            .build()
            .unwrap();
        sim.step(Duration::from_millis(50), &mut NoopObserver).unwrap();
        let decided = sim.step(Duration::from_millis(50), &mut NoopObserver).unwrap();
        assert_eq!(decided, 0);
    }

    #[test]
    fn door_intent_approaches_and_opens() {
        let door = FIRST_OBSTACLE;
        let mut sim = SimBuilder::new(test_config(15), layout("....D."), OpenDoor(door), AStarPathfinder)
            .actor(HERO, p(0, 0))
            .build()
            .unwrap();
        let mut log = EventLog::new();
        sim.run(&mut log).unwrap();

        assert_eq!(sim.grid.door(door).map(|d| d.state), Some(DoorState::Open));
        assert_eq!(sim.coordinator.position(HERO), Some(p(3, 0)));
        assert_eq!(sim.coordinator.status(HERO), Some(MovementStatus::DoorOpened));
    }

    #[test]
    fn cancel_intent_stops_the_move() {
        let mut sim = SimBuilder::new(test_config(6), layout("......"), Fickle, AStarPathfinder)
            .actor(HERO, p(0, 0))
            .build()
            .unwrap();
        let mut log = EventLog::new();
        sim.run(&mut log).unwrap();

        assert_eq!(sim.coordinator.position(HERO), Some(p(0, 0)));
        assert_eq!(sim.coordinator.status(HERO), Some(MovementStatus::Cancelled));
        assert!(log.named("move_started").count() >= 1);
        assert_eq!(log.named("step_reached").count(), 0);
    }

    #[test]
    fn spawn_mid_run_gets_an_rng() {
        let mut sim = SimBuilder::new(test_config(6), layout("......"), GoTo(p(5, 0)), AStarPathfinder)
            .build()
            .unwrap();
        sim.run_frames(2, &mut NoopObserver).unwrap();
        sim.spawn(HERO, p(0, 0), Default::default()).unwrap();
        assert!(sim.rngs.contains_key(&HERO));
        assert!(matches!(
            sim.spawn(HERO, p(1, 0), Default::default()),
            Err(SimError::Mobility(_))
        ));
    }
}

// ── WanderBehavior ────────────────────────────────────────────────────────────

#[cfg(test)]
mod wander_tests {
    use nav_grid::DoorCredentials;
    use nav_mobility::{Coordinator, MovementConfig};

    use super::*;

    const ROOM: &str = "........\n..#.....\n..#..#..\n........\n.....#..\n........";

    fn actors() -> [(EntityId, GridPos); 3] {
        [(EntityId(1), p(0, 0)), (EntityId(2), p(7, 5)), (EntityId(3), p(4, 3))]
    }

    fn wander_sim(seed: u64) -> crate::Sim<WanderBehavior, AStarPathfinder> {
        let config = SimConfig { seed, ..test_config(300) };
        let mut builder = SimBuilder::new(config, layout(ROOM), WanderBehavior::new(3, 0.5), AStarPathfinder);
        for (id, pos) in actors() {
            builder = builder.actor(id, pos);
        }
        builder.build().unwrap()
    }

    #[test]
    fn targets_are_walkable_and_in_radius() {
        let mut grid = layout(ROOM);
        let mut coordinator = Coordinator::new(AStarPathfinder, MovementConfig::default()).unwrap();
        coordinator.spawn(HERO, p(3, 2), DoorCredentials::default(), &mut grid).unwrap();
        let actor = coordinator.actor(HERO).unwrap();

        let wander = WanderBehavior::new(2, 0.0);
        let ctx = BehaviorContext::new(*coordinator.clock(), &grid);
        let mut rng = ActorRng::new(7, HERO);
        for _ in 0..200 {
            for intent in wander.decide(actor, &ctx, &mut rng) {
                let Intent::MoveTo(cell) = intent else { panic!("unexpected {intent:?}") };
                assert!(grid.is_walkable(cell, Some(HERO)), "{cell}");
                assert!(cell.chebyshev(p(3, 2)) <= 2);
                assert_ne!(cell, p(3, 2));
            }
        }
    }

    #[test]
    fn resting_wanderer_does_nothing() {
        let mut grid = layout(ROOM);
        let mut coordinator = Coordinator::new(AStarPathfinder, MovementConfig::default()).unwrap();
        coordinator.spawn(HERO, p(0, 0), DoorCredentials::default(), &mut grid).unwrap();
        let actor = coordinator.actor(HERO).unwrap();

        let ctx = BehaviorContext::new(*coordinator.clock(), &grid);
        let mut rng = ActorRng::new(7, HERO);
        for _ in 0..50 {
            assert!(WanderBehavior::new(3, 1.0).decide(actor, &ctx, &mut rng).is_empty());
        }
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = wander_sim(99);
        let mut b = wander_sim(99);
        let (mut log_a, mut log_b) = (EventLog::new(), EventLog::new());
        a.run(&mut log_a).unwrap();
        b.run(&mut log_b).unwrap();

        for (id, _) in actors() {
            assert_eq!(a.coordinator.position(id), b.coordinator.position(id));
        }
        assert_eq!(log_a.events, log_b.events);
        assert!(!log_a.events.is_empty());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    fn distinct(cells: &[GridPos]) -> bool {
        cells.iter().enumerate().all(|(i, a)| cells[i + 1..].iter().all(|b| a != b))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// Wandering never stacks two actors on one cell or strands one on
        /// an unwalkable cell.
        #[test]
        fn wanderers_never_overlap(seed in any::<u64>()) {
            let grid = layout("......\n.#..#.\n......\n..##..\n......");
            let config = SimConfig { seed, ..test_config(120) };
            let mut sim = SimBuilder::new(config, grid, WanderBehavior::new(3, 0.3), AStarPathfinder)
                .actor(EntityId(1), p(0, 0))
                .actor(EntityId(2), p(5, 0))
                .actor(EntityId(3), p(0, 4))
                .actor(EntityId(4), p(5, 4))
                .build()
                .unwrap();
            sim.run(&mut NoopObserver).unwrap();

            let cells: Vec<GridPos> = sim.coordinator.actors().map(Actor::position).collect();
            prop_assert!(distinct(&cells));
            for actor in sim.coordinator.actors() {
                prop_assert_eq!(sim.grid.occupant(actor.position()), Some(actor.id()));
                prop_assert!(sim.grid.is_walkable(actor.position(), Some(actor.id())));
            }
        }
    }
}
