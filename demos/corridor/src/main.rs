//! corridor — end-to-end walkthrough of the isonav engine.
//!
//! Part 1 drives a `Coordinator` by hand: a courier with a key unlocks and
//! opens a door, walks to a cell taken by a crate (fallback goal), and
//! re-paths when a second crate is dropped in its way.  A guard patrols the
//! lower hall meanwhile.  The session snapshot is printed as JSON.
//!
//! Part 2 hands the same map to `nav-sim` with wandering actors.
//!
//! Set `RUST_LOG=debug` (or `trace`) to watch the engine's decisions.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nav_core::{EntityId, GridPos, SimConfig};
use nav_grid::{
    DoorCredentials, DoorState, GridModel, Obstacle, load_obstacles_reader, parse_ascii_layout,
};
use nav_mobility::{Coordinator, DoorAction, MovementConfig, MovementEvent, PatrolRoute};
use nav_path::AStarPathfinder;
use nav_sim::{EventLog, SimBuilder, WanderBehavior};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:  u64      = 42;
const FRAME: Duration = Duration::from_micros(16_667); // 60 fps

const COURIER: EntityId = EntityId(1);
const GUARD:   EntityId = EntityId(2);
const DOOR:    EntityId = EntityId(900);
const CRATE:   EntityId = EntityId(902);

/// Layout ids start high so they never collide with actors.
const FIRST_WALL_ID: u32 = 1_000;

const MAP: &str = "\
##########
#........#
#..~~~...#
#........#
####.#####
#........#
#........#
##########";

// The gap at (4, 4) becomes a locked door; a crate sits on the courier's goal.
const OBSTACLES_CSV: &str = "\
id,kind,x,y,state,blocks_line_of_sight\n\
900,door,4,4,locked,true\n\
901,body,6,6,,\n\
";

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_grid() -> Result<GridModel> {
    let mut grid = parse_ascii_layout(MAP, EntityId(FIRST_WALL_ID)).context("parsing map")?;
    let rows = load_obstacles_reader(Cursor::new(OBSTACLES_CSV), &mut grid).context("loading obstacles")?;
    println!("Grid: {} tiles, {} obstacles ({rows} from CSV)", grid.tile_count(), grid.obstacle_count());
    Ok(grid)
}

/// Run frames until `actor` has no session (or `max_frames` pass).
fn settle(
    coordinator: &mut Coordinator<AStarPathfinder>,
    grid:        &mut GridModel,
    actor:       EntityId,
    max_frames:  u32,
    log:         &mut Vec<MovementEvent>,
) -> u32 {
    for frame in 0..max_frames {
        if !coordinator.actor(actor).is_some_and(|a| a.is_moving()) {
            return frame;
        }
        coordinator.update(grid, FRAME, log);
    }
    max_frames
}

fn report(coordinator: &Coordinator<AStarPathfinder>, actor: EntityId, what: &str) {
    if let Some(a) = coordinator.actor(actor) {
        println!("  {what:<28} {} at {}  ({})", a.id(), a.position(), a.status());
    }
}

// ── Part 1: hand-driven coordinator ───────────────────────────────────────────

fn walkthrough() -> Result<()> {
    println!("── Part 1: courier & guard ──");
    let mut grid = build_grid()?;
    let mut coordinator = Coordinator::new(AStarPathfinder, MovementConfig::default())?;
    let mut log = Vec::new();

    coordinator.spawn(COURIER, GridPos::new(2, 1), DoorCredentials::key(), &mut grid)?;
    coordinator.spawn(GUARD, GridPos::new(1, 5), DoorCredentials::default(), &mut grid)?;
    let route = PatrolRoute::new(
        vec![GridPos::new(8, 5), GridPos::new(8, 6), GridPos::new(1, 6), GridPos::new(1, 5)],
        true,
    );
    coordinator.set_patrol(GUARD, route, &mut grid, &mut log)?;

    let goal = GridPos::new(6, 6);
    let (preview, _) = coordinator.preview(COURIER, goal, &grid)?;
    println!("  preview to {goal} before unlocking: {}", preview.as_str());

    coordinator.interact_door(COURIER, DOOR, DoorAction::UseKey, &mut grid, &mut log)?;
    report(&coordinator, COURIER, "approaching door");
    let frames = settle(&mut coordinator, &mut grid, COURIER, 600, &mut log);
    report(&coordinator, COURIER, &format!("after {frames} frames"));

    coordinator.interact_door(COURIER, DOOR, DoorAction::Open, &mut grid, &mut log)?;
    report(&coordinator, COURIER, "door");

    let (preview, path) = coordinator.preview(COURIER, goal, &grid)?;
    println!("  preview to {goal} after opening: {} ({} steps)", preview.as_str(), path.steps());

    coordinator.move_to(COURIER, goal, &mut grid, &mut log)?;
    report(&coordinator, COURIER, "moving");

    // Wait until the courier is through the door, then block its next cell.
    for _ in 0..600 {
        if coordinator.position(COURIER).is_some_and(|p| p.y >= 5) {
            break;
        }
        coordinator.update(&mut grid, FRAME, &mut log);
    }
    let next = coordinator
        .actor(COURIER)
        .and_then(|a| a.session())
        .and_then(|s| s.next_cell());
    if let Some(cell) = next {
        grid.set_obstacle(Obstacle::body(CRATE, cell));
        println!("  crate dropped on {cell}");
    }

    let frames = settle(&mut coordinator, &mut grid, COURIER, 1_200, &mut log);
    report(&coordinator, COURIER, &format!("after {frames} frames"));
    report(&coordinator, GUARD, "guard");

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for event in &log {
        *counts.entry(event.name()).or_default() += 1;
    }
    println!("  events: {counts:?}");

    let snapshot = serde_json::to_string_pretty(&coordinator.export_sessions())?;
    println!("  snapshot:\n{snapshot}");
    Ok(())
}

// ── Part 2: nav-sim with wanderers ────────────────────────────────────────────

fn wanderers() -> Result<()> {
    println!("── Part 2: wanderers ──");
    let mut grid = build_grid()?;
    grid.set_door_state(DOOR, DoorState::Open);

    let config = SimConfig { frame_duration: FRAME, total_frames: 1_800, seed: SEED };
    let starts = [GridPos::new(1, 1), GridPos::new(8, 1), GridPos::new(1, 6), GridPos::new(8, 5)];

    let mut builder = SimBuilder::new(config, grid, WanderBehavior::new(4, 0.95), AStarPathfinder);
    for (i, &pos) in starts.iter().enumerate() {
        builder = builder.actor(EntityId(10 + i as u32), pos);
    }
    let mut sim = builder.build()?;

    let mut log = EventLog::new();
    sim.run(&mut log)?;

    println!(
        "  {} frames, {} moves, {} steps, {} blocked",
        log.frames,
        log.named("move_started").count(),
        log.named("step_reached").count(),
        log.named("blocked").count(),
    );
    for actor in sim.coordinator.actors() {
        println!("  {} at {}  ({})", actor.id(), actor.position(), actor.status());
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== corridor — isonav walkthrough ===");
    walkthrough()?;
    println!();
    wanderers()?;
    info!("done");
    Ok(())
}
