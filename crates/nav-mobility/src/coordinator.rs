//! `Coordinator` — executes paths over time for every registered actor.
//!
//! # Update cycle
//!
//! [`Coordinator::update`] is called once per frame with the frame's `dt`:
//!
//! 1. Advance the clock and add `dt` to every running session.
//! 2. Work out how many whole steps each session owes (`accumulated /
//!    step_duration`).
//! 3. Run step rounds.  In each round every actor that still owes a step,
//!    in ascending id order, reserves its next cell (walkable for it and not
//!    reserved by anyone else), moves onto it, emits `step_reached` and
//!    releases the reservation before the next actor goes.
//!
//! Lower ids go first, so on a contested cell the lower id wins and the
//! other actor's step counts as blocked.  A cell vacated earlier in the same
//! round is free for whoever comes after.  There is no back-off or fairness
//! scheme.
//!
//! # Failure handling
//!
//! Nothing here returns `Err` once an actor is registered.  Blocked steps
//! re-path up to `max_repath_attempts` times per session, then give up with
//! `repath-failed`.  A failed search never writes to the grid or the
//! reservation table.

use std::collections::BTreeMap;
use std::time::Duration;

use rustc_hash::FxHashSet;
use tracing::{debug, info, trace};

use nav_core::{EntityId, GridPos, NavError, SimClock};
use nav_grid::{DoorCredentials, GridModel};
use nav_path::{PathResult, Pathfinder};

use crate::door::apply_door_action;
use crate::event::{EventKind, MovementEvent};
use crate::fsm::transition;
use crate::{
    Actor, ActorSnapshot, CoordinatorSnapshot, DoorAction, MobilityError, MobilityResult,
    MotionInput, MotionState, MoveFailure, MovementConfig, MovementSession, MovementStatus,
    PathPreview, PatrolRoute, PendingDoor, ReservationTable,
};

// ── Coordinator ───────────────────────────────────────────────────────────────

/// Owns every actor's movement state plus the shared reservation table.
///
/// # Type parameter
///
/// `P` must implement [`Pathfinder`] (e.g. [`nav_path::AStarPathfinder`]).
/// Independent coordinators share nothing, so several simulations can run
/// side by side.
pub struct Coordinator<P: Pathfinder> {
    pathfinder:   P,
    config:       MovementConfig,
    clock:        SimClock,
    reservations: ReservationTable,
    actors:       BTreeMap<EntityId, Actor>,
}

impl<P: Pathfinder> Coordinator<P> {
    pub fn new(pathfinder: P, config: MovementConfig) -> MobilityResult<Self> {
        config.validate()?;
        Ok(Self {
            pathfinder,
            config,
            clock: SimClock::new(),
            reservations: ReservationTable::new(),
            actors: BTreeMap::new(),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn reservations(&self) -> &ReservationTable {
        &self.reservations
    }

    pub fn pathfinder(&self) -> &P {
        &self.pathfinder
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// All actors in ascending id order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.actors.values()
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn position(&self, id: EntityId) -> Option<GridPos> {
        self.actors.get(&id).map(Actor::position)
    }

    pub fn status(&self, id: EntityId) -> Option<MovementStatus> {
        self.actors.get(&id).map(Actor::status)
    }

    pub fn state(&self, id: EntityId) -> Option<MotionState> {
        self.actors.get(&id).map(Actor::state)
    }

    fn require(&self, id: EntityId) -> MobilityResult<&Actor> {
        self.actors.get(&id).ok_or(MobilityError::UnknownActor(id))
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Register an actor standing on `pos` and mark the cell occupied.
    pub fn spawn(
        &mut self,
        id: EntityId,
        pos: GridPos,
        credentials: DoorCredentials,
        grid: &mut GridModel,
    ) -> MobilityResult<()> {
        if self.actors.contains_key(&id) {
            return Err(NavError::DuplicateEntity(id).into());
        }
        if !grid.is_walkable(pos, Some(id)) {
            return Err(MobilityError::SpawnBlocked { actor: id, pos });
        }
        grid.set_occupied(pos, id);
        self.actors.insert(id, Actor::new(id, pos, credentials));
        info!(actor = %id, %pos, "actor spawned");
        Ok(())
    }

    /// Remove an actor, its occupancy entry and any reservations it holds.
    pub fn despawn(&mut self, id: EntityId, grid: &mut GridModel) -> MobilityResult<Actor> {
        let actor = self.actors.remove(&id).ok_or(MobilityError::UnknownActor(id))?;
        if grid.occupant(actor.position) == Some(id) {
            grid.clear_occupied(actor.position);
        }
        self.reservations.release_all(id);
        info!(actor = %id, "actor despawned");
        Ok(actor)
    }

    pub fn set_credentials(&mut self, id: EntityId, credentials: DoorCredentials) -> MobilityResult<()> {
        let actor = self.actors.get_mut(&id).ok_or(MobilityError::UnknownActor(id))?;
        actor.credentials = credentials;
        Ok(())
    }

    // ── Searches ──────────────────────────────────────────────────────────

    fn search(&self, id: EntityId, from: GridPos, to: GridPos, grid: &GridModel, fallback: bool) -> PathResult {
        let mut options = self.config.path_options;
        options.allow_target_fallback = fallback;
        options.ignore_body = Some(id);
        self.pathfinder.find_path(grid, from, to, &options)
    }

    /// What a move to `target` would look like right now.  Mutates nothing.
    pub fn preview(
        &self,
        id: EntityId,
        target: GridPos,
        grid: &GridModel,
    ) -> MobilityResult<(PathPreview, PathResult)> {
        let from = self.require(id)?.position;
        let result = self.search(id, from, target, grid, true);
        let preview = if !result.is_movable() {
            PathPreview::Invalid
        } else if result.used_fallback {
            PathPreview::Fallback
        } else {
            PathPreview::Valid
        };
        Ok((preview, result))
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Ask an actor to walk to `target`.
    ///
    /// While a session is running the target is queued instead (replacing
    /// any earlier queued target) and picked up on arrival.
    pub fn move_to(
        &mut self,
        id: EntityId,
        target: GridPos,
        grid: &mut GridModel,
        out: &mut Vec<MovementEvent>,
    ) -> MobilityResult<MovementStatus> {
        let clock = self.clock;
        let actor = self.actors.get_mut(&id).ok_or(MobilityError::UnknownActor(id))?;

        if let Some(session) = actor.session.as_mut() {
            session.queued_target = Some(target);
            fire(actor, MotionInput::CommandQueued);
            set_status(actor, MovementStatus::Queued, None, &clock, out);
            debug!(actor = %id, %target, "target queued");
            return Ok(MovementStatus::Queued);
        }

        Ok(self.intake(id, target, grid, out))
    }

    /// Stop immediately: drop path, target, queue, patrol and reservations.
    /// Cancelling an idle actor is a no-op.
    pub fn cancel(
        &mut self,
        id: EntityId,
        out: &mut Vec<MovementEvent>,
    ) -> MobilityResult<MovementStatus> {
        let clock = self.clock;
        let actor = self.actors.get_mut(&id).ok_or(MobilityError::UnknownActor(id))?;

        if actor.state == MotionState::Idle && actor.session.is_none() {
            return Ok(MovementStatus::Idle);
        }

        actor.session = None;
        actor.patrol = None;
        self.reservations.release_all(id);
        fire(actor, MotionInput::Cancel);
        set_status(actor, MovementStatus::Cancelled, None, &clock, out);
        info!(actor = %id, "movement cancelled");
        Ok(MovementStatus::Cancelled)
    }

    /// Act on a door, walking up to it first if needed.
    ///
    /// Adjacent actors act at once.  Otherwise the actor walks to the walkable
    /// neighbor of the door with the shortest path and the action runs on
    /// arrival.  An approach issued mid-move replaces the running session but
    /// keeps its queued target.
    pub fn interact_door(
        &mut self,
        id: EntityId,
        door: EntityId,
        action: DoorAction,
        grid: &mut GridModel,
        out: &mut Vec<MovementEvent>,
    ) -> MobilityResult<MovementStatus> {
        let at = self.require(id)?.position;
        let door_pos = grid.door(door).ok_or(MobilityError::UnknownDoor(door))?.pos;
        let pending = PendingDoor { door, action };

        if at.is_adjacent(door_pos) {
            return Ok(self.run_door_action(id, pending, grid, out));
        }

        let view: &GridModel = grid;
        let approach = door_pos
            .neighbors8()
            .filter(|&cell| view.is_walkable(cell, Some(id)))
            .map(|cell| self.search(id, at, cell, view, false))
            .filter(PathResult::is_movable)
            .min_by(|a, b| a.len().cmp(&b.len()).then(a.cost.total_cmp(&b.cost)));

        let Some(approach) = approach else {
            let clock = self.clock;
            if let Some(actor) = self.actors.get_mut(&id) {
                set_status(actor, MovementStatus::DoorUnreachable, None, &clock, out);
            }
            debug!(actor = %id, %door, "door unreachable");
            return Ok(MovementStatus::DoorUnreachable);
        };

        let mut queued = None;
        if let Some(actor) = self.actors.get_mut(&id) {
            if let Some(previous) = actor.session.take() {
                queued = previous.queued_target;
                fire(actor, MotionInput::Cancel);
            }
        }
        self.reservations.release_all(id);

        let neighbor = approach.resolved_goal.unwrap_or(door_pos);
        let status = self.start_session(id, neighbor, approach, Some(pending), out);
        if let Some(session) = self.actors.get_mut(&id).and_then(|a| a.session.as_mut()) {
            session.queued_target = queued;
        }
        Ok(status)
    }

    /// Start walking a patrol route from its first waypoint.
    pub fn set_patrol(
        &mut self,
        id: EntityId,
        route: PatrolRoute,
        grid: &mut GridModel,
        out: &mut Vec<MovementEvent>,
    ) -> MobilityResult<MovementStatus> {
        let actor = self.actors.get_mut(&id).ok_or(MobilityError::UnknownActor(id))?;
        let first = route.waypoints.first().copied();
        actor.patrol = Some(route);
        actor.patrol_index = 0;
        let (busy, status) = (actor.session.is_some(), actor.status);

        match first {
            Some(waypoint) if !busy => Ok(self.intake(id, waypoint, grid, out)),
            _ => Ok(status),
        }
    }

    /// Re-issue the current patrol waypoint, e.g. after a blocked command.
    pub fn resume_patrol(
        &mut self,
        id: EntityId,
        grid: &mut GridModel,
        out: &mut Vec<MovementEvent>,
    ) -> MobilityResult<MovementStatus> {
        let actor = self.require(id)?;
        let status = actor.status;
        if actor.session.is_some() {
            return Ok(status);
        }
        let waypoint = actor
            .patrol
            .as_ref()
            .and_then(|route| route.waypoints.get(actor.patrol_index).copied());
        match waypoint {
            Some(waypoint) => Ok(self.intake(id, waypoint, grid, out)),
            None => Ok(status),
        }
    }

    // ── Frame update ──────────────────────────────────────────────────────

    /// Advance every running session by `dt`.
    pub fn update(&mut self, grid: &mut GridModel, dt: Duration, out: &mut Vec<MovementEvent>) {
        self.clock.advance(dt);
        let step = self.config.step_duration;

        let mut owed: Vec<(EntityId, u32)> = Vec::new();
        for (&id, actor) in self.actors.iter_mut() {
            let Some(session) = actor.session.as_mut() else { continue };
            session.accumulated = session.accumulated.saturating_add(dt);
            let mut steps = 0u32;
            while session.accumulated >= step {
                session.accumulated -= step;
                steps += 1;
            }
            if steps > 0 {
                owed.push((id, steps));
            }
        }

        let rounds = owed.iter().map(|&(_, n)| n).max().unwrap_or(0);
        for round in 0..rounds {
            for &(id, steps) in &owed {
                if steps <= round {
                    continue;
                }
                if let Some(next) = self.claim_step(id, grid, out) {
                    self.commit_step(id, next, grid, out);
                }
            }
        }
    }

    /// Reserve the actor's next cell, or handle the block.
    fn claim_step(
        &mut self,
        id: EntityId,
        grid: &mut GridModel,
        out: &mut Vec<MovementEvent>,
    ) -> Option<GridPos> {
        let (at, next, needs_repath) = {
            let actor = self.actors.get(&id)?;
            let session = actor.session.as_ref()?;
            (actor.position, session.next_cell(), session.needs_repath)
        };

        if needs_repath {
            self.repath(id, grid, out);
            return None;
        }
        let next = next?;

        if grid.is_walkable(next, Some(id)) && !self.reservations.is_reserved_by_other(next, id) {
            self.reservations.reserve(next, id);
            return Some(next);
        }

        debug!(actor = %id, %at, %next, "step blocked");
        out.push(MovementEvent::new(
            id,
            &self.clock,
            EventKind::Blocked { at, cell: Some(next), failure: None },
        ));

        let clock = self.clock;
        if let Some(actor) = self.actors.get_mut(&id) {
            fire(actor, MotionInput::StepBlocked);
            if let Some(session) = actor.session.as_mut() {
                session.needs_repath = true;
            }
            set_status(actor, MovementStatus::Repathing, None, &clock, out);
        }
        self.repath(id, grid, out);
        None
    }

    fn commit_step(&mut self, id: EntityId, to: GridPos, grid: &mut GridModel, out: &mut Vec<MovementEvent>) {
        let clock = self.clock;
        let Some(actor) = self.actors.get_mut(&id) else {
            self.reservations.release(to, id);
            return;
        };
        let Some(session) = actor.session.as_mut() else {
            self.reservations.release(to, id);
            return;
        };

        let from = actor.position;
        grid.move_occupied(id, from, to);
        actor.position = to;
        session.cursor += 1;
        let remaining = session.remaining();
        let complete = session.is_complete();

        out.push(MovementEvent::new(id, &clock, EventKind::StepReached { from, to, remaining }));
        self.reservations.release(to, id);
        trace!(actor = %id, %from, %to, remaining, "step");

        if complete {
            self.arrive(id, grid, out);
        }
    }

    /// One bounded re-path attempt from the actor's current cell toward the
    /// session's requested target.  A session that has already used its
    /// budget fails without searching again.
    fn repath(&mut self, id: EntityId, grid: &mut GridModel, out: &mut Vec<MovementEvent>) {
        let clock = self.clock;
        let max_attempts = self.config.max_repath_attempts;

        let (at, target, attempt) = {
            let Some(actor) = self.actors.get_mut(&id) else { return };
            let Some(session) = actor.session.as_mut() else { return };
            if session.repath_attempts >= max_attempts {
                let (at, target, used) = (actor.position, session.target, session.repath_attempts);
                self.give_up(id, at, target, used, out);
                return;
            }
            session.repath_attempts += 1;
            (actor.position, session.target, session.repath_attempts)
        };

        out.push(MovementEvent::new(id, &clock, EventKind::RepathStarted { attempt, max_attempts }));
        debug!(actor = %id, %at, %target, attempt, max_attempts, "re-path");

        let result = self.search(id, at, target, grid, true);

        let Some(actor) = self.actors.get_mut(&id) else { return };
        let Some(session) = actor.session.as_mut() else { return };

        if result.is_movable() {
            session.replan(result.path, result.used_fallback);
            let status = session_status(session);
            let queued = session.queued_target.is_some();
            fire(actor, MotionInput::RepathSucceeded);
            if queued {
                fire(actor, MotionInput::CommandQueued);
            }
            set_status(actor, status, None, &clock, out);
        } else if !result.is_empty() {
            // Already standing on the (fallback) destination.
            session.replan(result.path, result.used_fallback);
            self.arrive(id, grid, out);
        } else if attempt >= max_attempts {
            self.give_up(id, at, target, attempt, out);
        }
    }

    /// Tear the session down after the re-path budget is spent.
    fn give_up(&mut self, id: EntityId, at: GridPos, target: GridPos, attempts: u32, out: &mut Vec<MovementEvent>) {
        let clock = self.clock;
        let Some(actor) = self.actors.get_mut(&id) else { return };
        let failure = MoveFailure::RepathExhausted { attempts };
        actor.session = None;
        self.reservations.release_all(id);
        fire(actor, MotionInput::RepathExhausted);
        out.push(MovementEvent::new(id, &clock, EventKind::RepathFailed { failure }));
        set_status(actor, MovementStatus::RepathFailed, Some(failure), &clock, out);
        info!(actor = %id, %at, %target, attempts, "re-path budget exhausted");
    }

    fn arrive(&mut self, id: EntityId, grid: &mut GridModel, out: &mut Vec<MovementEvent>) {
        let clock = self.clock;
        let Some(actor) = self.actors.get_mut(&id) else { return };
        let Some(session) = actor.session.take() else { return };
        let at = actor.position;

        fire(actor, MotionInput::ReachedGoal);
        set_status(actor, MovementStatus::Arrived, None, &clock, out);
        self.reservations.release_all(id);
        info!(actor = %id, %at, "arrived");

        if let Some(pending) = session.pending_door {
            let adjacent = grid.door(pending.door).is_some_and(|door| at.is_adjacent(door.pos));
            if adjacent {
                self.run_door_action(id, pending, grid, out);
            } else if let Some(actor) = self.actors.get_mut(&id) {
                set_status(actor, MovementStatus::DoorUnreachable, None, &clock, out);
            }
        }

        if let Some(queued) = session.queued_target {
            self.intake(id, queued, grid, out);
        } else {
            self.advance_patrol(id, grid, out);
        }
    }

    fn advance_patrol(&mut self, id: EntityId, grid: &mut GridModel, out: &mut Vec<MovementEvent>) {
        let Some(actor) = self.actors.get_mut(&id) else { return };
        let Some(route) = actor.patrol.as_ref() else { return };
        let Some(next) = route.next_index(actor.patrol_index) else { return };
        let waypoint = route.waypoints[next];
        actor.patrol_index = next;
        self.intake(id, waypoint, grid, out);
    }

    // ── Intake ────────────────────────────────────────────────────────────

    fn intake(
        &mut self,
        id: EntityId,
        target: GridPos,
        grid: &mut GridModel,
        out: &mut Vec<MovementEvent>,
    ) -> MovementStatus {
        let Some(from) = self.position(id) else { return MovementStatus::Idle };
        let result = self.search(id, from, target, grid, true);
        self.start_session(id, target, result, None, out)
    }

    fn start_session(
        &mut self,
        id: EntityId,
        target: GridPos,
        result: PathResult,
        pending_door: Option<PendingDoor>,
        out: &mut Vec<MovementEvent>,
    ) -> MovementStatus {
        let clock = self.clock;
        let Some(actor) = self.actors.get_mut(&id) else { return MovementStatus::Idle };

        if !result.is_movable() {
            let failure = MoveFailure::Unreachable { target };
            fire(actor, MotionInput::PathRejected);
            out.push(MovementEvent::new(
                id,
                &clock,
                EventKind::Blocked { at: actor.position, cell: None, failure: Some(failure) },
            ));
            set_status(actor, MovementStatus::Blocked, Some(failure), &clock, out);
            debug!(actor = %id, %target, "no usable path");
            return MovementStatus::Blocked;
        }

        let mut session = MovementSession::new(result.path, target, result.used_fallback);
        session.pending_door = pending_door;
        let status = session_status(&session);

        out.push(MovementEvent::new(
            id,
            &clock,
            EventKind::MoveStarted {
                target,
                destination: session.destination,
                steps: session.remaining(),
                used_fallback: session.used_fallback,
            },
        ));
        info!(actor = %id, %target, destination = %session.destination, steps = session.remaining(), "move started");

        actor.session = Some(session);
        fire(actor, MotionInput::PathAccepted);
        set_status(actor, status, None, &clock, out);
        status
    }

    // ── Doors ─────────────────────────────────────────────────────────────

    fn run_door_action(
        &mut self,
        id: EntityId,
        pending: PendingDoor,
        grid: &mut GridModel,
        out: &mut Vec<MovementEvent>,
    ) -> MovementStatus {
        let clock = self.clock;
        let Some(credentials) = self.actors.get(&id).map(Actor::credentials) else {
            return MovementStatus::Idle;
        };

        // A door someone else has claimed cannot swing shut on them.
        let claimed = pending.action == DoorAction::Close
            && grid
                .door(pending.door)
                .is_some_and(|door| self.reservations.is_reserved_by_other(door.pos, id));

        let (status, failure) = if claimed {
            (MovementStatus::Blocked, None)
        } else {
            match apply_door_action(grid, pending.door, pending.action, credentials) {
                Some(outcome) => (outcome.status, outcome.failure),
                None => (MovementStatus::DoorUnreachable, None),
            }
        };

        if let Some(actor) = self.actors.get_mut(&id) {
            set_status(actor, status, failure, &clock, out);
        }
        status
    }

    // ── Snapshots ─────────────────────────────────────────────────────────

    /// Capture every actor's in-flight movement state.
    pub fn export_sessions(&self) -> CoordinatorSnapshot {
        let actors = self
            .actors
            .values()
            .map(|actor| {
                let session = actor.session.as_ref();
                ActorSnapshot {
                    id:              actor.id,
                    position:        actor.position,
                    state:           actor.state,
                    status:          actor.status,
                    credentials:     actor.credentials,
                    current_target:  session.map(|s| s.target),
                    destination:     session.map(|s| s.destination),
                    queued_target:   session.and_then(|s| s.queued_target),
                    pending_door:    session.and_then(|s| s.pending_door),
                    repath_attempts: session.map_or(0, |s| s.repath_attempts),
                    patrol:          actor.patrol.clone(),
                    patrol_index:    actor.patrol_index,
                }
            })
            .collect();
        CoordinatorSnapshot { clock: self.clock, actors }
    }

    /// Replace all actors with the ones in `snapshot`.
    ///
    /// Running sessions are re-planned from the saved position; a session
    /// whose target is no longer reachable comes back `blocked`.  Validation
    /// happens before anything is changed.
    pub fn import_sessions(
        &mut self,
        snapshot: CoordinatorSnapshot,
        grid: &mut GridModel,
        out: &mut Vec<MovementEvent>,
    ) -> MobilityResult<()> {
        let mut ids = FxHashSet::default();
        let mut cells = FxHashSet::default();
        for snap in &snapshot.actors {
            if !ids.insert(snap.id) {
                return Err(NavError::DuplicateEntity(snap.id).into());
            }
            if !cells.insert(snap.position) || !self.free_after_clear(snap.id, snap.position, grid) {
                return Err(MobilityError::SpawnBlocked { actor: snap.id, pos: snap.position });
            }
        }

        for (id, actor) in std::mem::take(&mut self.actors) {
            if grid.occupant(actor.position) == Some(id) {
                grid.clear_occupied(actor.position);
            }
        }
        self.reservations.clear();
        self.clock = snapshot.clock;

        for snap in snapshot.actors {
            grid.set_occupied(snap.position, snap.id);
            let mut actor = Actor::new(snap.id, snap.position, snap.credentials);
            actor.state = snap.state;
            actor.status = snap.status;
            actor.patrol = snap.patrol;
            actor.patrol_index = snap.patrol_index;
            let id = snap.id;
            self.actors.insert(id, actor);

            let Some(target) = snap.current_target else {
                if snap.state.is_active() {
                    self.force_state(id, MotionState::Idle);
                }
                continue;
            };

            let result = self.search(id, snap.position, target, grid, true);
            if result.is_movable() {
                let mut session = MovementSession::new(result.path, target, result.used_fallback);
                session.queued_target = snap.queued_target;
                session.pending_door = snap.pending_door;
                session.repath_attempts = snap.repath_attempts;
                let (state, status) = if session.queued_target.is_some() {
                    (MotionState::Queued, MovementStatus::Queued)
                } else {
                    (MotionState::Moving, session_status(&session))
                };
                if let Some(actor) = self.actors.get_mut(&id) {
                    actor.session = Some(session);
                    actor.state = state;
                    actor.status = status;
                }
            } else {
                self.force_state(id, MotionState::Idle);
                self.start_session(id, target, result, None, out);
            }
        }

        info!(actors = self.actors.len(), clock = %self.clock, "sessions imported");
        Ok(())
    }

    fn free_after_clear(&self, id: EntityId, pos: GridPos, grid: &GridModel) -> bool {
        match grid.occupant(pos) {
            Some(owner) if self.actors.contains_key(&owner) => grid.is_walkable(pos, Some(owner)),
            _ => grid.is_walkable(pos, Some(id)),
        }
    }

    fn force_state(&mut self, id: EntityId, state: MotionState) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.state = state;
            actor.status = state.default_status();
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Feed `input` to the actor's state machine, ignoring invalid transitions.
fn fire(actor: &mut Actor, input: MotionInput) {
    match transition(actor.state, input) {
        Some(next) => actor.state = next,
        None => debug!(actor = %actor.id, state = ?actor.state, ?input, "ignored transition"),
    }
}

fn set_status(
    actor: &mut Actor,
    status: MovementStatus,
    failure: Option<MoveFailure>,
    clock: &SimClock,
    out: &mut Vec<MovementEvent>,
) {
    actor.status = status;
    if failure.is_some() {
        actor.last_failure = failure;
    }
    out.push(MovementEvent::new(actor.id, clock, EventKind::StatusChanged { status, failure }));
}

/// Status shown while a session is walking.
fn session_status(session: &MovementSession) -> MovementStatus {
    if session.pending_door.is_some() {
        MovementStatus::MovingToDoor
    } else if session.used_fallback {
        MovementStatus::FallbackPath
    } else {
        MovementStatus::Moving
    }
}
