//! Random-walk behavior.

use nav_core::{ActorRng, GridPos};
use nav_mobility::Actor;

use crate::{BehaviorContext, BehaviorModel, Intent};

/// Candidate cells sampled per decision before giving up for the frame.
const MAX_SAMPLES: u32 = 8;

/// Idle actors pick a random walkable cell within `radius` (Chebyshev) of
/// where they stand and walk there.
///
/// `rest_chance` is the probability of doing nothing on a given frame, which
/// spaces wanders out at high frame rates.
#[derive(Clone, Copy, Debug)]
pub struct WanderBehavior {
    pub radius:      i32,
    pub rest_chance: f64,
}

impl WanderBehavior {
    pub fn new(radius: i32, rest_chance: f64) -> Self {
        Self { radius: radius.max(1), rest_chance }
    }

    fn sample(&self, from: GridPos, rng: &mut ActorRng) -> GridPos {
        let dx = rng.gen_range(-self.radius..=self.radius);
        let dy = rng.gen_range(-self.radius..=self.radius);
        from.offset(dx, dy)
    }
}

impl Default for WanderBehavior {
    fn default() -> Self {
        Self::new(4, 0.9)
    }
}

impl BehaviorModel for WanderBehavior {
    fn decide(&self, actor: &Actor, ctx: &BehaviorContext<'_>, rng: &mut ActorRng) -> Vec<Intent> {
        if rng.gen_bool(self.rest_chance) {
            return vec![];
        }
        let here = actor.position();
        (0..MAX_SAMPLES)
            .map(|_| self.sample(here, rng))
            .find(|&cell| cell != here && ctx.grid.is_walkable(cell, Some(actor.id())))
            .map(Intent::MoveTo)
            .into_iter()
            .collect()
    }
}
