//! A no-op behavior model: actors never act on their own.

use nav_core::ActorRng;
use nav_mobility::Actor;

use crate::{BehaviorContext, BehaviorModel, Intent};

/// A [`BehaviorModel`] that always returns an empty intent list.
///
/// Useful when a host drives the coordinator directly or for actors that
/// only follow patrol routes.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn decide(
        &self,
        _actor: &Actor,
        _ctx:   &BehaviorContext<'_>,
        _rng:   &mut ActorRng,
    ) -> Vec<Intent> {
        vec![]
    }
}
