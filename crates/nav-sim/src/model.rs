//! The `BehaviorModel` trait, the extension point for actor AI.

use nav_core::ActorRng;
use nav_mobility::Actor;

use crate::{BehaviorContext, Intent};

/// Pluggable actor behavior.
///
/// `decide` is called once per frame for every actor that has no running
/// movement session (idle, arrived, blocked, cancelled, ...).  Actors that
/// are walking are left alone until their session ends.
///
/// Per-actor randomness comes from the supplied [`ActorRng`], so a run is
/// reproducible from its seed whatever the actor count.
///
/// # Example
///
/// ```rust,ignore
/// struct GoHome(GridPos);
///
/// impl BehaviorModel for GoHome {
///     fn decide(&self, actor: &Actor, _ctx: &BehaviorContext<'_>, _rng: &mut ActorRng) -> Vec<Intent> {
///         if actor.position() == self.0 { vec![] } else { vec![Intent::MoveTo(self.0)] }
///     }
/// }
/// ```
pub trait BehaviorModel: Send + Sync + 'static {
    /// Return the intents for `actor` this frame.  An empty `Vec` means
    /// "stay put".
    fn decide(
        &self,
        actor: &Actor,
        ctx:   &BehaviorContext<'_>,
        rng:   &mut ActorRng,
    ) -> Vec<Intent>;
}
