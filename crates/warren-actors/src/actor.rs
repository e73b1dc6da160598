//! The actor capability trait.
//!
//! Every tick the board picks one actor, senses the four tiles around it,
//! and asks it to [`think`]. Implementations may consult the supplied random
//! source but must not keep hidden state that changes the outcome for the
//! same environment and random stream.
//!
//! [`think`]: Actor::think

use rand::RngCore;
use warren_types::{Action, ActorKind, Environment};

/// A polymorphic simulation entity.
pub trait Actor: core::fmt::Debug + Send + Sync {
    /// The tag used for rendering and kind-based statistics.
    fn kind(&self) -> ActorKind;

    /// Choose an action for the sensed environment.
    ///
    /// Randomness must come from `rng` so that seeded runs are reproducible.
    fn think(&self, environment: &Environment, rng: &mut dyn RngCore) -> Action;
}
