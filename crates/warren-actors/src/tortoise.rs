//! A deterministic actor that hugs walls.
//!
//! The tortoise ignores the random source entirely: it checks right, down,
//! left, then up, and takes the first open direction.

use rand::RngCore;
use warren_types::{Action, ActorKind, Direction, Environment};

use crate::actor::Actor;

/// Preference order for the tortoise's moves.
const PREFERENCE: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Up,
];

/// Takes the first open direction in a fixed preference order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TortoiseActor;

impl TortoiseActor {
    /// Create a new tortoise.
    pub const fn new() -> Self {
        Self
    }
}

impl Actor for TortoiseActor {
    fn kind(&self) -> ActorKind {
        ActorKind::TORTOISE
    }

    fn think(&self, environment: &Environment, _rng: &mut dyn RngCore) -> Action {
        PREFERENCE
            .into_iter()
            .find(|direction| environment.field_of_vision.is_open(*direction))
            .map_or(Action::DoNothing, Action::toward)
    }
}
