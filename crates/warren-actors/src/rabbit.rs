//! The reference random-walking actor.
//!
//! A rabbit gathers every direction whose tile exists and is open, then
//! picks one uniformly at random. With nowhere to go it does nothing.

use rand::RngCore;
use rand::seq::IndexedRandom;
use warren_types::{Action, ActorKind, Environment};

use crate::actor::Actor;

/// Moves to a uniformly random open neighbor.
#[derive(Debug, Clone, Copy, Default)]
pub struct RabbitActor;

impl RabbitActor {
    /// Create a new rabbit.
    pub const fn new() -> Self {
        Self
    }
}

impl Actor for RabbitActor {
    fn kind(&self) -> ActorKind {
        ActorKind::RABBIT
    }

    fn think(&self, environment: &Environment, rng: &mut dyn RngCore) -> Action {
        let open = environment.field_of_vision.open_directions();
        open.choose(rng)
            .map_or(Action::DoNothing, |direction| Action::toward(*direction))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use warren_types::{Direction, FieldOfVision, TileSummary};

    use super::*;

    const OPEN: Option<TileSummary> = Some(TileSummary {
        is_passage_open: true,
    });
    const BLOCKED: Option<TileSummary> = Some(TileSummary {
        is_passage_open: false,
    });

    fn env(
        up: Option<TileSummary>,
        down: Option<TileSummary>,
        left: Option<TileSummary>,
        right: Option<TileSummary>,
    ) -> Environment {
        Environment::new(FieldOfVision {
            up,
            down,
            left,
            right,
        })
    }

    #[test]
    fn boxed_in_rabbit_does_nothing() {
        let mut rng = SmallRng::seed_from_u64(42);
        let rabbit = RabbitActor::new();
        assert_eq!(rabbit.think(&env(None, None, None, None), &mut rng), Action::DoNothing);
        assert_eq!(
            rabbit.think(&env(BLOCKED, BLOCKED, BLOCKED, BLOCKED), &mut rng),
            Action::DoNothing
        );
    }

    #[test]
    fn single_exit_is_always_taken() {
        let mut rng = SmallRng::seed_from_u64(7);
        let rabbit = RabbitActor::new();
        let environment = env(None, BLOCKED, OPEN, None);
        for _ in 0..50 {
            assert_eq!(rabbit.think(&environment, &mut rng), Action::MoveLeft);
        }
    }

    #[test]
    fn only_open_directions_are_chosen() {
        let mut rng = SmallRng::seed_from_u64(42);
        let rabbit = RabbitActor::new();
        let environment = env(OPEN, BLOCKED, None, OPEN);

        let mut seen = BTreeSet::new();
        for _ in 0..200 {
            seen.insert(rabbit.think(&environment, &mut rng));
        }
        let expected: BTreeSet<Action> = [Action::MoveUp, Action::MoveRight].into_iter().collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn same_seed_same_choices() {
        let rabbit = RabbitActor::new();
        let environment = env(OPEN, OPEN, OPEN, OPEN);

        for seed in [1_u64, 42, 999] {
            let mut a = SmallRng::seed_from_u64(seed);
            let mut b = SmallRng::seed_from_u64(seed);
            let first: Vec<Action> = (0..20).map(|_| rabbit.think(&environment, &mut a)).collect();
            let second: Vec<Action> = (0..20).map(|_| rabbit.think(&environment, &mut b)).collect();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn all_four_directions_reachable() {
        let mut rng = SmallRng::seed_from_u64(3);
        let rabbit = RabbitActor::new();
        let environment = env(OPEN, OPEN, OPEN, OPEN);
        let seen: BTreeSet<Option<Direction>> = (0..400)
            .map(|_| rabbit.think(&environment, &mut rng).direction())
            .collect();
        assert_eq!(seen.len(), 4);
        assert!(!seen.contains(&None));
    }

    #[test]
    fn kind_is_rabbit() {
        assert_eq!(RabbitActor::new().kind(), ActorKind::RABBIT);
    }
}
