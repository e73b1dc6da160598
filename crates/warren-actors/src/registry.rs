//! Construction of actors from kind names.
//!
//! Configuration names actors by kind (`"rabbit"`, `"tortoise"`). The
//! registry maps those names to fresh boxed actors so the driver never
//! matches on concrete types.

use tracing::debug;
use warren_types::ActorKind;

use crate::actor::Actor;
use crate::rabbit::RabbitActor;
use crate::tortoise::TortoiseActor;

/// A constructor for one actor kind.
type Constructor = fn() -> Box<dyn Actor>;

/// Every kind this crate can build, with its constructor.
const REGISTRY: [(ActorKind, Constructor); 2] = [
    (ActorKind::RABBIT, new_rabbit),
    (ActorKind::TORTOISE, new_tortoise),
];

fn new_rabbit() -> Box<dyn Actor> {
    Box::new(RabbitActor::new())
}

fn new_tortoise() -> Box<dyn Actor> {
    Box::new(TortoiseActor::new())
}

/// Build a fresh actor for a kind name. Matching is case-insensitive.
///
/// Returns `None` for names no policy is registered under.
pub fn spawn(kind_name: &str) -> Option<Box<dyn Actor>> {
    let wanted = kind_name.trim().to_lowercase();
    let found = REGISTRY
        .iter()
        .find(|(kind, _)| kind.name() == wanted)
        .map(|(_, construct)| construct());
    if found.is_none() {
        debug!(kind = kind_name, "no actor registered for kind");
    }
    found
}

/// The kinds [`spawn`] understands, in registration order.
pub fn known_kinds() -> Vec<ActorKind> {
    REGISTRY.iter().map(|(kind, _)| *kind).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_registered_kinds() {
        assert_eq!(spawn("rabbit").map(|a| a.kind()), Some(ActorKind::RABBIT));
        assert_eq!(
            spawn("Tortoise ").map(|a| a.kind()),
            Some(ActorKind::TORTOISE)
        );
    }

    #[test]
    fn unknown_kind_is_none() {
        assert!(spawn("fox").is_none());
        assert!(spawn("").is_none());
    }

    #[test]
    fn every_known_kind_spawns_itself() {
        for kind in known_kinds() {
            assert_eq!(spawn(kind.name()).map(|a| a.kind()), Some(kind));
        }
    }
}
