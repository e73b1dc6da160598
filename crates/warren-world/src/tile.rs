//! Tile occupancy slots.
//!
//! A [`Tile`] is identified only by its position in the board's storage and
//! never moves. What changes is its optional [`Occupant`]: the actor living
//! there, paired with the [`ActorId`] the board assigned on placement.

use warren_actors::Actor;
use warren_types::{ActorId, ActorKind, TileSummary};

/// An actor together with its board-assigned identity.
#[derive(Debug)]
pub struct Occupant {
    /// Stable identity, preserved across moves.
    id: ActorId,
    /// The decision policy.
    actor: Box<dyn Actor>,
}

impl Occupant {
    /// Pair an actor with a freshly generated identity.
    pub fn new(actor: Box<dyn Actor>) -> Self {
        Self {
            id: ActorId::new(),
            actor,
        }
    }

    /// The occupant's identity.
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Read-only access to the actor's policy.
    pub fn actor(&self) -> &dyn Actor {
        &*self.actor
    }

    /// The actor's kind tag.
    pub fn kind(&self) -> ActorKind {
        self.actor.kind()
    }
}

/// A single cell. Holds at most one actor.
#[derive(Debug, Default)]
pub struct Tile {
    /// The actor on this tile, if any.
    occupant: Option<Occupant>,
}

impl Tile {
    /// An empty tile.
    pub const fn empty() -> Self {
        Self { occupant: None }
    }

    /// Whether an actor is on this tile.
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// The actor on this tile, if any.
    pub const fn occupant(&self) -> Option<&Occupant> {
        self.occupant.as_ref()
    }

    /// How this tile looks to a neighbor sensing it.
    pub const fn summary(&self) -> TileSummary {
        TileSummary {
            is_passage_open: !self.is_occupied(),
        }
    }

    /// Put an occupant on this tile.
    ///
    /// Returns the previous occupant if the tile was not empty; callers
    /// treat that as a collision.
    pub(crate) fn place(&mut self, occupant: Occupant) -> Option<Occupant> {
        self.occupant.replace(occupant)
    }

    /// Remove and return the occupant, leaving the tile empty.
    pub(crate) fn vacate(&mut self) -> Option<Occupant> {
        self.occupant.take()
    }
}
