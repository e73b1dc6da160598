//! The board: every tile, and the one-actor-per-tick step.
//!
//! Tiles live in a flat `Vec<Tile>` indexed by `y * columns + x`, so each
//! row is a contiguous slice. The board hands out shared references only;
//! the single way to change occupancy after construction is [`Board::step`].
//!
//! # Step protocol
//!
//! 1. Enumerate every actor on the board (full scan).
//! 2. Pick **one** of them uniformly at random. Only that actor acts.
//! 3. Sense its four neighbors: no tile means closed, otherwise open when
//!    the tile is unoccupied.
//! 4. Ask the actor to think.
//! 5. If it chose a direction that was sensed open, move it there.
//!    Anything else leaves the board untouched.
//!
//! Because a single actor resolves per step and the board is borrowed
//! mutably for the whole call, the sensed openness cannot go stale between
//! sensing and moving.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, trace};
use warren_actors::Actor;
use warren_types::{
    Action, ActorId, ActorKind, Coordinate, Dimensions, Direction, Environment, FieldOfVision,
};

use crate::error::WorldError;
use crate::tile::{Occupant, Tile};

/// An actor and where to put it when the board is built.
#[derive(Debug)]
pub struct Placement {
    /// The actor to place.
    pub actor: Box<dyn Actor>,
    /// Where it starts.
    pub coordinate: Coordinate,
}

impl Placement {
    /// Pair an actor with its starting coordinate.
    pub fn new(actor: Box<dyn Actor>, coordinate: Coordinate) -> Self {
        Self { actor, coordinate }
    }
}

/// A transient view of one actor and where it currently stands.
///
/// Bundles borrow the board, so they are recomputed after every step.
#[derive(Debug, Clone, Copy)]
pub struct ActorBundle<'a> {
    /// The actor's identity.
    pub id: ActorId,
    /// The actor's policy.
    pub actor: &'a dyn Actor,
    /// The actor's current coordinate.
    pub coordinate: Coordinate,
}

impl ActorBundle<'_> {
    /// The actor's kind tag.
    pub fn kind(&self) -> ActorKind {
        self.actor.kind()
    }
}

/// What happened during one [`Board::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The board had no actors, so nothing was selected.
    Idle,
    /// One actor was selected and its action resolved.
    Resolved {
        /// The selected actor.
        actor: ActorId,
        /// Its kind.
        kind: ActorKind,
        /// What it decided.
        action: Action,
        /// What it sensed before deciding.
        field_of_vision: FieldOfVision,
        /// Where it stood before the step.
        from: Coordinate,
        /// Where it stands after the step (equal to `from` if it stayed).
        to: Coordinate,
    },
}

impl StepOutcome {
    /// Whether an actor changed tiles.
    pub fn moved(&self) -> bool {
        match self {
            Self::Idle => false,
            Self::Resolved { from, to, .. } => from != to,
        }
    }
}

/// The simulation grid.
#[derive(Debug)]
pub struct Board {
    /// Fixed size of the grid.
    dimensions: Dimensions,
    /// One tile per in-bounds coordinate, row by row.
    tiles: Vec<Tile>,
}

impl Board {
    /// Build an all-empty board, then place every initial actor.
    ///
    /// # Errors
    ///
    /// - [`WorldError::InvalidDimensions`] if either dimension is zero.
    /// - [`WorldError::PlacementOutOfBounds`] if a placement lies outside
    ///   `[0, columns) × [0, rows)`.
    /// - [`WorldError::PlacementCollision`] if two placements share a
    ///   coordinate.
    pub fn new(
        columns: u32,
        rows: u32,
        placements: impl IntoIterator<Item = Placement>,
    ) -> Result<Self, WorldError> {
        let dimensions = Dimensions::new(rows, columns);
        if rows == 0 || columns == 0 {
            return Err(WorldError::InvalidDimensions { dimensions });
        }
        let cell_count = dimensions
            .cell_count()
            .ok_or(WorldError::InvalidDimensions { dimensions })?;

        let mut tiles = Vec::with_capacity(cell_count);
        tiles.resize_with(cell_count, Tile::empty);
        let mut board = Self { dimensions, tiles };

        for placement in placements {
            board.place(placement)?;
        }

        debug!(
            %dimensions,
            actors = board.actor_count(),
            "Board constructed"
        );
        Ok(board)
    }

    /// Place one initial actor on an empty in-bounds tile.
    fn place(&mut self, placement: Placement) -> Result<(), WorldError> {
        let Placement { actor, coordinate } = placement;
        let dimensions = self.dimensions;
        let tile = dimensions
            .index_of(coordinate)
            .and_then(|index| self.tiles.get_mut(index))
            .ok_or(WorldError::PlacementOutOfBounds {
                coordinate,
                dimensions,
            })?;
        if tile.is_occupied() {
            return Err(WorldError::PlacementCollision { coordinate });
        }
        let _ = tile.place(Occupant::new(actor));
        Ok(())
    }

    /// The board's fixed size.
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The tiles of one row, left to right by column.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::RowOutOfRange`] if `row >= rows`.
    pub fn tiles_for_row(&self, row: u32) -> Result<&[Tile], WorldError> {
        let out_of_range = WorldError::RowOutOfRange {
            row,
            rows: self.dimensions.rows,
        };
        if row >= self.dimensions.rows {
            return Err(out_of_range);
        }
        let columns = usize::try_from(self.dimensions.columns)
            .map_err(|_err| out_of_range.clone())?;
        let start = usize::try_from(row)
            .ok()
            .and_then(|r| r.checked_mul(columns))
            .ok_or_else(|| out_of_range.clone())?;
        let end = start.checked_add(columns).ok_or_else(|| out_of_range.clone())?;
        self.tiles.get(start..end).ok_or(out_of_range)
    }

    /// The tile at `coordinate`, or `None` outside the board.
    pub fn tile(&self, coordinate: Coordinate) -> Option<&Tile> {
        self.dimensions
            .index_of(coordinate)
            .and_then(|index| self.tiles.get(index))
    }

    /// Every actor and its coordinate.
    ///
    /// Scans columns left to right and, within each column, rows top to
    /// bottom. The order depends only on positions, never on placement order.
    pub fn actor_bundles(&self) -> Vec<ActorBundle<'_>> {
        let mut bundles = Vec::new();
        for x in 0..i64::from(self.dimensions.columns) {
            for y in 0..i64::from(self.dimensions.rows) {
                let coordinate = Coordinate::new(x, y);
                if let Some(occupant) = self.tile(coordinate).and_then(Tile::occupant) {
                    bundles.push(ActorBundle {
                        id: occupant.id(),
                        actor: occupant.actor(),
                        coordinate,
                    });
                }
            }
        }
        bundles
    }

    /// Number of occupied tiles.
    pub fn actor_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_occupied()).count()
    }

    /// What an actor standing at `coordinate` would sense.
    ///
    /// Directions leading off the board have no tile and come back `None`.
    pub fn field_of_vision(&self, coordinate: Coordinate) -> FieldOfVision {
        let mut field_of_vision = FieldOfVision::default();
        for direction in Direction::ALL {
            let summary = coordinate
                .neighbor(direction)
                .and_then(|neighbor| self.tile(neighbor))
                .map(Tile::summary);
            field_of_vision.set(direction, summary);
        }
        field_of_vision
    }

    /// Advance the simulation by one tick.
    ///
    /// Exactly one randomly selected actor senses, decides, and possibly
    /// moves. All randomness (selection and the actor's own choices) comes
    /// from `rng`.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> StepOutcome {
        let bundles = self.actor_bundles();
        let Some(chosen) = bundles.choose(rng) else {
            trace!("No actors on the board, step is idle");
            return StepOutcome::Idle;
        };

        let id = chosen.id;
        let kind = chosen.kind();
        let from = chosen.coordinate;
        let field_of_vision = self.field_of_vision(from);
        trace!(actor = %id, %from, ?field_of_vision, "Actor sensed surroundings");

        let action = chosen.actor.think(&Environment::new(field_of_vision), rng);

        let destination = action
            .direction()
            .filter(|direction| field_of_vision.is_open(*direction))
            .and_then(|direction| from.neighbor(direction));

        let to = match destination {
            Some(destination) if self.relocate(from, destination) => destination,
            _ => from,
        };

        debug!(
            actor = %id,
            %kind,
            ?action,
            %from,
            %to,
            moved = from != to,
            "Step resolved"
        );

        StepOutcome::Resolved {
            actor: id,
            kind,
            action,
            field_of_vision,
            from,
            to,
        }
    }

    /// Move the occupant of `from` onto the empty tile at `to`.
    ///
    /// Returns `false` and leaves the board unchanged if either tile is
    /// missing, `from` is empty, or `to` is occupied.
    fn relocate(&mut self, from: Coordinate, to: Coordinate) -> bool {
        let (Some(from_index), Some(to_index)) = (
            self.dimensions.index_of(from),
            self.dimensions.index_of(to),
        ) else {
            return false;
        };
        if self.tiles.get(to_index).is_none_or(Tile::is_occupied) {
            return false;
        }
        let Some(occupant) = self.tiles.get_mut(from_index).and_then(Tile::vacate) else {
            return false;
        };
        match self.tiles.get_mut(to_index) {
            Some(destination) => {
                let _ = destination.place(occupant);
                true
            }
            None => {
                if let Some(origin) = self.tiles.get_mut(from_index) {
                    let _ = origin.place(occupant);
                }
                false
            }
        }
    }
}
