//! Perception types handed to an actor when it is asked to decide.
//!
//! The environment is the **only** information an actor receives about the
//! board. It is built fresh from board state immediately before each
//! decision and never stored.

use serde::{Deserialize, Serialize};

use crate::geometry::Direction;

/// What an actor can tell about one adjacent tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSummary {
    /// `true` when the tile exists and has no occupant.
    pub is_passage_open: bool,
}

/// Openness of the four axis-adjacent tiles.
///
/// A `None` slot means there is no tile in that direction (the edge of the
/// board), which an actor must treat as closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FieldOfVision {
    /// Tile at `y - 1`.
    pub up: Option<TileSummary>,
    /// Tile at `y + 1`.
    pub down: Option<TileSummary>,
    /// Tile at `x - 1`.
    pub left: Option<TileSummary>,
    /// Tile at `x + 1`.
    pub right: Option<TileSummary>,
}

impl FieldOfVision {
    /// The sensed tile in `direction`, if one exists.
    pub const fn get(&self, direction: Direction) -> Option<TileSummary> {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Set the sensed tile in `direction`.
    pub const fn set(&mut self, direction: Direction, summary: Option<TileSummary>) {
        match direction {
            Direction::Up => self.up = summary,
            Direction::Down => self.down = summary,
            Direction::Left => self.left = summary,
            Direction::Right => self.right = summary,
        }
    }

    /// Whether a tile exists in `direction` and is unoccupied.
    pub fn is_open(&self, direction: Direction) -> bool {
        self.get(direction).is_some_and(|tile| tile.is_passage_open)
    }

    /// The open directions, in [`Direction::ALL`] order.
    pub fn open_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|direction| self.is_open(*direction))
            .collect()
    }
}

/// Everything an actor is given when asked to decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Environment {
    /// The four adjacent tiles.
    pub field_of_vision: FieldOfVision,
}

impl Environment {
    /// Wrap a field of vision.
    pub const fn new(field_of_vision: FieldOfVision) -> Self {
        Self { field_of_vision }
    }
}
