//! Board, tiles, and movement for the Warren simulation.
//!
//! This crate models the physical grid: a fixed rectangle of tiles, each
//! holding at most one actor, and the one-actor-per-tick step that senses,
//! decides, and moves.
//!
//! # Modules
//!
//! - [`board`] -- [`Board`] owns every tile and runs [`Board::step`].
//! - [`error`] -- Error types for construction and queries.
//! - [`tile`] -- [`Tile`] occupancy slots and the [`Occupant`] they hold.

pub mod board;
pub mod error;
pub mod tile;

// Re-export primary types at crate root.
pub use board::{ActorBundle, Board, Placement, StepOutcome};
pub use error::WorldError;
pub use tile::{Occupant, Tile};
