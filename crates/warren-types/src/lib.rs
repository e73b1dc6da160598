//! Shared type definitions for the Warren simulation.
//!
//! This crate is the single source of truth for the value types that flow
//! between the board, the actor policies, and the statistics pipeline.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for actor identity
//! - [`geometry`] -- Grid coordinates, board dimensions, and axis directions
//! - [`enums`] -- Actions and actor kind tags
//! - [`perception`] -- Field of vision and environment handed to actors

pub mod enums;
pub mod geometry;
pub mod ids;
pub mod perception;

// Re-export all public types at crate root for convenience.
pub use enums::{Action, ActorKind};
pub use geometry::{Coordinate, Dimensions, Direction};
pub use ids::ActorId;
pub use perception::{Environment, FieldOfVision, TileSummary};
