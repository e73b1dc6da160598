//! Actor decision policies for the Warren simulation.
//!
//! An actor is a pure decision function: given the [`Environment`] sensed
//! around its tile, it returns one [`Action`]. The board never knows which
//! concrete policy it is driving; it only sees the [`Actor`] capability.
//!
//! # Modules
//!
//! - [`actor`] -- The [`Actor`] trait.
//! - [`rabbit`] -- [`RabbitActor`], the reference random walker.
//! - [`tortoise`] -- [`TortoiseActor`], a deterministic wall follower.
//! - [`registry`] -- Construction of actors from kind names.
//!
//! [`Environment`]: warren_types::Environment
//! [`Action`]: warren_types::Action

pub mod actor;
pub mod rabbit;
pub mod registry;
pub mod tortoise;

// Re-export primary types at crate root.
pub use actor::Actor;
pub use rabbit::RabbitActor;
pub use registry::{known_kinds, spawn};
pub use tortoise::TortoiseActor;
