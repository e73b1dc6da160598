//! Enumeration and tag types for the Warren simulation.

use serde::{Deserialize, Serialize};

use crate::geometry::Direction;

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// A directive returned by an actor's decision function.
///
/// [`Action::DoNothing`] is always available; a move into a closed
/// direction resolves to no board mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Move one cell toward `y - 1`.
    MoveUp,
    /// Move one cell toward `y + 1`.
    MoveDown,
    /// Move one cell toward `x - 1`.
    MoveLeft,
    /// Move one cell toward `x + 1`.
    MoveRight,
    /// Stay put.
    DoNothing,
}

impl Action {
    /// The move action for a direction.
    pub const fn toward(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::MoveUp,
            Direction::Down => Self::MoveDown,
            Direction::Left => Self::MoveLeft,
            Direction::Right => Self::MoveRight,
        }
    }

    /// The direction of a move, or `None` for [`Action::DoNothing`].
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::MoveUp => Some(Direction::Up),
            Self::MoveDown => Some(Direction::Down),
            Self::MoveLeft => Some(Direction::Left),
            Self::MoveRight => Some(Direction::Right),
            Self::DoNothing => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Actor kinds
// ---------------------------------------------------------------------------

/// Tag naming an actor's kind (e.g. `"rabbit"`).
///
/// Kinds are an open set: any actor implementation picks its own tag, and
/// lookups keyed by kind (render glyphs, kind counts) never inspect the
/// concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ActorKind(&'static str);

impl ActorKind {
    /// The reference random-walking kind.
    pub const RABBIT: Self = Self("rabbit");

    /// The deterministic wall-following kind.
    pub const TORTOISE: Self = Self("tortoise");

    /// Create a kind tag from a static name.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The tag's name.
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl core::fmt::Display for ActorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_actions_map_back_to_their_direction() {
        for direction in Direction::ALL {
            assert_eq!(Action::toward(direction).direction(), Some(direction));
        }
        assert_eq!(Action::DoNothing.direction(), None);
    }

    #[test]
    fn action_serializes_snake_case() {
        let json = serde_json::to_string(&Action::DoNothing).ok();
        assert_eq!(json.as_deref(), Some("\"do_nothing\""));
    }

    #[test]
    fn kind_serializes_as_its_name() {
        let json = serde_json::to_string(&ActorKind::RABBIT).ok();
        assert_eq!(json.as_deref(), Some("\"rabbit\""));
        assert_eq!(ActorKind::TORTOISE.to_string(), "tortoise");
    }
}
