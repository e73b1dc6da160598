//! Grid geometry: coordinates, board dimensions, and axis directions.
//!
//! The board is a rectangle of `columns × rows` cells. `x` grows to the
//! right and `y` grows downward, so "up" is `y - 1`. There is no wraparound:
//! a neighbor that falls off the board simply has no tile.

use serde::{Deserialize, Serialize};

/// An integer grid position. Used as the board's tile key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Column index.
    pub x: i64,
    /// Row index.
    pub y: i64,
}

impl Coordinate {
    /// Create a coordinate from its column and row.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The adjacent coordinate one step in `direction`.
    ///
    /// Returns `None` only if the step would overflow `i64`.
    pub const fn neighbor(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        let Some(x) = self.x.checked_add(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add(dy) else {
            return None;
        };
        Some(Self { x, y })
    }

    /// The coordinate above (`y - 1`).
    pub const fn up(self) -> Option<Self> {
        self.neighbor(Direction::Up)
    }

    /// The coordinate below (`y + 1`).
    pub const fn down(self) -> Option<Self> {
        self.neighbor(Direction::Down)
    }

    /// The coordinate to the left (`x - 1`).
    pub const fn left(self) -> Option<Self> {
        self.neighbor(Direction::Left)
    }

    /// The coordinate to the right (`x + 1`).
    pub const fn right(self) -> Option<Self> {
        self.neighbor(Direction::Right)
    }
}

impl core::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Board size, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Number of rows (height).
    pub rows: u32,
    /// Number of columns (width).
    pub columns: u32,
}

impl Dimensions {
    /// Create dimensions from a row and column count.
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Whether `coordinate` lies within `[0, columns) × [0, rows)`.
    pub const fn contains(self, coordinate: Coordinate) -> bool {
        coordinate.x >= 0
            && coordinate.y >= 0
            && coordinate.x < self.columns as i64
            && coordinate.y < self.rows as i64
    }

    /// Flat storage index of `coordinate`, laid out row by row
    /// (`y * columns + x`). `None` for out-of-bounds coordinates.
    pub fn index_of(self, coordinate: Coordinate) -> Option<usize> {
        if !self.contains(coordinate) {
            return None;
        }
        let x = usize::try_from(coordinate.x).ok()?;
        let y = usize::try_from(coordinate.y).ok()?;
        let columns = usize::try_from(self.columns).ok()?;
        y.checked_mul(columns)?.checked_add(x)
    }

    /// Total number of cells. `None` if it does not fit in `usize`.
    pub fn cell_count(self) -> Option<usize> {
        let rows = usize::try_from(self.rows).ok()?;
        let columns = usize::try_from(self.columns).ok()?;
        rows.checked_mul(columns)
    }
}

impl core::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// One of the four axis directions an actor can sense and move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward `y - 1`.
    Up,
    /// Toward `y + 1`.
    Down,
    /// Toward `x - 1`.
    Left,
    /// Toward `x + 1`.
    Right,
}

impl Direction {
    /// All four directions in sensing order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The `(dx, dy)` step for this direction.
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_axis_aligned() {
        let c = Coordinate::new(3, 7);
        assert_eq!(c.up(), Some(Coordinate::new(3, 6)));
        assert_eq!(c.down(), Some(Coordinate::new(3, 8)));
        assert_eq!(c.left(), Some(Coordinate::new(2, 7)));
        assert_eq!(c.right(), Some(Coordinate::new(4, 7)));
    }

    #[test]
    fn neighbors_do_not_wrap() {
        let origin = Coordinate::new(0, 0);
        assert_eq!(origin.up(), Some(Coordinate::new(0, -1)));
        assert_eq!(origin.left(), Some(Coordinate::new(-1, 0)));
    }

    #[test]
    fn neighbor_overflow_is_none() {
        let edge = Coordinate::new(i64::MAX, i64::MIN);
        assert_eq!(edge.right(), None);
        assert_eq!(edge.up(), None);
        assert!(edge.left().is_some());
    }

    #[test]
    fn contains_respects_half_open_bounds() {
        let dims = Dimensions::new(10, 15);
        assert!(dims.contains(Coordinate::new(0, 0)));
        assert!(dims.contains(Coordinate::new(14, 9)));
        assert!(!dims.contains(Coordinate::new(15, 0)));
        assert!(!dims.contains(Coordinate::new(0, 10)));
        assert!(!dims.contains(Coordinate::new(-1, 0)));
    }

    #[test]
    fn index_is_row_major() {
        let dims = Dimensions::new(3, 4);
        assert_eq!(dims.index_of(Coordinate::new(0, 0)), Some(0));
        assert_eq!(dims.index_of(Coordinate::new(3, 0)), Some(3));
        assert_eq!(dims.index_of(Coordinate::new(0, 1)), Some(4));
        assert_eq!(dims.index_of(Coordinate::new(3, 2)), Some(11));
        assert_eq!(dims.index_of(Coordinate::new(4, 2)), None);
        assert_eq!(dims.cell_count(), Some(12));
    }
}
