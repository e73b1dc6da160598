//! Error types for the `warren-world` crate.
//!
//! Every failure here is caller misuse: a board built with bad placements
//! or a query outside the board. None of them are retried.

use warren_types::{Coordinate, Dimensions};

/// Errors that can occur during board construction and queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The board would have no cells, or more than fit in memory indexing.
    #[error("invalid board dimensions: {dimensions}")]
    InvalidDimensions {
        /// The rejected dimensions.
        dimensions: Dimensions,
    },

    /// An initial placement lies outside the board.
    #[error("placement at {coordinate} is outside the {dimensions} board")]
    PlacementOutOfBounds {
        /// The offending coordinate.
        coordinate: Coordinate,
        /// The board's dimensions.
        dimensions: Dimensions,
    },

    /// Two initial placements share a coordinate.
    #[error("more than one actor placed at {coordinate}")]
    PlacementCollision {
        /// The contested coordinate.
        coordinate: Coordinate,
    },

    /// A row query fell outside `[0, rows)`.
    #[error("row {row} is out of range (board has {rows} rows)")]
    RowOutOfRange {
        /// The requested row.
        row: u32,
        /// Number of rows on the board.
        rows: u32,
    },
}
