//! Text rendering of the board.
//!
//! Frames are drawn with box-drawing borders, one character per tile:
//!
//! ```text
//! ╔═════╗
//! ║  r  ║
//! ║    t║
//! ╚═════╝
//! ```
//!
//! Rendering only reads the board through its dimensions and row slices.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use warren_types::ActorKind;
use warren_world::{Board, Tile, WorldError};

/// Glyph for a tile with no occupant.
pub const EMPTY_GLYPH: char = ' ';

/// Glyph for kinds missing from the table.
pub const UNKNOWN_GLYPH: char = '?';

/// Per-kind glyph lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable {
    glyphs: BTreeMap<String, char>,
}

impl Default for GlyphTable {
    fn default() -> Self {
        let mut glyphs = BTreeMap::new();
        glyphs.insert(ActorKind::RABBIT.name().to_owned(), 'r');
        glyphs.insert(ActorKind::TORTOISE.name().to_owned(), 't');
        Self { glyphs }
    }
}

impl GlyphTable {
    /// The default table with `overrides` applied on top.
    pub fn with_overrides(overrides: &BTreeMap<String, char>) -> Self {
        let mut table = Self::default();
        for (kind, glyph) in overrides {
            table.glyphs.insert(kind.trim().to_ascii_lowercase(), *glyph);
        }
        table
    }

    /// Glyph for `kind`, or [`UNKNOWN_GLYPH`].
    pub fn glyph(&self, kind: ActorKind) -> char {
        self.glyphs.get(kind.name()).copied().unwrap_or(UNKNOWN_GLYPH)
    }

    fn tile_glyph(&self, tile: &Tile) -> char {
        tile.occupant()
            .map_or(EMPTY_GLYPH, |occupant| self.glyph(occupant.kind()))
    }
}

fn border(out: &mut String, left: char, right: char, columns: u32) {
    out.push(left);
    for _ in 0..columns {
        out.push('═');
    }
    out.push(right);
    out.push('\n');
}

/// Draw one frame of `board`. The result ends with a newline.
///
/// # Errors
///
/// Returns [`WorldError::RowOutOfRange`] only if the board reports rows it
/// cannot produce, which a well-formed board never does.
pub fn render_frame(board: &Board, glyphs: &GlyphTable) -> Result<String, WorldError> {
    let dimensions = board.dimensions();
    let mut out = String::new();

    border(&mut out, '╔', '╗', dimensions.columns);
    for row in 0..dimensions.rows {
        out.push('║');
        for tile in board.tiles_for_row(row)? {
            out.push(glyphs.tile_glyph(tile));
        }
        out.push('║');
        out.push('\n');
    }
    border(&mut out, '╚', '╝', dimensions.columns);

    Ok(out)
}

/// Draw a frame headed by the tick number.
///
/// # Errors
///
/// See [`render_frame`].
pub fn render_tick(board: &Board, glyphs: &GlyphTable, tick: u64) -> Result<String, WorldError> {
    let mut out = String::new();
    let _ = writeln!(out, "tick {tick}");
    out.push_str(&render_frame(board, glyphs)?);
    Ok(out)
}
