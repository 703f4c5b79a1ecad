//! Slide-and-merge of a single line.
//!
//! A line is always given in travel order: tiles slide toward index 0.
//! Merging is single-pass: a tile produced by a merge never merges again in
//! the same move, so `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]` and
//! `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`.
//!
//! Tiles at [`MAX_TILE`] are capped: a pair of them slides but does not merge.

use crate::grid::Line;
use crate::types::{Score, Tile, MAX_TILE};

/// True if two tiles of `value` may merge in a move.
#[inline(always)]
pub fn can_merge(value: Tile) -> bool {
    value != 0 && value < MAX_TILE
}

/// Result of sliding one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMerge {
    /// The line after the slide, same length as the input
    pub cells: Line,
    /// Sum of the values of tiles created by merges
    pub score_gained: Score,
    /// Number of pair merges
    pub merges: u32,
}

impl LineMerge {
    /// True if the slide moved or merged anything.
    pub fn changed(&self, original: &[Tile]) -> bool {
        self.cells.as_slice() != original
    }
}

/// Compact non-empty tiles toward the start, merging equal neighbours once.
///
/// `line` must not be longer than the line buffer capacity.
pub fn slide_and_merge(line: &[Tile]) -> LineMerge {
    let mut cells = Line::new();
    let mut score_gained: Score = 0;
    let mut merges = 0;

    let mut tiles = line.iter().copied().filter(|&v| v != 0).peekable();
    while let Some(value) = tiles.next() {
        if can_merge(value) && tiles.peek() == Some(&value) {
            tiles.next();
            let merged = value * 2;
            cells.push(merged);
            score_gained = score_gained.saturating_add(merged);
            merges += 1;
        } else {
            cells.push(value);
        }
    }

    while cells.len() < line.len() {
        cells.push(0);
    }

    LineMerge {
        cells,
        score_gained,
        merges,
    }
}
