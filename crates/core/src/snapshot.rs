use serde::Serialize;

use crate::types::{Score, Tile};

/// Read-only view of a game, handed to renderers and protocol layers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub size: usize,
    pub grid: Vec<Vec<Tile>>,
    pub score: Score,
    pub won: bool,
    pub over: bool,
    pub moves: u64,
    pub max_tile: Tile,
}

impl GameSnapshot {
    /// Value at `(row, col)`, 0 when out of range.
    pub fn tile(&self, row: usize, col: usize) -> Tile {
        self.grid
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0)
    }

    pub fn playable(&self) -> bool {
        !self.over
    }
}
