//! Error types for engine construction.
//!
//! Moves and spawns never fail. The only fallible operations are building an
//! engine from a configuration or from caller-supplied grid data.

use thiserror::Error;

use crate::types::{Score, Tile, MAX_SCORE, MAX_TILE};

/// Rejected engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid size {size} is outside the supported range {min}..={max}")]
    GridSize { size: usize, min: usize, max: usize },

    #[error("at least one spawnable tile weight is required")]
    NoTileWeights,

    #[error("spawn value {0} is not a power of two between 2 and {max}", max = MAX_TILE)]
    InvalidSpawnValue(Tile),

    #[error("spawn probability {probability} for value {value} must be finite and positive")]
    InvalidProbability { value: Tile, probability: f64 },

    #[error("spawn probabilities sum to {0}, expected 1")]
    ProbabilitySum(f64),

    #[error("win value {win_value} must be a power of two above the largest spawn value {max_spawn} and at most {max}", max = MAX_TILE)]
    InvalidWinValue { win_value: Tile, max_spawn: Tile },
}

/// Rejected grid data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("expected {expected} rows, got {actual}")]
    WrongSize { expected: usize, actual: usize },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("cell ({row}, {col}) holds {value}, which is neither empty nor a power of two between 2 and {max}", max = MAX_TILE)]
    InvalidTile { row: usize, col: usize, value: Tile },
}

/// Any failure while constructing an engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),

    #[error("starting score {score} exceeds {max}", max = MAX_SCORE)]
    Score { score: Score },
}

/// True for 2, 4, 8, ... up to `MAX_TILE`.
pub(crate) fn is_tile_value(value: Tile) -> bool {
    (2..=MAX_TILE).contains(&value) && value.is_power_of_two()
}
