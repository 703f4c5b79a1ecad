//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{is_tile_value, ConfigError};
use crate::rng::RandomSource;
use crate::types::{Tile, DEFAULT_GRID_SIZE, DEFAULT_TILE_WEIGHTS, DEFAULT_WIN_VALUE, MAX_GRID_SIZE, MIN_GRID_SIZE};

/// Tolerance when checking that spawn probabilities sum to one.
const PROBABILITY_EPSILON: f64 = 1e-6;

/// One entry of the spawn distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileWeight {
    pub value: Tile,
    pub probability: f64,
}

impl TileWeight {
    pub const fn new(value: Tile, probability: f64) -> Self {
        Self { value, probability }
    }
}

/// Configuration for a game
///
/// Missing fields fall back to the classic rules when deserialized, so
/// `{"grid_size": 5}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Tile value that marks the game as won
    pub win_value: Tile,
    /// Spawn distribution, drawn in order
    pub tile_weights: Vec<TileWeight>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            win_value: DEFAULT_WIN_VALUE,
            tile_weights: DEFAULT_TILE_WEIGHTS
                .iter()
                .map(|&(value, probability)| TileWeight::new(value, probability))
                .collect(),
        }
    }
}

impl EngineConfig {
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_win_value(mut self, win_value: Tile) -> Self {
        self.win_value = win_value;
        self
    }

    pub fn with_tile_weights(mut self, tile_weights: Vec<TileWeight>) -> Self {
        self.tile_weights = tile_weights;
        self
    }

    /// Check every rule the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize {
                size: self.grid_size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }

        if self.tile_weights.is_empty() {
            return Err(ConfigError::NoTileWeights);
        }

        let mut total = 0.0;
        for weight in &self.tile_weights {
            if !is_tile_value(weight.value) {
                return Err(ConfigError::InvalidSpawnValue(weight.value));
            }
            if !weight.probability.is_finite() || weight.probability <= 0.0 {
                return Err(ConfigError::InvalidProbability {
                    value: weight.value,
                    probability: weight.probability,
                });
            }
            total += weight.probability;
        }
        if (total - 1.0).abs() > PROBABILITY_EPSILON {
            return Err(ConfigError::ProbabilitySum(total));
        }

        let max_spawn = self.max_spawn_value();
        if !is_tile_value(self.win_value) || self.win_value <= max_spawn {
            return Err(ConfigError::InvalidWinValue {
                win_value: self.win_value,
                max_spawn,
            });
        }

        Ok(())
    }

    /// Largest value a spawn can produce.
    pub fn max_spawn_value(&self) -> Tile {
        self.tile_weights.iter().map(|w| w.value).max().unwrap_or(0)
    }

    /// Weighted draw of a spawn value.
    ///
    /// Walks the cumulative distribution; rounding slack lands on the last entry.
    pub(crate) fn draw_tile<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Tile {
        let roll = rng.next_unit();
        let mut cumulative = 0.0;
        for weight in &self.tile_weights {
            cumulative += weight.probability;
            if roll < cumulative {
                return weight.value;
            }
        }
        self.tile_weights.last().map(|w| w.value).unwrap_or(2)
    }
}
