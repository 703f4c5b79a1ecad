//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the complete rule engine of the sliding-tile puzzle.
//! It has **no dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is reachable from a scripted grid
//! - **Portable**: Any presentation layer can drive it (terminal, headless protocol)
//!
//! # Module Structure
//!
//! - [`grid`]: N x N tile matrix with line extraction in travel order
//! - [`merge`]: single-pass slide-and-merge of one line
//! - [`engine`]: move lifecycle, spawning, score and sticky win/over flags
//! - [`config`]: grid size, win value and spawn weights
//! - [`rng`]: injectable random source and the default LCG
//! - [`snapshot`]: read-only state handed to renderers
//!
//! # Game Rules
//!
//! - A new game holds two tiles, each a 2 (90%) or a 4 (10%)
//! - A move slides every row or column; equal neighbours merge once per move
//! - Each merge adds the new tile's value to the score
//! - A move that changes the grid spawns one tile on a random empty cell
//! - Reaching the win value sets `won`; having no empty cell and no equal
//!   neighbours sets `over`. Both flags never clear.
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{EngineConfig, GameEngine};
//! use tui_2048_types::Direction;
//!
//! let mut game = GameEngine::with_seed(EngineConfig::default(), 12345).unwrap();
//! assert_eq!(game.grid().count_tiles(), 2);
//!
//! for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
//!     game.apply_move(dir);
//! }
//!
//! let snap = game.snapshot();
//! assert_eq!(snap.size, 4);
//! assert!(!snap.won);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod merge;
pub mod rng;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use config::{EngineConfig, TileWeight};
pub use engine::{GameEngine, MoveOutcome, SpawnedTile};
pub use error::{ConfigError, EngineError, GridError};
pub use grid::{Grid, Line};
pub use merge::{slide_and_merge, LineMerge};
pub use rng::{RandomSource, SimpleRng};
pub use snapshot::GameSnapshot;
