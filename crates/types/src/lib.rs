//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, headless protocol).
//!
//! # Grid Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_GRID_SIZE` | 4 | Side length of the square grid |
//! | `MIN_GRID_SIZE` | 2 | Smallest accepted side length |
//! | `MAX_GRID_SIZE` | 8 | Largest accepted side length (line buffer capacity) |
//! | `DEFAULT_WIN_VALUE` | 2048 | Tile value that marks the game as won |
//! | `INITIAL_TILES` | 2 | Tiles spawned when a game is created |
//! | `MAX_TILE` | 2^40 | Largest tile; two of these never merge |
//! | `MAX_SCORE` | 2^62 | Largest score a resumed game may start from |
//!
//! # Spawn Weights
//!
//! New tiles are a 2 with probability 0.9 and a 4 with probability 0.1
//! (see [`DEFAULT_TILE_WEIGHTS`]).
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, DEFAULT_GRID_SIZE};
//!
//! // Parse from string (case-insensitive)
//! let dir = Direction::from_str("Left").unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert!(dir.is_horizontal());
//!
//! let action = GameAction::Move(Direction::Down);
//! assert_eq!(action.direction(), Some(Direction::Down));
//!
//! assert_eq!(DEFAULT_GRID_SIZE, 4);
//! ```

/// Value held by a grid cell. `0` is empty; anything else is a power of two.
pub type Tile = u64;

/// Accumulated score.
pub type Score = u64;

/// Default side length of the grid (4x4)
pub const DEFAULT_GRID_SIZE: usize = 4;

/// Smallest grid the engine accepts
pub const MIN_GRID_SIZE: usize = 2;

/// Largest grid the engine accepts.
///
/// Lines are processed in fixed-capacity buffers of this length.
pub const MAX_GRID_SIZE: usize = 8;

/// Tile value that wins the game
pub const DEFAULT_WIN_VALUE: Tile = 2048;

/// Number of tiles placed on a fresh grid
pub const INITIAL_TILES: usize = 2;

/// Largest tile value the engine holds.
///
/// A pair of `MAX_TILE` tiles does not merge, so tile arithmetic never
/// overflows. Spawn values, win values and caller-supplied grids are bounded
/// by it.
pub const MAX_TILE: Tile = 1 << 40;

/// Largest starting score accepted when resuming a game.
pub const MAX_SCORE: Score = 1 << 62;

/// Default spawn distribution as `(value, probability)` pairs
pub const DEFAULT_TILE_WEIGHTS: [(Tile, f64); 2] = [(2, 0.9), (4, 0.1)];

/// The four slide directions
///
/// - **Left/Right** slide every row
/// - **Up/Down** slide every column
///
/// Right and down read each line back to front, so the merge algorithm can
/// always slide toward the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order the protocol reports legal moves.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "up" | "u", "down" | "d",
    /// "left" | "l", "right" | "r".
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("up"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("D"), Some(Direction::Down));
    /// assert_eq!(Direction::from_str("north"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// True for moves that slide rows (left/right).
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when lines are read back to front (right/down).
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// Player-level actions produced by input mapping
///
/// `Restart` is handled by the caller: it discards the engine and builds a
/// fresh one. The engine itself has no partial reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide all tiles in a direction
    Move(Direction),
    /// Start a new game
    Restart,
}

impl GameAction {
    /// The direction carried by a move action.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            GameAction::Move(dir) => Some(*dir),
            GameAction::Restart => None,
        }
    }
}
