//! Game engine - owns the grid, score and terminal flags
//!
//! This module ties together the grid, the line merge, the spawn RNG and the
//! configuration. It handles the whole move lifecycle:
//!
//! 1. Slide every line toward the move direction.
//! 2. If nothing changed, stop: no score, no spawn, no flag update.
//! 3. Otherwise add the merge gains to the score, spawn one tile, then
//!    update the sticky `won` and `over` flags.
//!
//! Once `over` is set the engine is a fixed point: further moves return the
//! current state untouched.

use arrayvec::ArrayVec;
use log::{debug, info, trace};

use crate::config::EngineConfig;
use crate::error::{is_tile_value, EngineError, GridError};
use crate::grid::Grid;
use crate::merge::slide_and_merge;
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::GameSnapshot;
use crate::types::{Direction, Score, Tile, INITIAL_TILES, MAX_SCORE};

/// A tile placed by a spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnedTile {
    pub row: usize,
    pub col: usize,
    pub value: Tile,
}

/// Result of [`GameEngine::apply_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// True if any line moved or merged
    pub changed: bool,
    /// Score added by this move
    pub score_gained: Score,
    /// Pair merges across all lines
    pub merges: u32,
    /// Tile spawned after the slide, if any
    pub spawned: Option<SpawnedTile>,
    /// State after the move
    pub snapshot: GameSnapshot,
}

/// Grid after sliding, before any spawn.
struct Slide {
    grid: Grid,
    score_gained: Score,
    merges: u32,
    changed: bool,
}

/// The rule engine for one game
#[derive(Debug, Clone)]
pub struct GameEngine<R = SimpleRng> {
    config: EngineConfig,
    grid: Grid,
    score: Score,
    won: bool,
    over: bool,
    /// Accepted (grid-changing) moves so far.
    moves: u64,
    rng: R,
}

impl GameEngine<SimpleRng> {
    /// Create a new game with the default LCG seeded from `seed`.
    pub fn with_seed(config: EngineConfig, seed: u32) -> Result<Self, EngineError> {
        Self::new(config, SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameEngine<R> {
    /// Create a new game: empty grid plus the initial spawns.
    pub fn new(config: EngineConfig, rng: R) -> Result<Self, EngineError> {
        config.validate()?;
        let mut engine = Self {
            grid: Grid::new(config.grid_size),
            config,
            score: 0,
            won: false,
            over: false,
            moves: 0,
            rng,
        };
        engine.initialize();
        Ok(engine)
    }

    /// Resume from an arbitrary position. No tiles are spawned.
    ///
    /// `won` and `over` are derived from the given grid. Cells set through
    /// [`Grid::set`] are checked again, and `score` must not exceed `MAX_SCORE`.
    pub fn from_grid(
        config: EngineConfig,
        grid: Grid,
        score: Score,
        rng: R,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if grid.size() != config.grid_size {
            return Err(GridError::WrongSize {
                expected: config.grid_size,
                actual: grid.size(),
            }
            .into());
        }
        if let Some((index, &value)) = grid
            .cells()
            .iter()
            .enumerate()
            .find(|(_, &v)| v != 0 && !is_tile_value(v))
        {
            return Err(GridError::InvalidTile {
                row: index / grid.size(),
                col: index % grid.size(),
                value,
            }
            .into());
        }
        if score > MAX_SCORE {
            return Err(EngineError::Score { score });
        }

        let won = grid.contains(config.win_value);
        let over = grid.is_stuck();
        Ok(Self {
            config,
            grid,
            score,
            won,
            over,
            moves: 0,
            rng,
        })
    }

    /// Start over on an empty grid with the initial spawns.
    ///
    /// Score, flags and move count reset; the RNG keeps its position.
    pub fn initialize(&mut self) {
        self.grid = Grid::new(self.config.grid_size);
        self.score = 0;
        self.won = false;
        self.over = false;
        self.moves = 0;
        for _ in 0..INITIAL_TILES {
            self.spawn_tile();
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn max_tile(&self) -> Tile {
        self.grid.max_tile()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            size: self.grid.size(),
            grid: self.grid.rows(),
            score: self.score,
            won: self.won,
            over: self.over,
            moves: self.moves,
            max_tile: self.grid.max_tile(),
        }
    }

    /// Place one tile on a uniformly chosen empty cell.
    ///
    /// A full grid is left alone and returns None.
    pub fn spawn_tile(&mut self) -> Option<SpawnedTile> {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            trace!("spawn skipped: grid full");
            return None;
        }

        let (row, col) = empty[self.rng.next_below(empty.len())];
        let value = self.config.draw_tile(&mut self.rng);
        self.grid.set(row, col, value);
        trace!("spawned {} at ({}, {})", value, row, col);
        Some(SpawnedTile { row, col, value })
    }

    /// Slide every tile toward `direction`.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.over {
            trace!("move {} ignored: game over", direction.as_str());
            return self.unchanged();
        }

        let slide = self.slide(direction);
        if !slide.changed {
            trace!("move {} changed nothing", direction.as_str());
            return self.unchanged();
        }

        self.grid = slide.grid;
        self.score = self.score.saturating_add(slide.score_gained);
        self.moves += 1;
        let spawned = self.spawn_tile();

        if !self.won && self.grid.contains(self.config.win_value) {
            self.won = true;
            info!(
                "reached {} after {} moves (score {})",
                self.config.win_value, self.moves, self.score
            );
        }
        if !self.over && self.grid.is_stuck() {
            self.over = true;
            info!(
                "game over after {} moves (score {}, best tile {})",
                self.moves,
                self.score,
                self.grid.max_tile()
            );
        }

        debug!(
            "move {}: {} merges, +{} (score {})",
            direction.as_str(),
            slide.merges,
            slide.score_gained,
            self.score
        );

        MoveOutcome {
            changed: true,
            score_gained: slide.score_gained,
            merges: slide.merges,
            spawned,
            snapshot: self.snapshot(),
        }
    }

    /// True if a move in `direction` would change the grid.
    ///
    /// Does not touch the RNG or any state.
    pub fn can_move(&self, direction: Direction) -> bool {
        if self.over {
            return false;
        }
        (0..self.grid.size()).any(|index| {
            let line = self.grid.read_line(index, direction);
            slide_and_merge(&line).changed(&line)
        })
    }

    /// Directions that would change the grid, in [`Direction::ALL`] order.
    pub fn legal_moves(&self) -> ArrayVec<Direction, 4> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.can_move(dir))
            .collect()
    }

    fn slide(&self, direction: Direction) -> Slide {
        let mut grid = self.grid.clone();
        let mut score_gained: Score = 0;
        let mut merges = 0;
        let mut changed = false;

        for index in 0..self.grid.size() {
            let line = self.grid.read_line(index, direction);
            let merged = slide_and_merge(&line);
            if merged.changed(&line) {
                changed = true;
                grid.write_line(index, direction, &merged.cells);
            }
            score_gained = score_gained.saturating_add(merged.score_gained);
            merges += merged.merges;
        }

        Slide {
            grid,
            score_gained,
            merges,
            changed,
        }
    }

    fn unchanged(&self) -> MoveOutcome {
        MoveOutcome {
            changed: false,
            score_gained: 0,
            merges: 0,
            spawned: None,
            snapshot: self.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TileWeight;
    use crate::types::MAX_TILE;

    /// Always returns the same value; useful for forcing spawn positions.
    struct FixedRng(u32);

    impl RandomSource for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.0
        }
    }

    fn engine_from(rows: &[[Tile; 4]]) -> GameEngine<SimpleRng> {
        let grid = Grid::from_rows(4, rows).unwrap();
        GameEngine::from_grid(EngineConfig::default(), grid, 0, SimpleRng::new(1)).unwrap()
    }

    #[test]
    fn test_new_game_has_two_tiles() {
        for seed in 0..50 {
            let engine = GameEngine::with_seed(EngineConfig::default(), seed).unwrap();
            let grid = engine.grid();
            assert_eq!(grid.count_tiles(), 2, "seed {}", seed);
            assert!(grid.cells().iter().all(|&v| v == 0 || v == 2 || v == 4));
            assert_eq!(engine.score(), 0);
            assert!(!engine.is_won());
            assert!(!engine.is_over());
            assert_eq!(engine.moves(), 0);
        }
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = GameEngine::with_seed(EngineConfig::default(), 777).unwrap();
        let mut b = GameEngine::with_seed(EngineConfig::default(), 777).unwrap();
        assert_eq!(a.grid(), b.grid());
        for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
            assert_eq!(a.apply_move(dir), b.apply_move(dir));
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_grid_size(0);
        assert!(matches!(
            GameEngine::with_seed(config, 1),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_from_grid_size_mismatch() {
        let grid = Grid::new(3);
        let result = GameEngine::from_grid(EngineConfig::default(), grid, 0, SimpleRng::new(1));
        assert!(matches!(
            result,
            Err(EngineError::Grid(GridError::WrongSize {
                expected: 4,
                actual: 3
            }))
        ));
    }

    #[test]
    fn test_from_grid_rechecks_cells_and_score() {
        let mut grid = Grid::new(4);
        grid.set(0, 0, 1 << 63);
        grid.set(0, 1, 1 << 63);
        let result = GameEngine::from_grid(EngineConfig::default(), grid, 0, SimpleRng::new(1));
        assert!(matches!(
            result,
            Err(EngineError::Grid(GridError::InvalidTile { row: 0, col: 0, .. }))
        ));

        let result =
            GameEngine::from_grid(EngineConfig::default(), Grid::new(4), MAX_SCORE, SimpleRng::new(1));
        assert!(result.is_ok());
        let result = GameEngine::from_grid(
            EngineConfig::default(),
            Grid::new(4),
            MAX_SCORE + 1,
            SimpleRng::new(1),
        );
        assert!(matches!(result, Err(EngineError::Score { .. })));
    }

    #[test]
    fn test_capped_tiles_slide_without_merging() {
        let mut engine = engine_from(&[
            [0, MAX_TILE, 0, MAX_TILE],
            [0; 4],
            [0; 4],
            [0; 4],
        ]);
        let outcome = engine.apply_move(Direction::Left);
        assert!(outcome.changed);
        assert_eq!(outcome.merges, 0);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.grid().get(0, 0), Some(MAX_TILE));
        assert_eq!(engine.grid().get(0, 1), Some(MAX_TILE));

        // The capped pair never grows.
        for dir in Direction::ALL {
            engine.apply_move(dir);
        }
        assert_eq!(engine.grid().max_tile(), MAX_TILE);
    }

    #[test]
    fn test_move_left_merges_and_spawns() {
        let mut engine = engine_from(&[[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let outcome = engine.apply_move(Direction::Left);

        assert!(outcome.changed);
        assert_eq!(outcome.score_gained, 4);
        assert_eq!(outcome.merges, 1);
        assert_eq!(engine.score(), 4);
        assert_eq!(engine.grid().get(0, 0), Some(4));
        assert_eq!(engine.grid().count_tiles(), 2);
        assert_eq!(engine.moves(), 1);

        let spawned = outcome.spawned.unwrap();
        assert_eq!(engine.grid().get(spawned.row, spawned.col), Some(spawned.value));
        assert_ne!((spawned.row, spawned.col), (0, 0));
    }

    #[test]
    fn test_move_right_and_down_mirror() {
        let mut engine = engine_from(&[[2, 2, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0], [4, 0, 0, 0]]);
        engine.apply_move(Direction::Right);
        assert_eq!(engine.grid().get(0, 3), Some(4));
        assert_eq!(engine.grid().get(0, 2), Some(2));
        assert_eq!(engine.grid().get(3, 3), Some(4));

        let mut engine = engine_from(&[[8, 0, 0, 0], [8, 0, 0, 0], [8, 0, 0, 0], [0, 0, 0, 0]]);
        engine.apply_move(Direction::Down);
        assert_eq!(engine.grid().get(3, 0), Some(16));
        assert_eq!(engine.grid().get(2, 0), Some(8));
        assert_eq!(engine.score(), 16);
    }

    #[test]
    fn test_no_change_means_no_spawn() {
        let mut engine = engine_from(&[[2, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let before = engine.snapshot();
        let outcome = engine.apply_move(Direction::Left);
        assert!(!outcome.changed);
        assert_eq!(outcome.spawned, None);
        assert_eq!(outcome.snapshot, before);
        assert_eq!(engine.moves(), 0);
    }

    #[test]
    fn test_spawn_on_full_grid_is_noop() {
        let mut engine = engine_from(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let before = engine.grid().clone();
        assert_eq!(engine.spawn_tile(), None);
        assert_eq!(engine.grid(), &before);
    }

    #[test]
    fn test_spawn_uses_injected_rng() {
        // A zero draw picks the first empty cell and the first weight.
        let grid = Grid::from_rows(4, &[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut engine =
            GameEngine::from_grid(EngineConfig::default(), grid, 0, FixedRng(0)).unwrap();
        assert_eq!(
            engine.spawn_tile(),
            Some(SpawnedTile {
                row: 0,
                col: 1,
                value: 2
            })
        );

        // A maximal draw picks the last empty cell and the last weight.
        let grid = Grid::from_rows(4, &[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut engine =
            GameEngine::from_grid(EngineConfig::default(), grid, 0, FixedRng(u32::MAX)).unwrap();
        assert_eq!(
            engine.spawn_tile(),
            Some(SpawnedTile {
                row: 3,
                col: 3,
                value: 4
            })
        );
    }

    #[test]
    fn test_win_is_sticky() {
        let mut engine =
            engine_from(&[[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        engine.apply_move(Direction::Left);
        assert!(engine.is_won());
        assert_eq!(engine.score(), 2048);

        // Merging the 2048 away must not clear the flag.
        let config = EngineConfig::default();
        let grid = Grid::from_rows(4, &[[2048, 2048, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut engine = GameEngine::from_grid(config, grid, 0, SimpleRng::new(3)).unwrap();
        assert!(engine.is_won());
        engine.apply_move(Direction::Left);
        assert!(!engine.grid().contains(2048));
        assert!(engine.is_won());
    }

    #[test]
    fn test_custom_win_value() {
        let config = EngineConfig::default().with_win_value(8);
        let grid = Grid::from_rows(4, &[[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut engine = GameEngine::from_grid(config, grid, 0, SimpleRng::new(1)).unwrap();
        engine.apply_move(Direction::Left);
        assert!(engine.is_won());
    }

    #[test]
    fn test_game_over_detected_after_last_spawn() {
        // Sliding right fills the last gap; spawn weights only produce 2, which
        // lands in the cell that was vacated and leaves no pairs.
        let config =
            EngineConfig::default().with_tile_weights(vec![TileWeight::new(2, 1.0)]);
        let grid = Grid::from_rows(
            4,
            &[[4, 8, 4, 0], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]],
        )
        .unwrap();
        let mut engine = GameEngine::from_grid(config, grid, 0, SimpleRng::new(9)).unwrap();
        assert!(!engine.is_over());

        let outcome = engine.apply_move(Direction::Right);
        assert!(outcome.changed);
        assert_eq!(
            outcome.spawned,
            Some(SpawnedTile {
                row: 0,
                col: 0,
                value: 2
            })
        );
        assert!(engine.is_over());
        assert!(outcome.snapshot.over);
    }

    #[test]
    fn test_over_is_fixed_point() {
        let mut engine = engine_from(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(engine.is_over());
        let before = engine.snapshot();
        for dir in Direction::ALL {
            let outcome = engine.apply_move(dir);
            assert!(!outcome.changed);
            assert_eq!(outcome.snapshot, before);
        }
        assert!(engine.legal_moves().is_empty());
    }

    #[test]
    fn test_initialize_resets_finished_game() {
        let mut engine = engine_from(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(engine.is_over());

        engine.initialize();
        assert!(!engine.is_over());
        assert!(!engine.is_won());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.moves(), 0);
        assert_eq!(engine.grid().count_tiles(), 2);
    }

    #[test]
    fn test_legal_moves_do_not_mutate() {
        let engine = engine_from(&[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = engine.clone();
        let legal = engine.legal_moves();
        assert_eq!(legal.as_slice(), &[Direction::Down, Direction::Right]);
        assert_eq!(engine.snapshot(), before.snapshot());
        assert_eq!(engine.rng, before.rng);
    }
}
