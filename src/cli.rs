//! Command-line options and logging setup shared by the binaries.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Args;
use flexi_logger::{FileSpec, Logger, LoggerHandle};

use crate::core::EngineConfig;
use crate::types::{Tile, DEFAULT_GRID_SIZE, DEFAULT_WIN_VALUE};

/// Game rules selectable from the command line or environment.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// Seed for tile spawns (default: derived from the clock)
    #[arg(long, env = "TUI2048_SEED")]
    pub seed: Option<u32>,

    /// Side length of the grid
    #[arg(long, env = "TUI2048_SIZE", default_value_t = DEFAULT_GRID_SIZE)]
    pub size: usize,

    /// Tile value that wins the game
    #[arg(long, env = "TUI2048_WIN_VALUE", default_value_t = DEFAULT_WIN_VALUE)]
    pub win_value: Tile,
}

impl GameArgs {
    /// Engine config for these options. Validation happens when the engine is built.
    pub fn config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_grid_size(self.size)
            .with_win_value(self.win_value)
    }

    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

/// Low 32 bits of the current time in nanoseconds.
pub fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

/// Log to files under `dir`; RUST_LOG overrides `default_level`.
///
/// The returned handle must stay alive for the logger to keep writing.
pub fn init_file_logging(dir: &Path, default_level: &str) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(default_level)?
        .log_to_file(FileSpec::default().directory(dir))
        .format(flexi_logger::detailed_format)
        .start()?;
    Ok(handle)
}

/// Log to stderr; RUST_LOG overrides `default_level`.
pub fn init_stderr_logging(default_level: &str) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(default_level)?
        .log_to_stderr()
        .format(flexi_logger::colored_default_format)
        .start()?;
    Ok(handle)
}
