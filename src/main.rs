//! Terminal 2048 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `term`.
//! Logs go to a file because stderr would corrupt the alternate screen.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use tui_2048::cli::{init_file_logging, GameArgs};
use tui_2048::core::{EngineConfig, GameEngine};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_2048::types::GameAction;

#[derive(Parser, Debug)]
#[command(name = "tui-2048", about = "Play 2048 in the terminal")]
struct Cli {
    #[command(flatten)]
    game: GameArgs,

    /// Directory for log files
    #[arg(long, env = "TUI2048_LOG_DIR", default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_file_logging(&cli.log_dir, "info")?;

    let config = cli.game.config();
    let seed = cli.game.seed();
    // Build the first game before touching the terminal so option errors print normally.
    let engine = GameEngine::with_seed(config.clone(), seed).context("invalid game options")?;
    info!("starting {}x{} game (seed {})", config.grid_size, config.grid_size, seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, engine, &config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(
    term: &mut TerminalRenderer,
    mut engine: GameEngine,
    config: &EngineConfig,
    mut seed: u32,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&engine.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    info!(
                        "quit after {} moves (score {})",
                        engine.moves(),
                        engine.score()
                    );
                    return Ok(());
                }

                match handle_key_event(key) {
                    Some(GameAction::Move(direction)) => {
                        engine.apply_move(direction);
                    }
                    Some(GameAction::Restart) => {
                        seed = seed.wrapping_add(1);
                        engine = GameEngine::with_seed(config.clone(), seed)?;
                        info!("restarted (seed {})", seed);
                    }
                    None => {}
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
