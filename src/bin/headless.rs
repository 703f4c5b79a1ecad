//! Headless runner: the JSON line protocol on stdin/stdout.
//!
//! stdout carries protocol lines only; logs go to stderr.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tui_2048::adapter::{run, Session};
use tui_2048::cli::{init_stderr_logging, GameArgs};

#[derive(Parser, Debug)]
#[command(
    name = "tui-2048-headless",
    about = "Drive a 2048 engine with line-delimited JSON on stdin/stdout"
)]
struct Cli {
    #[command(flatten)]
    game: GameArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_stderr_logging("warn")?;

    let seed = cli.game.seed();
    let mut session = Session::new(cli.game.config(), seed).context("invalid game options")?;
    info!("headless session started (seed {})", seed);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut session, stdin.lock(), stdout.lock())?;
    Ok(())
}
