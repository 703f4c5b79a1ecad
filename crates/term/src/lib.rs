//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal gameplay. It renders into a simple
//! framebuffer that is flushed to the terminal with crossterm, without any
//! widget or layout library.
//!
//! - [`GameView`] is pure: snapshot in, framebuffer out
//! - [`TerminalRenderer`] owns the terminal and only sends changed cells

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
