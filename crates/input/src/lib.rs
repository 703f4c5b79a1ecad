//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Key
//! auto-repeat is left to the terminal: every press is one discrete move.

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_key_event, should_quit};
