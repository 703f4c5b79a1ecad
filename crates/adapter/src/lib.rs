//! Adapter module - headless control via line-delimited JSON
//!
//! This module lets an external presentation layer or agent drive one game
//! over any byte stream. The `tui-2048-headless` binary wires it to
//! stdin/stdout.
//!
//! # Protocol Overview
//!
//! One JSON object per line in each direction:
//!
//! 1. **Startup**: the engine writes the initial `state` with `seq` 0
//! 2. **Requests**: the client sends `new`, `move` or `observe`
//! 3. **Replies**: exactly one `state` or `error` per request, echoing `seq`
//!
//! # Message Types
//!
//! ## Client → Engine
//!
//! - **new**: discard the game and start another (optional `seed`, optional partial `config`)
//! - **move**: slide in `direction` (`up`, `down`, `left`, `right`)
//! - **observe**: report the current state
//!
//! ## Engine → Client
//!
//! - **state**: grid, score, flags, move count and legal moves
//! - **error**: `parse_error`, `invalid_argument`, `invalid_config` or `unknown_type`
//!
//! # Example Protocol Flow
//!
//! ```text
//! Engine -> Client: {"type":"state","seq":0,"changed":false,"score_gained":0,"grid":[[0,2,0,0],...],...}
//! Client -> Engine: {"type":"move","seq":1,"direction":"left"}
//! Engine -> Client: {"type":"state","seq":1,"changed":true,"score_gained":0,...}
//! Client -> Engine: {"type":"move","seq":2,"direction":"north"}
//! Engine -> Client: {"type":"error","seq":2,"code":"invalid_argument","message":"unknown direction: north"}
//! ```

pub mod protocol;
pub mod runtime;
pub mod session;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use runtime::run;
pub use session::Session;
