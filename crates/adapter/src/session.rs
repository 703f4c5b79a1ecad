//! Session: one engine driven by protocol lines.

use log::{debug, warn};

use crate::core::{EngineConfig, EngineError, GameEngine};
use crate::protocol::{
    create_error, create_state, parse_message, recover_seq, ErrorCode, MoveMessage,
    NewGameMessage, ParsedMessage, ServerMessage,
};
use crate::types::Direction;

/// Owns the current game and answers each request line with one reply.
pub struct Session {
    engine: GameEngine,
    default_config: EngineConfig,
    seed: u32,
}

impl Session {
    /// Start a session with a first game already running.
    pub fn new(default_config: EngineConfig, seed: u32) -> Result<Self, EngineError> {
        let engine = GameEngine::with_seed(default_config.clone(), seed)?;
        Ok(Self {
            engine,
            default_config,
            seed,
        })
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Seed of the current game.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// State of the current game under the given `seq`.
    pub fn observe(&self, seq: u64) -> ServerMessage {
        ServerMessage::State(create_state(seq, &self.engine, None))
    }

    /// Handle one protocol line.
    pub fn handle_line(&mut self, line: &str) -> ServerMessage {
        let parsed = match parse_message(line) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("rejecting malformed line: {}", e);
                return ServerMessage::Error(create_error(
                    recover_seq(line),
                    ErrorCode::ParseError,
                    &e.to_string(),
                ));
            }
        };

        match parsed {
            ParsedMessage::NewGame(m) => self.new_game(m),
            ParsedMessage::Move(m) => self.apply_move(m),
            ParsedMessage::Observe(m) => self.observe(m.seq),
            ParsedMessage::Unknown { seq, msg_type } => {
                warn!("unknown message type {:?}", msg_type);
                ServerMessage::Error(create_error(
                    seq,
                    ErrorCode::UnknownType,
                    &format!("unknown message type: {}", msg_type),
                ))
            }
        }
    }

    fn new_game(&mut self, m: NewGameMessage) -> ServerMessage {
        let seed = m.seed.unwrap_or_else(|| self.seed.wrapping_add(1));
        let config = m.config.unwrap_or_else(|| self.default_config.clone());

        match GameEngine::with_seed(config, seed) {
            Ok(engine) => {
                debug!("new game (seed {})", seed);
                self.engine = engine;
                self.seed = seed;
                self.observe(m.seq)
            }
            Err(e) => {
                warn!("new game rejected: {}", e);
                ServerMessage::Error(create_error(m.seq, ErrorCode::InvalidConfig, &e.to_string()))
            }
        }
    }

    fn apply_move(&mut self, m: MoveMessage) -> ServerMessage {
        let Some(direction) = Direction::from_str(&m.direction) else {
            warn!("unknown direction {:?}", m.direction);
            return ServerMessage::Error(create_error(
                m.seq,
                ErrorCode::InvalidArgument,
                &format!("unknown direction: {}", m.direction),
            ));
        };

        let outcome = self.engine.apply_move(direction);
        ServerMessage::State(create_state(m.seq, &self.engine, Some(&outcome)))
    }
}
