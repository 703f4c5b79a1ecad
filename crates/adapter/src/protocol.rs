//! Protocol module - JSON message types for the headless adapter
//!
//! Line-delimited JSON. Every message has `type` and `seq`; replies echo the
//! `seq` of the request they answer.

use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, GameEngine, MoveOutcome, RandomSource};
use crate::types::{Score, Tile};

// ============== Client -> Engine Messages ==============

/// Start a fresh game, discarding the current one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGameMessage {
    pub seq: u64,
    /// Seed for the spawn RNG. Omitted: the previous seed plus one.
    #[serde(default)]
    pub seed: Option<u32>,
    /// Omitted: the config the session started with, not the one of the game
    /// in play. A custom config applies to this game only. Partial objects fill
    /// in the classic defaults.
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

/// Slide in a direction.
///
/// The direction stays a string here so an unknown value can be reported as
/// `invalid_argument` rather than a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveMessage {
    pub seq: u64,
    pub direction: String,
}

/// Request the current state without changing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObserveMessage {
    pub seq: u64,
}

/// A decoded client line.
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    NewGame(NewGameMessage),
    Move(MoveMessage),
    Observe(ObserveMessage),
    /// Well-formed JSON with a type this protocol does not know.
    Unknown { seq: u64, msg_type: String },
}

/// Decode one line.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "new")]
        NewGame(NewGameMessage),
        #[serde(rename = "move")]
        Move(MoveMessage),
        #[serde(rename = "observe")]
        Observe(ObserveMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::NewGame(m)) => Ok(ParsedMessage::NewGame(m)),
        Ok(InboundMessage::Move(m)) => Ok(ParsedMessage::Move(m)),
        Ok(InboundMessage::Observe(m)) => Ok(ParsedMessage::Observe(m)),
        Err(e) => {
            #[derive(Debug, Deserialize)]
            struct Envelope {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let envelope = serde_json::from_str::<Envelope>(json)?;
            match envelope.msg_type.as_deref() {
                Some("new") | Some("move") | Some("observe") | None => Err(e),
                Some(other) => Ok(ParsedMessage::Unknown {
                    seq: envelope.seq.unwrap_or(0),
                    msg_type: other.to_string(),
                }),
            }
        }
    }
}

/// Best-effort `seq` recovery from a line that failed to parse.
pub fn recover_seq(json: &str) -> u64 {
    serde_json::from_str::<serde_json::Value>(json)
        .ok()
        .and_then(|v| v.get("seq").and_then(|s| s.as_u64()))
        .unwrap_or(0)
}

// ============== Engine -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateType {
    #[serde(rename = "state")]
    State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The line is not valid JSON or misses required fields
    #[serde(rename = "parse_error")]
    ParseError,
    /// A field holds a value outside its domain (e.g. an unknown direction)
    #[serde(rename = "invalid_argument")]
    InvalidArgument,
    /// A `new` request carried a config the engine rejects
    #[serde(rename = "invalid_config")]
    InvalidConfig,
    /// The `type` field names no known message
    #[serde(rename = "unknown_type")]
    UnknownType,
}

/// Full game state, sent after every request that succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMessage {
    #[serde(rename = "type")]
    pub msg_type: StateType,
    pub seq: u64,
    /// True if this request changed the grid
    pub changed: bool,
    pub score_gained: Score,
    pub grid: Vec<Vec<Tile>>,
    pub score: Score,
    pub won: bool,
    pub over: bool,
    pub moves: u64,
    pub max_tile: Tile,
    pub legal_moves: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Any reply line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServerMessage {
    State(StateMessage),
    Error(ErrorMessage),
}

impl ServerMessage {
    pub fn seq(&self) -> u64 {
        match self {
            ServerMessage::State(m) => m.seq,
            ServerMessage::Error(m) => m.seq,
        }
    }

    /// Serialize as one protocol line (no trailing newline).
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Build a state reply from the engine, optionally carrying the move result.
pub fn create_state<R: RandomSource>(
    seq: u64,
    engine: &GameEngine<R>,
    outcome: Option<&MoveOutcome>,
) -> StateMessage {
    let snap = match outcome {
        Some(outcome) => outcome.snapshot.clone(),
        None => engine.snapshot(),
    };
    StateMessage {
        msg_type: StateType::State,
        seq,
        changed: outcome.map(|o| o.changed).unwrap_or(false),
        score_gained: outcome.map(|o| o.score_gained).unwrap_or(0),
        grid: snap.grid,
        score: snap.score,
        won: snap.won,
        over: snap.over,
        moves: snap.moves,
        max_tile: snap.max_tile,
        legal_moves: engine
            .legal_moves()
            .iter()
            .map(|d| d.as_str().to_string())
            .collect(),
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        code,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        let parsed = parse_message(r#"{"type":"move","seq":4,"direction":"left"}"#).unwrap();
        match parsed {
            ParsedMessage::Move(m) => {
                assert_eq!(m.seq, 4);
                assert_eq!(m.direction, "left");
            }
            other => panic!("expected move, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_new_with_partial_config() {
        let parsed =
            parse_message(r#"{"type":"new","seq":1,"seed":9,"config":{"grid_size":5}}"#).unwrap();
        match parsed {
            ParsedMessage::NewGame(m) => {
                assert_eq!(m.seed, Some(9));
                let config = m.config.unwrap();
                assert_eq!(config.grid_size, 5);
                assert_eq!(config.win_value, 2048);
            }
            other => panic!("expected new, got {:?}", other),
        }

        match parse_message(r#"{"type":"new","seq":2}"#).unwrap() {
            ParsedMessage::NewGame(m) => {
                assert_eq!(m.seed, None);
                assert!(m.config.is_none());
            }
            other => panic!("expected new, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_type() {
        match parse_message(r#"{"type":"undo","seq":7}"#).unwrap() {
            ParsedMessage::Unknown { seq, msg_type } => {
                assert_eq!(seq, 7);
                assert_eq!(msg_type, "undo");
            }
            other => panic!("expected unknown, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_message("not json").is_err());
        assert!(parse_message(r#"{"type":"move","seq":1}"#).is_err());
        assert!(parse_message(r#"{"seq":1}"#).is_err());
    }

    #[test]
    fn test_recover_seq() {
        assert_eq!(recover_seq(r#"{"type":"move","seq":12}"#), 12);
        assert_eq!(recover_seq("garbage"), 0);
    }

    #[test]
    fn test_error_serialization() {
        let error = create_error(3, ErrorCode::InvalidArgument, "unknown direction");
        let line = ServerMessage::Error(error).to_line().unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(value["seq"], 3);
        assert_eq!(value["code"], "invalid_argument");
    }
}
