//! Engine wire messages and their interpretation
//!
//! Replies arrive with ad hoc optional fields; [`MoveOutcome::interpret`]
//! folds them into one tagged value so the session can match exhaustively.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{BoardSnapshot, Pos, Stone};
use crate::error::EngineError;

/// Request sent to the engine, one JSON object per line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    StartGame { board_size: usize, user_color: u8 },
    ResolveHumanMove { row: usize, col: usize, user_color: u8 },
    ResolveBotMove { user_color: u8 },
}

/// Raw reply as the engine sends it
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineReply {
    pub valid: Option<bool>,
    pub board: Option<Vec<u8>>,
    pub last_move: Option<[usize; 2]>,
    pub game_over: Option<bool>,
    pub winner: Option<String>,
    pub bot_turn: Option<bool>,
    /// `true` or a message string; `false`/`null` mean no error
    pub error: Option<serde_json::Value>,
}

impl EngineReply {
    pub fn is_error(&self) -> bool {
        match &self.error {
            None | Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) => false,
            Some(_) => true,
        }
    }

    fn error_message(&self) -> String {
        match &self.error {
            Some(serde_json::Value::String(msg)) => msg.clone(),
            _ => "engine reported an error".to_string(),
        }
    }
}

/// Which call produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Human,
    Bot,
}

/// Reported winner of a finished game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Winner {
    label: String,
    color: Option<Stone>,
}

impl Winner {
    /// Resolve the engine's free-text winner ("White", "Black (Bot)",
    /// "User", ...) to a color, using the session's colors for "Bot"/"User".
    pub fn parse(label: &str, user_color: Stone) -> Self {
        let lower = label.to_ascii_lowercase();
        let color = if lower.contains("black") {
            Some(Stone::Black)
        } else if lower.contains("white") {
            Some(Stone::White)
        } else if lower.contains("bot") {
            Some(user_color.opponent())
        } else if lower.contains("user") {
            Some(user_color)
        } else {
            None
        };

        Self {
            label: label.trim().to_string(),
            color,
        }
    }

    pub fn color(&self) -> Option<Stone> {
        self.color
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            f.write_str("Unknown")
        } else {
            f.write_str(&self.label)
        }
    }
}

/// Whose turn follows an accepted move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextTurn {
    Human,
    Bot,
    Ended { winner: Winner },
}

/// Interpreted reply to a move request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Legal-but-refused move (e.g. occupied point); ignored by the session
    Rejected,
    /// `board` is `None` only for a game-over reply that carried no board
    Accepted {
        board: Option<BoardSnapshot>,
        last_move: Option<Pos>,
        next: NextTurn,
    },
    EngineError(String),
}

impl MoveOutcome {
    pub fn interpret(reply: EngineReply, kind: MoveKind, board_size: usize, user_color: Stone) -> Self {
        if reply.is_error() {
            return MoveOutcome::EngineError(reply.error_message());
        }

        let game_over = reply.game_over.unwrap_or(false);

        // Bot replies never carry `valid`
        if kind == MoveKind::Human && !reply.valid.unwrap_or(false) && !game_over {
            return MoveOutcome::Rejected;
        }

        let board = match reply.board.as_deref() {
            Some(codes) => match BoardSnapshot::from_codes(board_size, codes) {
                Ok(board) => Some(board),
                Err(err) => return MoveOutcome::EngineError(err.to_string()),
            },
            None => None,
        };

        let last_move = match decode_last_move(reply.last_move, board_size) {
            Ok(pos) => pos,
            Err(err) => return MoveOutcome::EngineError(err.to_string()),
        };

        let next = if game_over {
            NextTurn::Ended {
                winner: Winner::parse(reply.winner.as_deref().unwrap_or_default(), user_color),
            }
        } else if board.is_none() {
            return MoveOutcome::EngineError("reply carries no board".to_string());
        } else if kind == MoveKind::Human && reply.bot_turn.unwrap_or(false) {
            NextTurn::Bot
        } else {
            NextTurn::Human
        };

        MoveOutcome::Accepted { board, last_move, next }
    }
}

/// Board handed back by `startGame`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opening {
    pub board: BoardSnapshot,
    pub last_move: Option<Pos>,
}

impl Opening {
    pub fn interpret(reply: EngineReply, board_size: usize) -> Result<Self, EngineError> {
        if reply.is_error() {
            return Err(EngineError::Protocol(reply.error_message()));
        }

        let codes = reply
            .board
            .as_deref()
            .ok_or_else(|| EngineError::Protocol("start reply carries no board".to_string()))?;

        Ok(Self {
            board: BoardSnapshot::from_codes(board_size, codes)?,
            last_move: decode_last_move(reply.last_move, board_size)?,
        })
    }
}

fn decode_last_move(raw: Option<[usize; 2]>, board_size: usize) -> Result<Option<Pos>, EngineError> {
    match raw {
        None => Ok(None),
        Some([row, col]) => {
            let pos = Pos::new(row, col);
            if pos.is_on_board(board_size) {
                Ok(Some(pos))
            } else {
                Err(EngineError::Protocol(format!("last move {pos} is off the board")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(json: &str) -> EngineReply {
        serde_json::from_str(json).unwrap()
    }

    fn empty_board_json(size: usize) -> String {
        format!("[{}]", vec!["0"; size * size].join(","))
    }

    #[test]
    fn test_request_wire_format() {
        let json = serde_json::to_value(Request::ResolveHumanMove { row: 3, col: 4, user_color: 1 }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"op": "resolveHumanMove", "row": 3, "col": 4, "userColor": 1})
        );

        let json = serde_json::to_value(Request::StartGame { board_size: 9, user_color: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({"op": "startGame", "boardSize": 9, "userColor": 2}));
    }

    #[test]
    fn test_invalid_move_is_rejected() {
        let r = reply(r#"{"valid": false, "error": false, "gameOver": false}"#);
        assert_eq!(
            MoveOutcome::interpret(r, MoveKind::Human, 9, Stone::Black),
            MoveOutcome::Rejected
        );
    }

    #[test]
    fn test_error_flag_and_message() {
        let r = reply(r#"{"error": true}"#);
        assert!(matches!(
            MoveOutcome::interpret(r, MoveKind::Human, 9, Stone::Black),
            MoveOutcome::EngineError(_)
        ));

        let r = reply(r#"{"error": "missing arguments (userColor)"}"#);
        assert_eq!(
            MoveOutcome::interpret(r, MoveKind::Bot, 9, Stone::Black),
            MoveOutcome::EngineError("missing arguments (userColor)".to_string())
        );
    }

    #[test]
    fn test_accepted_with_bot_turn() {
        let r = reply(&format!(
            r#"{{"valid": true, "board": {}, "lastMove": [2, 3], "botTurn": true}}"#,
            empty_board_json(9)
        ));
        match MoveOutcome::interpret(r, MoveKind::Human, 9, Stone::Black) {
            MoveOutcome::Accepted { board, last_move, next } => {
                assert_eq!(board, Some(BoardSnapshot::empty(9)));
                assert_eq!(last_move, Some(Pos::new(2, 3)));
                assert_eq!(next, NextTurn::Bot);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_bot_reply_without_valid_is_accepted() {
        let r = reply(&format!(r#"{{"board": {}, "gameOver": false}}"#, empty_board_json(5)));
        match MoveOutcome::interpret(r, MoveKind::Bot, 5, Stone::White) {
            MoveOutcome::Accepted { next, .. } => assert_eq!(next, NextTurn::Human),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_game_over_without_board() {
        let r = reply(r#"{"gameOver": true, "winner": "User"}"#);
        match MoveOutcome::interpret(r, MoveKind::Bot, 9, Stone::White) {
            MoveOutcome::Accepted { board, next: NextTurn::Ended { winner }, .. } => {
                assert_eq!(board, None);
                assert_eq!(winner.color(), Some(Stone::White));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_bot_reply_without_board_is_error() {
        let r = reply(r#"{"gameOver": false}"#);
        assert!(matches!(
            MoveOutcome::interpret(r, MoveKind::Bot, 9, Stone::Black),
            MoveOutcome::EngineError(_)
        ));
    }

    #[test]
    fn test_wrong_board_length_is_error() {
        let r = reply(&format!(r#"{{"valid": true, "board": {}}}"#, empty_board_json(8)));
        assert!(matches!(
            MoveOutcome::interpret(r, MoveKind::Human, 9, Stone::Black),
            MoveOutcome::EngineError(_)
        ));
    }

    #[test]
    fn test_off_board_last_move_is_error() {
        let r = reply(&format!(r#"{{"valid": true, "board": {}, "lastMove": [9, 0]}}"#, empty_board_json(9)));
        assert!(matches!(
            MoveOutcome::interpret(r, MoveKind::Human, 9, Stone::Black),
            MoveOutcome::EngineError(_)
        ));
    }

    #[test]
    fn test_winner_parsing() {
        assert_eq!(Winner::parse("White", Stone::Black).color(), Some(Stone::White));
        assert_eq!(Winner::parse("Black (Bot)", Stone::White).color(), Some(Stone::Black));
        assert_eq!(Winner::parse("White (User)", Stone::White).color(), Some(Stone::White));
        assert_eq!(Winner::parse("Bot", Stone::Black).color(), Some(Stone::White));
        assert_eq!(Winner::parse("User", Stone::Black).color(), Some(Stone::Black));

        let unknown = Winner::parse("", Stone::Black);
        assert_eq!(unknown.color(), None);
        assert_eq!(unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_opening() {
        let mut codes = vec!["0"; 81];
        codes[40] = "1";
        let r = reply(&format!(r#"{{"board": [{}], "lastMove": [4, 4]}}"#, codes.join(",")));
        let opening = Opening::interpret(r, 9).unwrap();
        assert_eq!(opening.board.get(Pos::new(4, 4)), Stone::Black);
        assert_eq!(opening.last_move, Some(Pos::new(4, 4)));

        assert!(Opening::interpret(EngineReply::default(), 9).is_err());
    }
}
