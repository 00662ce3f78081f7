//! Client side of the rules/bot engine
//!
//! The engine is an external program; this module only knows its
//! request/response contract:
//! - [`protocol`]: wire messages and reply interpretation
//! - [`transport`]: newline-delimited JSON over a child process's stdio
//! - [`loader`]: background start-up so the UI never blocks on launch

pub mod loader;
pub mod protocol;
pub mod transport;

pub use loader::EngineLoader;
pub use protocol::{EngineReply, MoveKind, MoveOutcome, NextTurn, Opening, Request, Winner};
pub use transport::{EngineCommand, JsonLineEngine, ProcessEngine};

use crate::board::{Pos, Stone};
use crate::error::EngineError;

/// Synchronous request/response contract of the engine collaborator
pub trait Engine {
    /// Begin a new game. If the bot moves first the reply already holds its stone.
    fn start_game(&mut self, board_size: usize, user_color: Stone) -> Result<EngineReply, EngineError>;

    fn resolve_human_move(&mut self, pos: Pos, user_color: Stone) -> Result<EngineReply, EngineError>;

    /// Let the engine pick and play the bot's move
    fn resolve_bot_move(&mut self, user_color: Stone) -> Result<EngineReply, EngineError>;
}

pub type BoxedEngine = Box<dyn Engine + Send>;
