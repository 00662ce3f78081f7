//! Error types for the engine transport and the game session

use thiserror::Error;

/// A flat board from the engine that does not decode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("board has {actual} cells, expected {expected}")]
    Length { expected: usize, actual: usize },
    #[error("cell {index} has invalid value {value}")]
    Cell { index: usize, value: u8 },
}

/// Failures talking to the engine collaborator
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to launch engine `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("engine i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed engine message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("engine closed its output")]
    Closed,
    #[error("engine did not announce readiness: {0}")]
    Handshake(String),
    #[error("engine sent an invalid board: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("engine protocol violation: {0}")]
    Protocol(String),
}

/// Reasons a session action is refused
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("engine is not available")]
    EngineNotReady,
    #[error("board size {0} is too small")]
    InvalidBoardSize(usize),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
