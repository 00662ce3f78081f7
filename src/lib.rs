//! Go client playing against an external bot engine
//!
//! The engine (rules, captures, scoring, move search) lives in a separate
//! program; this crate is everything on the player's side of it:
//! - [`board`]: board snapshots and positions
//! - [`engine`]: request/response contract and JSON-line transport
//! - [`ui`]: session controller, board renderer, victory fireworks, egui app
//! - [`config`]: command-line settings
//!
//! # Quick Start
//!
//! ```
//! use goban::ui::BoardGeometry;
//! use goban::Pos;
//!
//! // 600px canvas, 30px padding, 9x9 board
//! let geometry = BoardGeometry::new(600.0, 30.0, 9);
//! assert_eq!(geometry.resolve_click(98.0, 31.0), Some(Pos::new(0, 1)));
//! // Midway between four points hits nothing
//! assert_eq!(geometry.resolve_click(63.75, 63.75), None);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{BoardSnapshot, Pos, Stone};
pub use config::Config;
pub use engine::{Engine, EngineLoader, MoveOutcome};
pub use error::{EngineError, SessionError};
