//! Command-line configuration

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::board::Stone;
use crate::engine::EngineCommand;

pub const DEFAULT_PADDING: f32 = 30.0;
pub const DEFAULT_MAX_CANVAS: f32 = 600.0;
pub const DEFAULT_BOT_DELAY_MS: u64 = 500;

/// Color the human plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlayerColor {
    #[default]
    Black,
    White,
}

impl From<PlayerColor> for Stone {
    fn from(color: PlayerColor) -> Self {
        match color {
            PlayerColor::Black => Stone::Black,
            PlayerColor::White => Stone::White,
        }
    }
}

/// Whose win gets the celebration and fireworks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutcomeFraming {
    /// Celebrate when the bot wins
    #[default]
    Bot,
    /// Celebrate when the human wins
    Player,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "goban")]
#[command(about = "Play Go against a bot engine")]
pub struct Config {
    /// Engine program; speaks newline-delimited JSON on stdin/stdout
    #[arg(long)]
    pub engine: Option<String>,

    /// Extra argument passed to the engine (repeatable)
    #[arg(long = "engine-arg", allow_hyphen_values = true)]
    pub engine_args: Vec<String>,

    /// Board size preselected in the UI
    #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u8).range(2..))]
    pub board_size: u8,

    #[arg(long, value_enum, default_value_t = PlayerColor::Black)]
    pub color: PlayerColor,

    /// Distance from the canvas edge to the outermost lines, in pixels
    #[arg(long, default_value_t = DEFAULT_PADDING)]
    pub padding: f32,

    /// Largest board canvas, in pixels
    #[arg(long, default_value_t = DEFAULT_MAX_CANVAS)]
    pub max_canvas: f32,

    /// Pause before the bot answers, in milliseconds
    #[arg(long, default_value_t = DEFAULT_BOT_DELAY_MS)]
    pub bot_delay_ms: u64,

    #[arg(long, value_enum, default_value_t = OutcomeFraming::Bot)]
    pub celebrate: OutcomeFraming,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log: String,
}

impl Config {
    pub fn engine_command(&self) -> Option<EngineCommand> {
        self.engine.as_ref().map(|program| EngineCommand {
            program: program.clone(),
            args: self.engine_args.clone(),
        })
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            padding: self.padding,
            max_canvas: self.max_canvas,
            bot_delay: Duration::from_millis(self.bot_delay_ms),
            framing: self.celebrate,
        }
    }
}

/// Settings the session controller needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub padding: f32,
    pub max_canvas: f32,
    pub bot_delay: Duration,
    pub framing: OutcomeFraming,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            max_canvas: DEFAULT_MAX_CANVAS,
            bot_delay: Duration::from_millis(DEFAULT_BOT_DELAY_MS),
            framing: OutcomeFraming::Bot,
        }
    }
}
