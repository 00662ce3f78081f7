//! Game session controller
//!
//! Owns the turn state machine of one game against the bot. Every engine
//! call happens from here, and only in states that accept one:
//!
//! ```text
//! Idle ──start──> AwaitingHumanInput ──accepted, bot's turn──> AwaitingBotResponse
//!                   │    ^    │                                   │
//!                   │    │    └─ accepted, still human ─┐         │ delay elapsed,
//!                   │    └──────────────────────────────┴─────────┤ game continues
//!                   └──game ended──> GameOver <──game ended───────┘
//! ```
//!
//! `start` doubles as restart from any state.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::board::{BoardSnapshot, Pos, Stone, MIN_BOARD_SIZE};
use crate::config::{OutcomeFraming, SessionSettings};
use crate::engine::{BoxedEngine, MoveKind, MoveOutcome, NextTurn, Opening, Winner};
use crate::error::SessionError;

use super::board_view::BoardRenderer;
use super::canvas::Canvas;
use super::coords::BoardGeometry;
use super::fireworks::Fireworks;
use super::timer::OneShot;

pub const BOT_THINKING: &str = "Bot Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingHumanInput,
    AwaitingBotResponse,
    GameOver,
}

/// Fixed for the lifetime of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub board_size: usize,
    pub user_color: Stone,
}

impl SessionConfig {
    pub fn bot_color(&self) -> Stone {
        self.user_color.opponent()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClass {
    Win,
    Lose,
}

/// End-of-game modal contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub message: String,
    pub class: OverlayClass,
}

pub fn human_turn_status(color: Stone) -> String {
    format!("Your Turn ({color})")
}

pub struct SessionController {
    settings: SessionSettings,
    engine: Option<BoxedEngine>,
    config: Option<SessionConfig>,
    state: TurnState,
    board: Option<BoardSnapshot>,
    last_move: Option<Pos>,
    renderer: BoardRenderer,
    fireworks: Fireworks,
    bot_timer: OneShot,
    status: String,
    overlay: Option<Overlay>,
}

impl SessionController {
    /// The viewport size is that of the full-window effects layer
    pub fn new(settings: SessionSettings, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            renderer: BoardRenderer::new(BoardGeometry::new(
                settings.max_canvas,
                settings.padding,
                MIN_BOARD_SIZE,
            )),
            fireworks: Fireworks::new(viewport_width, viewport_height),
            settings,
            engine: None,
            config: None,
            state: TurnState::Idle,
            board: None,
            last_move: None,
            bot_timer: OneShot::default(),
            status: String::new(),
            overlay: None,
        }
    }

    pub fn attach_engine(&mut self, engine: BoxedEngine) {
        self.engine = Some(engine);
    }

    pub fn is_engine_ready(&self) -> bool {
        self.engine.is_some()
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn config(&self) -> Option<SessionConfig> {
        self.config
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn board(&self) -> Option<&BoardSnapshot> {
        self.board.as_ref()
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    pub fn geometry(&self) -> &BoardGeometry {
        self.renderer.geometry()
    }

    pub fn board_canvas(&self) -> &Canvas {
        self.renderer.canvas()
    }

    pub fn effects_canvas(&self) -> &Canvas {
        self.fireworks.canvas()
    }

    pub fn fireworks(&self) -> &Fireworks {
        &self.fireworks
    }

    /// Time until the pending bot request, if one is scheduled
    pub fn bot_timer_remaining(&self, now: Instant) -> Option<Duration> {
        self.bot_timer.remaining(now)
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.fireworks.set_viewport(width, height);
    }

    /// Begin a fresh session, replacing whatever ran before.
    ///
    /// Fails without touching any state if the engine is not loaded yet.
    pub fn start(&mut self, config: SessionConfig, canvas_size: f32) -> Result<(), SessionError> {
        let Some(engine) = self.engine.as_mut() else {
            warn!("start requested before the engine finished loading");
            return Err(SessionError::EngineNotReady);
        };
        if config.board_size < MIN_BOARD_SIZE {
            return Err(SessionError::InvalidBoardSize(config.board_size));
        }

        let opening = engine
            .start_game(config.board_size, config.user_color)
            .and_then(|reply| Opening::interpret(reply, config.board_size));

        self.fireworks.stop();
        self.fireworks.clear_canvas();
        self.overlay = None;
        self.bot_timer.cancel();
        self.board = None;
        self.last_move = None;
        self.config = None;
        self.state = TurnState::Idle;

        let opening = match opening {
            Ok(opening) => opening,
            Err(err) => {
                warn!(error = %err, "engine failed to start a game");
                self.status = format!("Engine error: {err}");
                return Err(err.into());
            }
        };

        let geometry = BoardGeometry::new(canvas_size, self.settings.padding, config.board_size);
        self.renderer.set_geometry(geometry);
        self.config = Some(config);
        self.show(Some(opening.board), opening.last_move);

        self.state = TurnState::AwaitingHumanInput;
        self.status = human_turn_status(config.user_color);
        info!(
            board_size = config.board_size,
            user_color = %config.user_color,
            cell_size = geometry.cell_size,
            "session started"
        );
        Ok(())
    }

    /// A click on the board canvas, in canvas-local pixels
    pub fn handle_click(&mut self, x: f32, y: f32, now: Instant) {
        if self.state != TurnState::AwaitingHumanInput {
            debug!(state = ?self.state, "click ignored outside the human turn");
            return;
        }
        let Some(pos) = self.renderer.geometry().resolve_click(x, y) else {
            debug!(x, y, "click is not on an intersection");
            return;
        };

        match self.request(Some(pos)) {
            MoveOutcome::Rejected => debug!(%pos, "engine rejected move"),
            MoveOutcome::EngineError(msg) => warn!(%pos, %msg, "engine error on human move"),
            MoveOutcome::Accepted { board, last_move, next } => {
                self.show(board, last_move);
                match next {
                    NextTurn::Human => self.await_human(),
                    NextTurn::Bot => {
                        self.state = TurnState::AwaitingBotResponse;
                        self.status = BOT_THINKING.to_string();
                        self.bot_timer.arm(now, self.settings.bot_delay);
                    }
                    NextTurn::Ended { winner } => self.finish(winner),
                }
            }
        }
    }

    /// Fire the bot request once its delay has passed
    pub fn tick(&mut self, now: Instant) {
        if self.state != TurnState::AwaitingBotResponse || !self.bot_timer.fire(now) {
            return;
        }

        match self.request(None) {
            MoveOutcome::Accepted { board, last_move, next } => {
                self.show(board, last_move);
                match next {
                    NextTurn::Ended { winner } => self.finish(winner),
                    NextTurn::Human | NextTurn::Bot => self.await_human(),
                }
            }
            // No retry: the session waits here until restarted
            MoveOutcome::Rejected => warn!("engine refused to move for the bot"),
            MoveOutcome::EngineError(msg) => warn!(%msg, "engine error on bot move"),
        }
    }

    /// Advance the particle effect by one frame; true while it wants more frames
    pub fn step_effects(&mut self) -> bool {
        self.fireworks.step()
    }

    /// Human move at `pos`, or the bot's move when `None`
    fn request(&mut self, pos: Option<Pos>) -> MoveOutcome {
        let (Some(config), Some(engine)) = (self.config, self.engine.as_mut()) else {
            return MoveOutcome::EngineError("no active session".to_string());
        };

        let (kind, reply) = match pos {
            Some(pos) => (MoveKind::Human, engine.resolve_human_move(pos, config.user_color)),
            None => (MoveKind::Bot, engine.resolve_bot_move(config.user_color)),
        };

        match reply {
            Ok(reply) => MoveOutcome::interpret(reply, kind, config.board_size, config.user_color),
            Err(err) => MoveOutcome::EngineError(err.to_string()),
        }
    }

    /// Replace the snapshot and redraw. A missing board keeps the previous one.
    fn show(&mut self, board: Option<BoardSnapshot>, last_move: Option<Pos>) {
        if let Some(board) = board {
            self.board = Some(board);
            self.last_move = last_move;
        }
        if let Some(board) = &self.board {
            self.renderer.render(board, self.last_move);
        }
    }

    fn await_human(&mut self) {
        self.state = TurnState::AwaitingHumanInput;
        if let Some(config) = self.config {
            self.status = human_turn_status(config.user_color);
        }
    }

    fn finish(&mut self, winner: Winner) {
        self.state = TurnState::GameOver;
        self.bot_timer.cancel();
        self.status = format!("Game Over! Winner: {winner}");

        let Some(config) = self.config else {
            return;
        };
        let celebrate = match self.settings.framing {
            OutcomeFraming::Bot => winner.color() == Some(config.bot_color()),
            OutcomeFraming::Player => winner.color() == Some(config.user_color),
        };

        info!(%winner, celebrate, "game over");
        self.overlay = Some(if celebrate {
            self.fireworks.start();
            Overlay {
                message: format!("Victory! {winner} wins"),
                class: OverlayClass::Win,
            }
        } else {
            Overlay {
                message: format!("Defeat! {winner} wins"),
                class: OverlayClass::Lose,
            }
        });
    }
}
