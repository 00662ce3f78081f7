//! GUI module for the Go client
//!
//! This module provides a native Rust GUI using egui/eframe. Everything but
//! [`app`] is window-independent and drawn into in-memory canvases.

mod app;
pub mod board_view;
pub mod canvas;
pub mod coords;
pub mod fireworks;
pub mod session;
mod theme;
pub mod timer;

pub use app::GoApp;
pub use board_view::BoardRenderer;
pub use canvas::Canvas;
pub use coords::BoardGeometry;
pub use fireworks::{EffectState, FireworkParams, Fireworks};
pub use session::{Overlay, OverlayClass, SessionConfig, SessionController, TurnState};
