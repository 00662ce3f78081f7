//! Main application for the Go client

use std::time::{Duration, Instant};

use eframe::egui;
use egui::{Align2, CentralPanel, Context, CornerRadius, Frame, Id, LayerId, Order, RichText, Sense, SidePanel};
use tracing::{error, info};

use crate::board::Stone;
use crate::config::{Config, PlayerColor};
use crate::engine::EngineLoader;
use crate::error::SessionError;

use super::session::{OverlayClass, SessionConfig, SessionController, TurnState};
use super::theme::*;

/// Board sizes offered in the selector
const BOARD_SIZES: [usize; 8] = [5, 7, 9, 11, 13, 15, 17, 19];
/// Smallest usable cell when the window is tiny
const MIN_CELL: f32 = 12.0;

/// Main Go application
pub struct GoApp {
    session: SessionController,
    loader: EngineLoader,
    board_size: usize,
    color: PlayerColor,
    /// Space the central panel offered last frame
    board_area: egui::Vec2,
    alert: Option<String>,
}

impl GoApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let screen = cc.egui_ctx.screen_rect();
        let mut session = SessionController::new(config.session_settings(), screen.width(), screen.height());

        let loader = match config.engine_command() {
            Some(command) => {
                session.set_status("Loading engine...");
                EngineLoader::spawn(command)
            }
            None => {
                session.set_status("No engine configured (pass --engine)");
                EngineLoader::Done
            }
        };

        Self {
            session,
            loader,
            board_size: config.board_size as usize,
            color: config.color,
            board_area: egui::Vec2::ZERO,
            alert: None,
        }
    }

    fn poll_engine(&mut self) {
        match self.loader.poll() {
            Some(Ok(engine)) => {
                self.session.attach_engine(engine);
                self.session.set_status("Engine ready - press Start");
            }
            Some(Err(err)) => {
                error!(error = %err, "engine failed to load");
                self.session.set_status(format!("Engine failed to load: {err}"));
            }
            None => {}
        }
    }

    /// Start or restart with the current selections
    fn start_session(&mut self) {
        let padding = self.session.settings().padding;
        let max_canvas = self.session.settings().max_canvas;
        let floor = 2.0 * padding + MIN_CELL * (self.board_size.max(2) - 1) as f32;
        let fit = self.board_area.x.min(self.board_area.y) - BOARD_AREA_MARGIN;
        let canvas_size = fit.min(max_canvas).max(floor);

        let config = SessionConfig {
            board_size: self.board_size,
            user_color: Stone::from(self.color),
        };
        match self.session.start(config, canvas_size) {
            Ok(()) => info!(canvas_size, "board canvas sized"),
            // The status line says whether it is loading, missing or failed
            Err(err @ SessionError::EngineNotReady) => {
                self.alert = Some(format!("{err}. {}", self.session.status()));
            }
            Err(err) => self.alert = Some(err.to_string()),
        }
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);
                self.render_setup_card(ui);
                ui.add_space(10.0);
                self.render_status_card(ui);
            });
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●○").size(20.0).color(TEXT_SECONDARY));
            ui.add_space(4.0);
            ui.label(RichText::new("GO").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("囲碁 vs Bot").size(11.0).color(TEXT_MUTED));
        });
    }

    /// Board size and color selectors plus the start/restart actions
    fn render_setup_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("NEW GAME").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            egui::ComboBox::from_label("Board")
                .selected_text(format!("{0}×{0}", self.board_size))
                .show_ui(ui, |ui| {
                    for size in BOARD_SIZES {
                        ui.selectable_value(&mut self.board_size, size, format!("{size}×{size}"));
                    }
                });

            ui.horizontal(|ui| {
                ui.label(RichText::new("You play").color(TEXT_SECONDARY));
                ui.radio_value(&mut self.color, PlayerColor::Black, "Black");
                ui.radio_value(&mut self.color, PlayerColor::White, "White");
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Start").clicked() {
                    self.start_session();
                }
                let can_restart = self.session.state() != TurnState::Idle;
                if ui.add_enabled(can_restart, egui::Button::new("Restart")).clicked() {
                    self.start_session();
                }
            });
        });
    }

    fn render_status_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("STATUS").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let color = match self.session.state() {
                TurnState::AwaitingBotResponse => STATUS_WARNING,
                TurnState::GameOver => STATUS_CRITICAL,
                TurnState::Idle | TurnState::AwaitingHumanInput => STATUS_NORMAL,
            };
            ui.label(RichText::new(self.session.status()).size(16.0).strong().color(color));

            if let Some(elapsed) = self.loader.loading_elapsed() {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Engine loading {:.1}s", elapsed.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    /// Render the board canvas and forward clicks to the session
    fn render_board(&mut self, ctx: &Context, now: Instant) {
        CentralPanel::default()
            .frame(Frame::new().fill(BOARD_AREA_BG))
            .show(ctx, |ui| {
                self.board_area = ui.available_size();

                if self.session.state() == TurnState::Idle {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("Choose a board and press Start").color(TEXT_MUTED));
                    });
                    return;
                }

                let size = self.session.board_canvas().size();
                ui.add_space(((ui.available_height() - size.y) / 2.0).max(0.0));
                ui.vertical_centered(|ui| {
                    let (response, painter) = ui.allocate_painter(size, Sense::click());
                    self.session.board_canvas().paint(&painter, response.rect.min);

                    if response.clicked() && self.alert.is_none() {
                        if let Some(pointer) = response.interact_pointer_pos() {
                            let local = pointer - response.rect.min;
                            self.session.handle_click(local.x, local.y, now);
                        }
                    }
                });
            });
    }

    /// End-of-game modal
    fn render_overlay(&mut self, ctx: &Context) {
        let Some(overlay) = self.session.overlay().cloned() else {
            return;
        };
        let (fill, accent) = match overlay.class {
            OverlayClass::Win => (OVERLAY_WIN_BG, STATUS_NORMAL),
            OverlayClass::Lose => (OVERLAY_LOSE_BG, STATUS_CRITICAL),
        };

        let mut restart = false;
        egui::Window::new("Game Over")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(Frame::window(&ctx.style()).fill(fill))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(&overlay.message).size(22.0).strong().color(accent));
                    ui.add_space(6.0);
                    ui.label(RichText::new(self.session.status()).size(12.0).color(TEXT_SECONDARY));
                    ui.add_space(12.0);
                    if ui.button(RichText::new("Play Again").size(14.0)).clicked() {
                        restart = true;
                    }
                });
            });

        if restart {
            self.start_session();
        }
    }

    /// Blocking alert (e.g. engine not loaded yet)
    fn render_alert(&mut self, ctx: &Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };

        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(RichText::new(message).color(TEXT_PRIMARY));
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.alert = None;
                }
            });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let restart = ctx.input(|i| i.key_pressed(egui::Key::N));
        if restart && self.alert.is_none() {
            self.start_session();
        }
    }
}

impl eframe::App for GoApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.poll_engine();
        self.handle_input(ctx);

        let screen = ctx.screen_rect();
        self.session.set_viewport(screen.width(), screen.height());

        // Pending bot move
        self.session.tick(now);

        self.render_side_panel(ctx);
        self.render_board(ctx, now);
        self.render_overlay(ctx);
        self.render_alert(ctx);

        let animating = self.session.step_effects();
        let effects = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("fireworks")));
        self.session.effects_canvas().paint(&effects, screen.min);

        if animating {
            ctx.request_repaint();
        }
        if let Some(remaining) = self.session.bot_timer_remaining(now) {
            ctx.request_repaint_after(remaining);
        }
        if self.loader.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
