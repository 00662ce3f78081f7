//! Go vs Bot GUI
//!
//! A graphical interface for playing Go against an engine process.

use clap::Parser;
use goban::ui::GoApp;
use goban::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 520.0])
            .with_title("Go vs Bot"),
        ..Default::default()
    };

    eframe::run_native(
        "Go vs Bot",
        options,
        Box::new(move |cc| Ok(Box::new(GoApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run eframe: {e}"))
}
