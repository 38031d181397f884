mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::RustyTunesApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Tunes – Spotify Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(RustyTunesApp::new(DashboardConfig::default())))),
    )
}
