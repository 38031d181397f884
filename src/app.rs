use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{dashboard, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyTunesApp {
    pub state: AppState,
}

impl RustyTunesApp {
    /// Create the app and load the configured dataset.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        state.reload();
        Self { state }
    }
}

impl eframe::App for RustyTunesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // Without a table only the error message is shown.
        if self.state.table.is_some() {
            egui::SidePanel::left("filter_panel")
                .default_width(220.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: table and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::dashboard(ui, &mut self.state);
        });
    }
}
