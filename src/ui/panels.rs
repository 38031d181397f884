use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::filter::MAX_POPULARITY;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Popularity range ----
    ui.strong("Popularity (0-100)");
    let mut lo = state.filters.popularity.lo();
    let mut hi = state.filters.popularity.hi();
    if ui
        .add(Slider::new(&mut lo, 0..=MAX_POPULARITY).text("min"))
        .changed()
    {
        let range = state.filters.popularity.with_lo(lo);
        state.set_popularity(range);
    }
    if ui
        .add(Slider::new(&mut hi, 0..=MAX_POPULARITY).text("max"))
        .changed()
    {
        let range = state.filters.popularity.with_hi(hi);
        state.set_popularity(range);
    }
    ui.separator();

    // ---- Genre multi-select ----
    let n_selected = state.filters.genres.len();
    let n_total = table.genres.len();
    ui.strong(format!("Genres  ({n_selected}/{n_total})"));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    let mut toggled = None;
    ScrollArea::vertical()
        .id_salt("genre_list")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for genre in &table.genres {
                let mut checked = state.filters.genres.contains(genre);
                if ui.checkbox(&mut checked, genre.as_str()).changed() {
                    toggled = Some(genre.clone());
                }
            }
        });

    if let Some(genre) = toggled {
        state.toggle_genre(&genre);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} tracks loaded, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
            ui.separator();
            ui.label(state.dataset_path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open track dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
