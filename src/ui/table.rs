use eframe::egui::{self, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::TrackTable;

const ROW_HEIGHT: f32 = 18.0;
const MAX_HEIGHT: f32 = 300.0;

/// Read-only table of the tracks at `indices`, one column per known
/// source column.
pub fn track_table(ui: &mut Ui, table: &TrackTable, indices: &[usize]) {
    let columns = table.display_columns();
    if columns.is_empty() {
        return;
    }

    ScrollArea::horizontal()
        .id_salt("track_table_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(MAX_HEIGHT)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .columns(Column::auto().at_least(60.0).clip(true), columns.len())
                .header(20.0, |mut header| {
                    for (label, _) in &columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(*label);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, indices.len(), |mut row| {
                        let track = &table.tracks[indices[row.index()]];
                        for &(_, col) in &columns {
                            row.col(|ui: &mut Ui| {
                                ui.label(col.cell_text(track));
                            });
                        }
                    });
                });
        });
}
