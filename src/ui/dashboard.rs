use std::f64::consts::{FRAC_PI_2, TAU};
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoint, PlotPoints, Points,
    Polygon, Text,
};

use crate::chart::correlation::CorrelationMatrix;
use crate::chart::histogram::HistogramView;
use crate::chart::mode::{ModeBox, ModeShare};
use crate::chart::ranking::GroupMean;
use crate::chart::scatter::ScatterPoint;
use crate::chart::{ChartOptions, ChartViews};
use crate::color::{coolwarm, generate_palette, ColorMap, PaletteStyle};
use crate::data::model::{Feature, Mode, TrackTable};
use crate::state::AppState;
use crate::ui::table::track_table;

const CHART_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the data table and all charts, or the load error when there is no table.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let (Some(table), Some(views)) = (state.table.clone(), state.views.clone()) else {
        let message = state
            .status_message
            .clone()
            .unwrap_or_else(|| "Open a dataset to start  (File → Open…)".to_string());
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(RichText::new(message).color(Color32::RED));
        });
        return;
    };

    let mut options = state.options;
    let mode_colors = ColorMap::new(Mode::ALL.map(Mode::label), PaletteStyle::PASTEL);

    ScrollArea::vertical()
        .id_salt("dashboard_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Spotify Data Analysis");
            ui.label(format!("Tracks ({} rows)", state.visible_indices.len()));
            track_table(ui, &table, &state.visible_indices);
            ui.separator();

            ui.columns(2, |cols| {
                histogram_section(&mut cols[0], &views, &mut options);
                scatter_section(&mut cols[1], &views, &mut options);
            });
            ui.separator();

            ui.heading("Correlation Matrix");
            correlation_grid(ui, &views.correlation);
            ui.separator();

            ui.columns(2, |cols| {
                cols[0].heading("Most Popular Tracks");
                let tracks: Vec<(String, f64)> = views
                    .top_tracks
                    .iter()
                    .map(|t| (t.track_name.clone(), f64::from(t.popularity)))
                    .collect();
                let palette = generate_palette(tracks.len(), PaletteStyle::VIVID);
                horizontal_bars(&mut cols[0], "top_tracks", &tracks, |i, _| palette[i]);

                cols[1].heading("Most Popular Artists (Mean Popularity)");
                let artists = group_entries(&views.top_artists);
                let palette = generate_palette(artists.len(), PaletteStyle::BOLD);
                horizontal_bars(&mut cols[1], "top_artists", &artists, |i, _| palette[i]);
            });
            ui.separator();

            ui.heading("Mode Distribution");
            mode_pie(ui, &views.mode_shares, &mode_colors);
            ui.separator();

            ui.heading("Danceability by Mode");
            danceability_boxes(ui, &views.danceability_by_mode, &mode_colors);
            ui.separator();

            ui.heading("Mean Popularity by Genre");
            let genre_colors = genre_colors(&table);
            let genres = group_entries(&views.top_genres);
            horizontal_bars(ui, "top_genres", &genres, |_, label| {
                genre_colors.color_for(label)
            });
        });

    state.set_options(options);
}

fn genre_colors(table: &TrackTable) -> ColorMap {
    ColorMap::new(table.genres.iter().cloned(), PaletteStyle::DARK)
}

fn group_entries(groups: &[GroupMean]) -> Vec<(String, f64)> {
    groups.iter().map(|g| (g.label.clone(), g.mean)).collect()
}

fn placeholder(ui: &mut Ui) {
    ui.add_space(8.0);
    ui.label(RichText::new("No tracks match the current filters.").italics());
    ui.add_space(8.0);
}

fn feature_combo(ui: &mut Ui, id: &str, caption: &str, feature: &mut Feature) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(caption);
        egui::ComboBox::from_id_salt(id)
            .selected_text(feature.label())
            .show_ui(ui, |ui: &mut Ui| {
                for f in Feature::ALL {
                    ui.selectable_value(feature, f, f.label());
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Histogram and scatter
// ---------------------------------------------------------------------------

fn histogram_section(ui: &mut Ui, views: &ChartViews, options: &mut ChartOptions) {
    ui.heading("Feature Distribution");
    feature_combo(ui, "histogram_feature", "Feature:", &mut options.histogram_feature);
    histogram_chart(ui, &views.histogram);
}

fn histogram_chart(ui: &mut Ui, view: &HistogramView) {
    if view.is_empty() {
        placeholder(ui);
        return;
    }

    let bars: Vec<Bar> = view
        .bins
        .iter()
        .map(|b| {
            Bar::new(b.center(), b.count as f64)
                .width(b.width())
                .name(format!("{:.3} – {:.3}", b.start, b.end))
        })
        .collect();
    let color = generate_palette(1, PaletteStyle::VIVID)[0];

    Plot::new("feature_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label(view.feature.label())
        .y_axis_label("Count")
        .legend(Legend::default())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let name = format!("{} ({} tracks)", view.feature.label(), view.total());
            plot_ui.bar_chart(BarChart::new(bars).color(color).name(name));
        });
}

fn scatter_section(ui: &mut Ui, views: &Arc<ChartViews>, options: &mut ChartOptions) {
    ui.heading("Feature Relationship");
    feature_combo(ui, "scatter_x", "X axis:", &mut options.scatter_x);
    feature_combo(ui, "scatter_y", "Y axis:", &mut options.scatter_y);

    let view = &views.scatter;
    if view.is_empty() {
        placeholder(ui);
        return;
    }

    let points: PlotPoints = view.points.iter().map(|p| [p.x, p.y]).collect();
    let hover = Arc::clone(views);
    let color = generate_palette(1, PaletteStyle::VIVID)[0];

    Plot::new("feature_scatter")
        .height(CHART_HEIGHT)
        .x_axis_label(view.x_feature.label())
        .y_axis_label(view.y_feature.label())
        .allow_scroll(false)
        .label_formatter(move |_name, value| {
            hover
                .scatter
                .nearest(value.x, value.y)
                .map(ScatterPoint::hover_text)
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.points(Points::new(points).radius(2.5).color(color).name("Tracks"));
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

fn correlation_grid(ui: &mut Ui, matrix: &CorrelationMatrix) {
    egui::Grid::new("correlation_matrix")
        .spacing([2.0, 2.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for label in &matrix.labels {
                ui.label(RichText::new(*label).small().strong());
            }
            ui.end_row();

            for row in 0..matrix.size() {
                ui.label(RichText::new(matrix.labels[row]).small().strong());
                for col in 0..matrix.size() {
                    let cell = format!("{:^7}", matrix.annotation(row, col));
                    ui.label(
                        RichText::new(cell)
                            .monospace()
                            .color(Color32::BLACK)
                            .background_color(coolwarm(matrix.get(row, col))),
                    );
                }
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Ranked bar charts
// ---------------------------------------------------------------------------

/// Horizontal bars, first entry on top, labelled on the y axis.
fn horizontal_bars<F>(ui: &mut Ui, id: &str, entries: &[(String, f64)], color: F)
where
    F: Fn(usize, &str) -> Color32,
{
    if entries.is_empty() {
        placeholder(ui);
        return;
    }

    let n = entries.len();
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            Bar::new((n - 1 - i) as f64, *value)
                .width(0.7)
                .name(label)
                .fill(color(i, label))
        })
        .collect();
    let labels: Vec<String> = entries.iter().map(|(label, _)| label.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label("Popularity")
        .include_x(0.0)
        .allow_scroll(false)
        .y_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if v < 0.0 || v.fract() != 0.0 {
                return String::new();
            }
            let rank = v as usize;
            if rank < n {
                labels[n - 1 - rank].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

// ---------------------------------------------------------------------------
// Mode pie and box plot
// ---------------------------------------------------------------------------

/// Largest convex piece of a slice, in turns.
const MAX_SECTOR_TURNS: f64 = 0.25;

fn circle_point(turns: f64, radius: f64) -> [f64; 2] {
    // Clockwise from twelve o'clock.
    let angle = FRAC_PI_2 - TAU * turns;
    [radius * angle.cos(), radius * angle.sin()]
}

fn mode_pie(ui: &mut Ui, shares: &[ModeShare], colors: &ColorMap) {
    if shares.is_empty() {
        placeholder(ui);
        return;
    }

    Plot::new("mode_pie")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for share in shares {
                let end = start + share.fraction;
                let color = colors.color_for(share.mode.label());

                // egui only fills convex polygons, so wide slices are split.
                let pieces = (share.fraction / MAX_SECTOR_TURNS).ceil().max(1.0) as usize;
                for p in 0..pieces {
                    let a = start + share.fraction * p as f64 / pieces as f64;
                    let b = start + share.fraction * (p + 1) as f64 / pieces as f64;
                    let steps = 24;
                    let outline: PlotPoints = std::iter::once([0.0, 0.0])
                        .chain((0..=steps).map(|k| {
                            circle_point(a + (b - a) * k as f64 / steps as f64, 1.0)
                        }))
                        .collect();
                    plot_ui.polygon(
                        Polygon::new(outline)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE))
                            .name(share.mode.label()),
                    );
                }

                let [x, y] = circle_point((start + end) / 2.0, 0.6);
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(x, y),
                        format!("{:.1}%", share.fraction * 100.0),
                    )
                    .color(Color32::BLACK),
                );
                start = end;
            }
        });
}

fn danceability_boxes(ui: &mut Ui, boxes: &[ModeBox], colors: &ColorMap) {
    if boxes.is_empty() {
        placeholder(ui);
        return;
    }

    let labels: Vec<&'static str> = boxes.iter().map(|b| b.mode.label()).collect();

    Plot::new("danceability_by_mode")
        .height(CHART_HEIGHT)
        .x_axis_label("Mode")
        .y_axis_label("Danceability")
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if v < 0.0 || v.fract() != 0.0 {
                return String::new();
            }
            labels.get(v as usize).map(|l| l.to_string()).unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (i, b) in boxes.iter().enumerate() {
                let color = colors.color_for(b.mode.label());
                let s = &b.summary;
                let elem = BoxElem::new(
                    i as f64,
                    BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
                )
                .name(b.mode.label())
                .box_width(0.5)
                .whisker_width(0.3)
                .fill(color.linear_multiply(0.4))
                .stroke(Stroke::new(1.5, color));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(b.mode.label()));

                if !s.outliers.is_empty() {
                    let outliers: PlotPoints = s.outliers.iter().map(|&v| [i as f64, v]).collect();
                    plot_ui.points(
                        Points::new(outliers)
                            .radius(2.0)
                            .color(color)
                            .name(b.mode.label()),
                    );
                }
            }
        });
}
