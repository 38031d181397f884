use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::chart::{ChartOptions, ChartViews};
use crate::config::DashboardConfig;
use crate::data::cache::TableCache;
use crate::data::filter::{filtered_indices, FilterState, PopularityRange};
use crate::data::model::TrackTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Tables loaded so far, kept for the whole session.
    cache: TableCache,

    /// Path of the table currently shown.
    pub dataset_path: PathBuf,

    /// Current table (None when loading failed).
    pub table: Option<Arc<TrackTable>>,

    /// Sidebar selections.
    pub filters: FilterState,

    /// Feature choices of the histogram and scatter plot.
    pub options: ChartOptions,

    /// Indices of tracks passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Chart views for the current filters and options (cached).
    pub views: Option<Arc<ChartViews>>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            dataset_path: config.dataset_path.clone(),
            config,
            cache: TableCache::default(),
            table: None,
            filters: FilterState::default(),
            options: ChartOptions::default(),
            visible_indices: Vec::new(),
            views: None,
            status_message: None,
        }
    }

    /// Show the table at `path`, loading it unless it is cached.
    ///
    /// On failure the error becomes the status message and no table is shown.
    pub fn load(&mut self, path: &Path) {
        self.dataset_path = path.to_path_buf();
        match self.cache.get_or_load(path) {
            Ok(table) => self.set_table(table),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(e.to_string());
                self.table = None;
                self.visible_indices.clear();
                self.views = None;
            }
        }
    }

    /// Retry the current path.
    pub fn reload(&mut self) {
        let path = self.dataset_path.clone();
        self.load(&path);
    }

    /// Ingest a table, reset filters to their defaults and compute the views.
    fn set_table(&mut self, table: Arc<TrackTable>) {
        self.filters = FilterState::initial(&table, self.config.default_genre_count);
        self.table = Some(table);
        self.status_message = None;
        self.refresh();
    }

    /// Recompute `visible_indices` and every chart view.
    pub fn refresh(&mut self) {
        match &self.table {
            Some(table) => {
                self.visible_indices = filtered_indices(table, &self.filters);
                self.views = Some(Arc::new(ChartViews::compute(
                    table,
                    &self.visible_indices,
                    &self.options,
                    &self.config,
                )));
            }
            None => {
                self.visible_indices.clear();
                self.views = None;
            }
        }
    }

    pub fn set_popularity(&mut self, range: PopularityRange) {
        if range != self.filters.popularity {
            self.filters.popularity = range;
            self.refresh();
        }
    }

    pub fn set_options(&mut self, options: ChartOptions) {
        if options != self.options {
            self.options = options;
            self.refresh();
        }
    }

    /// Toggle a single genre in the selection.
    pub fn toggle_genre(&mut self, genre: &str) {
        self.filters.toggle_genre(genre);
        self.refresh();
    }

    /// Select every genre of the table.
    pub fn select_all(&mut self) {
        if let Some(table) = &self.table {
            self.filters.select_all(table);
            self.refresh();
        }
    }

    /// Deselect all genres.
    pub fn select_none(&mut self) {
        self.filters.select_none();
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Feature;

    const CSV: &str = "track_name,track_genre,popularity,mode\n\
                       A,pop,10,1\n\
                       B,pop,90,0\n\
                       C,rock,50,1\n";

    fn loaded_state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut state = AppState::new(DashboardConfig {
            dataset_path: path.clone(),
            ..DashboardConfig::default()
        });
        state.load(&path);
        (dir, state)
    }

    #[test]
    fn test_load_applies_default_filters() {
        let (_dir, state) = loaded_state();
        assert!(state.status_message.is_none());
        assert_eq!(state.filters.genres.len(), 2);
        assert_eq!(state.visible_indices, [0, 1, 2]);
        let views = state.views.as_ref().unwrap();
        assert_eq!(views.top_tracks[0].track_name, "B");
    }

    #[test]
    fn test_scenario_filter_pop() {
        let (_dir, mut state) = loaded_state();
        state.select_none();
        assert!(state.visible_indices.is_empty());
        assert!(state.views.as_ref().unwrap().top_tracks.is_empty());

        state.toggle_genre("pop");
        assert_eq!(state.visible_indices, [0, 1]);
        let top = &state.views.as_ref().unwrap().top_tracks;
        assert_eq!(top[0].popularity, 90);
    }

    #[test]
    fn test_popularity_and_options_refresh_views() {
        let (_dir, mut state) = loaded_state();
        state.set_popularity(PopularityRange::new(40, 60));
        assert_eq!(state.visible_indices, [2]);

        state.set_options(ChartOptions {
            histogram_feature: Feature::Energy,
            ..state.options
        });
        assert_eq!(
            state.views.as_ref().unwrap().histogram.feature,
            Feature::Energy
        );
    }

    #[test]
    fn test_unrated_tracks_stay_out_of_views() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.csv");
        std::fs::write(
            &path,
            "track_name,artists,track_genre,popularity\nA,X,pop,80\nB,X,pop,\nC,Y,pop,150\n",
        )
        .unwrap();

        let mut state = AppState::new(DashboardConfig::default());
        state.load(&path);
        assert_eq!(state.visible_indices, [0]);

        let views = state.views.as_ref().unwrap();
        assert_eq!(views.top_artists.len(), 1);
        assert_eq!(views.top_artists[0].label, "X");
        assert_eq!(views.top_artists[0].mean, 80.0);
        let names: Vec<&str> = views.top_tracks.iter().map(|t| t.track_name.as_str()).collect();
        assert_eq!(names, ["A"]);
    }

    #[test]
    fn test_missing_source_suppresses_views() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.csv");
        let mut state = AppState::new(DashboardConfig::default());
        state.load(&path);

        assert!(state.table.is_none());
        assert!(state.views.is_none());
        assert!(state.status_message.as_deref().unwrap().contains("not found"));

        std::fs::write(&path, CSV).unwrap();
        state.reload();
        assert!(state.table.is_some());
        assert!(state.status_message.is_none());
    }
}
