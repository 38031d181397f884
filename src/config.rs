use std::path::PathBuf;

/// Dataset location and the fixed knobs of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Table loaded at startup, relative to the working directory.
    pub dataset_path: PathBuf,
    /// How many genres are pre-selected in the sidebar.
    pub default_genre_count: usize,
    /// Number of equal-width bins in the feature histogram.
    pub histogram_bins: usize,
    /// Length of the track, artist and genre rankings.
    pub ranking_len: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("dataset.csv"),
            default_genre_count: 5,
            histogram_bins: 30,
            ranking_len: 10,
        }
    }
}
