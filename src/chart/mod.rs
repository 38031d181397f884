/// Chart views: pure computations from the filtered rows to what gets drawn.
///
/// Each view is computed independently from the same filtered rows; none of
/// them reads another's output.  The UI layer only draws the results.

pub mod correlation;
pub mod histogram;
pub mod mode;
pub mod ranking;
pub mod scatter;
pub mod stats;

use crate::config::DashboardConfig;
use crate::data::model::{Feature, TrackRecord, TrackTable};

use correlation::CorrelationMatrix;
use histogram::HistogramView;
use mode::{ModeBox, ModeShare};
use ranking::{GroupMean, RankedTrack};
use scatter::ScatterView;

/// Feature choices made in the chart dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub histogram_feature: Feature,
    pub scatter_x: Feature,
    pub scatter_y: Feature,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            histogram_feature: Feature::ALL[0],
            scatter_x: Feature::ALL[0],
            scatter_y: Feature::ALL[1],
        }
    }
}

/// All eight views for one filter/option combination.
#[derive(Debug, Clone)]
pub struct ChartViews {
    pub histogram: HistogramView,
    pub scatter: ScatterView,
    pub correlation: CorrelationMatrix,
    pub top_tracks: Vec<RankedTrack>,
    pub top_artists: Vec<GroupMean>,
    pub mode_shares: Vec<ModeShare>,
    pub danceability_by_mode: Vec<ModeBox>,
    pub top_genres: Vec<GroupMean>,
}

impl ChartViews {
    /// Compute every view from the tracks at `indices`.
    pub fn compute(
        table: &TrackTable,
        indices: &[usize],
        options: &ChartOptions,
        config: &DashboardConfig,
    ) -> Self {
        let rows: Vec<&TrackRecord> = indices.iter().map(|&i| &table.tracks[i]).collect();
        log::debug!("Recomputing chart views for {} tracks", rows.len());

        ChartViews {
            histogram: histogram::feature_histogram(
                &rows,
                options.histogram_feature,
                config.histogram_bins,
            ),
            scatter: scatter::feature_scatter(&rows, options.scatter_x, options.scatter_y),
            correlation: correlation::correlation_matrix(&rows),
            top_tracks: ranking::top_tracks(&rows, config.ranking_len),
            top_artists: ranking::top_artists(&rows, config.ranking_len),
            mode_shares: mode::mode_shares(&rows),
            danceability_by_mode: mode::danceability_by_mode(&rows),
            top_genres: ranking::top_genres(&rows, config.ranking_len),
        }
    }
}
