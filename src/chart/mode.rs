use super::stats::{box_summary, BoxSummary};
use crate::data::model::{Mode, TrackRecord};

/// One slice of the mode pie.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeShare {
    pub mode: Mode,
    pub count: usize,
    /// Share of the tracks whose mode is known.
    pub fraction: f64,
}

/// Danceability distribution for one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeBox {
    pub mode: Mode,
    pub summary: BoxSummary,
}

/// Count tracks per mode, largest first.  Tracks without a mode are not
/// counted and modes with no tracks are left out.
pub fn mode_shares(rows: &[&TrackRecord]) -> Vec<ModeShare> {
    let counts: Vec<(Mode, usize)> = Mode::ALL
        .iter()
        .map(|&mode| (mode, rows.iter().filter(|t| t.mode == Some(mode)).count()))
        .filter(|&(_, count)| count > 0)
        .collect();
    let total: usize = counts.iter().map(|(_, c)| c).sum();

    let mut shares: Vec<ModeShare> = counts
        .into_iter()
        .map(|(mode, count)| ModeShare {
            mode,
            count,
            fraction: count as f64 / total as f64,
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

/// Box-plot summary of danceability for each mode that has tracks.
pub fn danceability_by_mode(rows: &[&TrackRecord]) -> Vec<ModeBox> {
    Mode::ALL
        .iter()
        .filter_map(|&mode| {
            let values = rows
                .iter()
                .filter(|t| t.mode == Some(mode))
                .map(|t| t.danceability);
            box_summary(values).map(|summary| ModeBox { mode, summary })
        })
        .collect()
}
