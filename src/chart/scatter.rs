use crate::data::model::{Feature, TrackRecord};

/// A plotted track with the details shown on hover.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub track_name: String,
    pub artist: String,
    pub popularity: Option<u8>,
}

impl ScatterPoint {
    pub fn hover_text(&self) -> String {
        let popularity = self
            .popularity
            .map(|p| p.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "{}\n{}\nPopularity: {popularity}",
            self.track_name, self.artist
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterView {
    pub x_feature: Feature,
    pub y_feature: Feature,
    pub points: Vec<ScatterPoint>,
}

impl ScatterView {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point closest to `(x, y)`.
    pub fn nearest(&self, x: f64, y: f64) -> Option<&ScatterPoint> {
        self.points.iter().min_by(|a, b| {
            let da = (a.x - x).powi(2) + (a.y - y).powi(2);
            let db = (b.x - x).powi(2) + (b.y - y).powi(2);
            da.total_cmp(&db)
        })
    }
}

/// Pair two features per track.  Tracks missing either value are left out.
pub fn feature_scatter(rows: &[&TrackRecord], x_feature: Feature, y_feature: Feature) -> ScatterView {
    let points = rows
        .iter()
        .filter_map(|t| {
            let x = x_feature.value(t);
            let y = y_feature.value(t);
            (x.is_finite() && y.is_finite()).then(|| ScatterPoint {
                x,
                y,
                track_name: t.track_name.clone(),
                artist: t.artist.clone(),
                popularity: t.popularity,
            })
        })
        .collect();

    ScatterView {
        x_feature,
        y_feature,
        points,
    }
}
