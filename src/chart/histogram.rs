use crate::data::model::{Feature, TrackRecord};

/// One fixed-width bin.  Bins are half-open `[start, end)` except the last,
/// which also holds the maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramView {
    pub feature: Feature,
    pub bins: Vec<HistogramBin>,
}

impl HistogramView {
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Number of values that landed in a bin.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Distribution of `feature` over `bin_count` equal-width bins spanning the
/// observed range.  A constant column gets one unit-wide bin around its value.
pub fn feature_histogram(rows: &[&TrackRecord], feature: Feature, bin_count: usize) -> HistogramView {
    let values: Vec<f64> = rows
        .iter()
        .map(|t| feature.value(t))
        .filter(|v| v.is_finite())
        .collect();

    let mut view = HistogramView {
        feature,
        bins: Vec::new(),
    };
    if values.is_empty() || bin_count == 0 {
        return view;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        view.bins.push(HistogramBin {
            start: min - 0.5,
            end: max + 0.5,
            count: values.len(),
        });
        return view;
    }

    let width = (max - min) / bin_count as f64;
    view.bins = (0..bin_count)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: if i + 1 == bin_count {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    for v in values {
        let idx = (((v - min) / width).floor() as usize).min(bin_count - 1);
        view.bins[idx].count += 1;
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(values: &[f64]) -> Vec<TrackRecord> {
        values
            .iter()
            .map(|&v| {
                let mut t = TrackRecord::mock("t", "pop", 50);
                t.energy = v;
                t
            })
            .collect()
    }

    #[test]
    fn test_thirty_bins_cover_range() {
        let values: Vec<f64> = (0..=100).map(|i| i as f64 / 100.0).collect();
        let owned = tracks(&values);
        let rows: Vec<&TrackRecord> = owned.iter().collect();

        let view = feature_histogram(&rows, Feature::Energy, 30);
        assert_eq!(view.bins.len(), 30);
        assert_eq!(view.total(), 101);
        assert_eq!(view.bins[0].start, 0.0);
        assert_eq!(view.bins[29].end, 1.0);
        // The maximum falls into the closed last bin.
        assert!(view.bins[29].count >= 1);
        let widths: Vec<f64> = view.bins.iter().map(HistogramBin::width).collect();
        assert!(widths.iter().all(|w| (w - 1.0 / 30.0).abs() < 1e-9));
    }

    #[test]
    fn test_nan_values_are_skipped() {
        let owned = tracks(&[0.1, f64::NAN, 0.9]);
        let rows: Vec<&TrackRecord> = owned.iter().collect();
        let view = feature_histogram(&rows, Feature::Energy, 30);
        assert_eq!(view.total(), 2);
    }

    #[test]
    fn test_constant_column_single_bin() {
        let owned = tracks(&[0.4, 0.4]);
        let rows: Vec<&TrackRecord> = owned.iter().collect();
        let view = feature_histogram(&rows, Feature::Energy, 30);
        assert_eq!(view.bins.len(), 1);
        assert_eq!(view.bins[0].count, 2);
        assert!((view.bins[0].center() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input() {
        let view = feature_histogram(&[], Feature::Valence, 30);
        assert!(view.is_empty());
    }
}
