use super::stats::pearson;
use crate::data::model::{Feature, SourceColumn, TrackRecord};

/// Square matrix of pairwise Pearson coefficients with row/column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<&'static str>,
    /// Row-major, `labels.len()` × `labels.len()`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    /// Cell annotation at two decimals; blank for undefined coefficients.
    pub fn annotation(&self, row: usize, col: usize) -> String {
        let v = self.get(row, col);
        if v.is_nan() {
            String::new()
        } else {
            format!("{v:.2}")
        }
    }
}

/// The seven selectable audio features followed by popularity.
fn columns(rows: &[&TrackRecord]) -> Vec<(&'static str, Vec<f64>)> {
    let mut columns: Vec<(&'static str, Vec<f64>)> = Feature::ALL
        .iter()
        .map(|f| (f.label(), rows.iter().map(|t| f.value(t)).collect()))
        .collect();
    columns.push((
        SourceColumn::Popularity.label(),
        rows.iter()
            .map(|t| t.popularity.map_or(f64::NAN, f64::from))
            .collect(),
    ));
    columns
}

/// Pairwise-complete Pearson correlation of the audio features and popularity.
///
/// The matrix is symmetric.  The diagonal is exactly 1 for every column with
/// variance; degenerate columns and pairs are `NaN`.
pub fn correlation_matrix(rows: &[&TrackRecord]) -> CorrelationMatrix {
    let columns = columns(rows);
    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];

    for i in 0..n {
        for j in i..n {
            let r = pearson(&columns[i].1, &columns[j].1);
            let r = if i == j && !r.is_nan() { 1.0 } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        labels: columns.iter().map(|(label, _)| *label).collect(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TrackRecord> {
        [
            (0.1, 0.9, 0.3, 10),
            (0.4, 0.5, 0.8, 35),
            (0.7, 0.6, 0.2, 60),
            (0.9, 0.1, 0.5, 80),
            (0.5, 0.3, 0.9, 95),
        ]
        .iter()
        .enumerate()
        .map(|(i, &(dance, energy, valence, pop))| {
            let mut t = TrackRecord::mock(&format!("t{i}"), "pop", pop);
            t.danceability = dance;
            t.energy = energy;
            t.valence = valence;
            t.loudness = -10.0 + i as f64 * 1.5;
            t.acousticness = 1.0 - dance;
            t.instrumentalness = (i * i) as f64 / 20.0;
            t.liveness = 0.05 * (5 - i) as f64;
            t
        })
        .collect()
    }

    #[test]
    fn test_symmetric_with_unit_diagonal() {
        let owned = sample();
        let rows: Vec<&TrackRecord> = owned.iter().collect();
        let m = correlation_matrix(&rows);

        assert_eq!(m.size(), 8);
        assert_eq!(m.labels.last(), Some(&"Popularity"));
        for i in 0..m.size() {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..m.size() {
                assert_eq!(m.get(i, j).to_bits(), m.get(j, i).to_bits());
                assert!((-1.0..=1.0).contains(&m.get(i, j)));
            }
        }
    }

    #[test]
    fn test_perfect_negative_pair() {
        let owned = sample();
        let rows: Vec<&TrackRecord> = owned.iter().collect();
        let m = correlation_matrix(&rows);
        // Acousticness is 1 - danceability.
        assert!((m.get(0, 3) + 1.0).abs() < 1e-9);
        assert_eq!(m.annotation(0, 3), "-1.00");
    }

    #[test]
    fn test_empty_rows_give_blank_matrix() {
        let m = correlation_matrix(&[]);
        assert_eq!(m.size(), 8);
        assert!(m.values.iter().flatten().all(|v| v.is_nan()));
        assert_eq!(m.annotation(0, 0), "");
    }
}
