//! Small descriptive statistics shared by the chart views.
//!
//! Every function skips `NaN` inputs, mirroring how missing cells are
//! ignored by the dataframe libraries the dataset is usually explored with.

/// Arithmetic mean of the finite values, `None` when there are none.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Quantile `q ∈ [0, 1]` of an ascending slice using linear interpolation
/// between closest ranks.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Pearson correlation over the pairs where both values are present.
///
/// `NaN` when fewer than two complete pairs exist or either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter(|(x, y)| !x.is_nan() && !y.is_nan())
        .map(|(&x, &y)| (x, y))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)
}

/// Box-plot summary: quartiles, Tukey whiskers and outliers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    /// Values beyond 1.5·IQR from the box, ascending.
    pub outliers: Vec<f64>,
    pub count: usize,
}

/// Summarize the finite values, `None` when there are none.
pub fn box_summary(values: impl IntoIterator<Item = f64>) -> Option<BoxSummary> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile_sorted(&sorted, 0.25)?;
    let median = quantile_sorted(&sorted, 0.5)?;
    let q3 = quantile_sorted(&sorted, 0.75)?;

    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let inside = || sorted.iter().copied().filter(|v| (lower_fence..=upper_fence).contains(v));
    // Quartiles always lie inside the fences, so both folds see at least one value.
    let lower_whisker = inside().fold(f64::INFINITY, f64::min);
    let upper_whisker = inside().fold(f64::NEG_INFINITY, f64::max);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| !(lower_fence..=upper_fence).contains(v))
        .collect();

    Some(BoxSummary {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
        count: sorted.len(),
    })
}
