//! Plain descriptive statistics over price slices.

/// Mean and population standard deviation (ddof = 0).
///
/// Returns `(0.0, 0.0)` for an empty slice. When every value is identical the
/// deviation is exactly `0.0` and the mean is that value, so rounding in the
/// running sum cannot leak a tiny non-zero spread into z-scores. Finite input
/// always gives finite results, even when the plain sums would overflow.
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    let Some(&first) = values.first() else {
        return (0.0, 0.0);
    };
    if values.iter().all(|&v| v == first) {
        return (first, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let sq_diff: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    if mean.is_finite() && sq_diff.is_finite() {
        return (mean, (sq_diff / n).sqrt());
    }

    if !values.iter().all(|v| v.is_finite()) {
        return (mean, (sq_diff / n).sqrt());
    }
    // The sums overflowed: redo them on values scaled into [-1, 1].
    let scale = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let scaled: Vec<f64> = values.iter().map(|v| v / scale).collect();
    let (m, s) = mean_std(&scaled);
    (m * scale, s * scale)
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    mean_std(values).0
}
