//! Percentage deviation from the window mean.
//!
//! For every row: `deviation = price - mean`,
//! `pct_deviation = |deviation| / mean * 100`, and
//! `above_threshold = pct_deviation > threshold_pct`.
//!
//! Zero mean: the percentage is undefined, so a row with a non-zero deviation
//! gets `pct_deviation = +inf` (always above any finite threshold) and a row
//! with zero deviation gets `0.0`.

use serde::Serialize;
use tracing::debug;

use crate::{
    models::{observation::Observation, window::Window},
    stats::mean,
};

/// An observation with its deviation columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviationRow {
    /// Source row.
    #[serde(flatten)]
    pub observation: Observation,
    /// `price - mean`.
    pub deviation: f64,
    /// `|deviation| / mean * 100`.
    pub pct_deviation: f64,
    /// `pct_deviation > threshold_pct`.
    pub above_threshold: bool,
}

/// Result of [`analyze_deviation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviationReport {
    /// Mean price of the window.
    pub mean_price: f64,
    /// Threshold, in percent, the flags were computed with.
    pub threshold_pct: f64,
    /// One row per window row, in date order.
    pub rows: Vec<DeviationRow>,
}

impl DeviationReport {
    /// Rows flagged as above threshold.
    pub fn flagged(&self) -> impl Iterator<Item = &DeviationRow> {
        self.rows.iter().filter(|r| r.above_threshold)
    }
}

/// Percentage of `mean` that `deviation` represents, with the zero-mean policy applied.
pub fn pct_of_mean(deviation: f64, mean: f64) -> f64 {
    if mean == 0.0 {
        if deviation == 0.0 { 0.0 } else { f64::INFINITY }
    } else {
        deviation.abs() / mean * 100.0
    }
}

/// Compute the window mean and each row's deviation from it.
pub fn analyze_deviation(window: &Window, threshold_pct: f64) -> DeviationReport {
    let mean_price = mean(&window.prices());
    let rows: Vec<DeviationRow> = window
        .observations()
        .iter()
        .map(|o| {
            let deviation = o.price - mean_price;
            let pct_deviation = pct_of_mean(deviation, mean_price);
            DeviationRow {
                observation: o.clone(),
                deviation,
                pct_deviation,
                above_threshold: pct_deviation > threshold_pct,
            }
        })
        .collect();

    let report = DeviationReport {
        mean_price,
        threshold_pct,
        rows,
    };
    debug!(
        mean_price,
        threshold_pct,
        flagged = report.flagged().count(),
        "computed deviations"
    );
    report
}
