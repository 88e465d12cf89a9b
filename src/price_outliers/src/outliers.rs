//! Z-score outlier detection over a sampled window.
//!
//! `z_i = (price_i - mean) / std` with the population standard deviation
//! (ddof = 0). A row is an outlier iff `|z_i| > threshold`, strictly, on both
//! tails.
//!
//! Zero variance: when every price in the window is identical the standard
//! deviation is zero and every z-score is defined as `0.0`. Such a window never
//! has outliers, whatever the threshold.

use serde::Serialize;
use tracing::debug;

use crate::{
    models::{observation::Observation, window::Window},
    stats::mean_std,
};

/// An observation together with its z-score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZScoredRow {
    /// Source row.
    #[serde(flatten)]
    pub observation: Observation,
    /// Signed distance from the window mean in standard deviations.
    pub z_score: f64,
}

/// A window with a z-score attached to every row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZScoredWindow {
    /// Offset of the window in its source table.
    pub start: usize,
    /// Mean price of the window.
    pub mean: f64,
    /// Population standard deviation of the window's prices.
    pub std_dev: f64,
    /// Scored rows in date order.
    pub rows: Vec<ZScoredRow>,
}

impl ZScoredWindow {
    /// Score every row of `window`. The window itself is left untouched.
    pub fn score(window: &Window) -> Self {
        let (mean, std_dev) = mean_std(&window.prices());
        let rows = window
            .observations()
            .iter()
            .map(|o| ZScoredRow {
                observation: o.clone(),
                z_score: if std_dev > 0.0 {
                    (o.price - mean) / std_dev
                } else {
                    0.0
                },
            })
            .collect();

        Self {
            start: window.start(),
            mean,
            std_dev,
            rows,
        }
    }

    /// `true` when all prices are equal (z-scores are all zero by definition).
    pub fn is_degenerate(&self) -> bool {
        self.std_dev == 0.0
    }

    /// Rows whose `|z|` strictly exceeds `threshold`, in date order.
    ///
    /// Pure filter over the stored scores: calling it again with the same
    /// threshold returns the same rows.
    pub fn outliers(&self, threshold: f64) -> Vec<ZScoredRow> {
        self.rows
            .iter()
            .filter(|r| is_outlier(r.z_score, threshold))
            .cloned()
            .collect()
    }
}

/// The outlier predicate: `|z| > threshold`.
pub fn is_outlier(z_score: f64, threshold: f64) -> bool {
    z_score.abs() > threshold
}

/// Result of [`detect_outliers`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    /// Threshold the outliers were selected with.
    pub threshold: f64,
    /// The full window with z-scores.
    pub scored: ZScoredWindow,
    /// Rows with `|z| > threshold`. Empty is a normal outcome.
    pub outliers: Vec<ZScoredRow>,
}

impl OutlierReport {
    /// `true` when no row crossed the threshold.
    pub fn is_empty(&self) -> bool {
        self.outliers.is_empty()
    }
}

/// Score `window` and select the rows whose `|z|` exceeds `threshold`.
pub fn detect_outliers(window: &Window, threshold: f64) -> OutlierReport {
    let scored = ZScoredWindow::score(window);
    let outliers = scored.outliers(threshold);
    debug!(
        start = scored.start,
        threshold,
        outliers = outliers.len(),
        degenerate = scored.is_degenerate(),
        "scored window"
    );
    OutlierReport {
        threshold,
        scored,
        outliers,
    }
}
