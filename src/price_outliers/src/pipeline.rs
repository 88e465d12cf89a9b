//! Single-file driver: load -> sample -> (detect outliers, analyze deviation).

use std::path::{Path, PathBuf};

use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::{
    config::AnalysisParams,
    deviation::{DeviationReport, analyze_deviation},
    errors::LoadError,
    loader,
    models::{table::PriceTable, window::Window},
    outliers::{OutlierReport, detect_outliers},
    sampler,
};

/// Everything computed for one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileAnalysis {
    /// File the window was sampled from.
    pub path: PathBuf,
    /// The sampled window, unmodified.
    pub window: Window,
    /// Z-score scoring and selected outliers.
    pub outliers: OutlierReport,
    /// Mean price and per-row percentage deviations.
    pub deviation: DeviationReport,
}

/// Sample a window from an already loaded table and run both analyses on it.
///
/// The table is only borrowed for the copy; both analyses work on the window.
pub fn analyze_table<R: Rng + ?Sized>(
    path: impl Into<PathBuf>,
    table: &PriceTable,
    params: &AnalysisParams,
    rng: &mut R,
) -> FileAnalysis {
    let window = sampler::sample(table, rng);
    let outliers = detect_outliers(&window, params.zscore_threshold);
    let deviation = analyze_deviation(&window, params.pct_threshold);

    FileAnalysis {
        path: path.into(),
        window,
        outliers,
        deviation,
    }
}

/// Load `path` and analyze one random window of it.
///
/// Load failures are returned unchanged so the caller decides whether to abort
/// or skip.
pub fn analyze_file<R: Rng + ?Sized>(
    path: impl AsRef<Path>,
    params: &AnalysisParams,
    rng: &mut R,
) -> Result<FileAnalysis, LoadError> {
    let path = path.as_ref();
    let table = loader::load(path, &params.columns)?;
    let analysis = analyze_table(path, &table, params, rng);

    let (first, last) = analysis.window.date_range();
    info!(
        path = %path.display(),
        rows = table.len(),
        start = analysis.window.start(),
        %first,
        %last,
        outliers = analysis.outliers.outliers.len(),
        flagged = analysis.deviation.flagged().count(),
        "analyzed file"
    );
    Ok(analysis)
}
