//! Batch orchestration: every matching file under a directory tree.
//!
//! Discovery is a lazy [`walkdir`] traversal filtered by extension
//! (case-insensitive). Traversal order is whatever the file system returns and
//! must not be relied on. Each file runs through
//! [`pipeline::analyze_file`](crate::pipeline::analyze_file) on its own; a file
//! that fails to load is logged, recorded as a [`SkippedFile`] and the run
//! continues. Unreadable directory entries are logged and ignored.

use std::path::{Path, PathBuf};

use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::{
    config::{AnalysisParams, normalize_extension},
    errors::{DiscoveryError, LoadErrorKind},
    pipeline::{FileAnalysis, analyze_file},
};

/// What to scan and how to analyze each file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchJob {
    /// Directory searched recursively.
    pub root_dir: PathBuf,
    /// File extension to pick up, without the leading dot.
    pub extension: String,
    /// Per-file analysis parameters.
    pub params: AnalysisParams,
}

/// A file that was discovered but could not be analyzed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFile {
    /// Offending file.
    pub path: PathBuf,
    /// Error class.
    pub kind: LoadErrorKind,
    /// Rendered error message.
    pub reason: String,
}

/// Outcome of [`process_all`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    /// One entry per successfully analyzed file, in discovery order.
    pub results: Vec<FileAnalysis>,
    /// Files that failed to load.
    pub skipped: Vec<SkippedFile>,
}

/// Lazily yield every regular file under `root` whose extension equals
/// `extension`, ignoring ASCII case and a leading dot.
pub fn discover(root: &Path, extension: &str) -> impl Iterator<Item = PathBuf> + use<> {
    let wanted = normalize_extension(extension).to_ascii_lowercase();

    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(move |e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(&wanted))
        })
        .map(|e| e.into_path())
}

/// Analyze every file [`discover`] finds under `job.root_dir`.
///
/// Errors:
/// - [`DiscoveryError::NotADirectory`] when the root is missing or not a directory.
///   Per-file failures never abort the run.
pub fn process_all<R: Rng + ?Sized>(
    job: &BatchJob,
    rng: &mut R,
) -> Result<BatchReport, DiscoveryError> {
    if !job.root_dir.is_dir() {
        return Err(DiscoveryError::NotADirectory {
            path: job.root_dir.clone(),
        });
    }

    let mut report = BatchReport::default();
    for path in discover(&job.root_dir, &job.extension) {
        match analyze_file(&path, &job.params, rng) {
            Ok(analysis) => report.results.push(analysis),
            Err(err) => {
                warn!(path = %path.display(), kind = ?err.kind(), error = %err, "skipping file");
                report.skipped.push(SkippedFile {
                    path,
                    kind: err.kind(),
                    reason: err.to_string(),
                });
            }
        }
    }

    info!(
        root = %job.root_dir.display(),
        processed = report.results.len(),
        skipped = report.skipped.len(),
        "batch finished"
    );
    Ok(report)
}
