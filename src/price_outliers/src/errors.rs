//! Error types for loading and discovery.

use std::path::PathBuf;

use thiserror::Error;

/// Why a file could not be turned into a [`PriceTable`](crate::models::table::PriceTable).
///
/// Every variant is recoverable: the batch orchestrator skips the file and moves
/// on, the single-file driver aborts.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path does not reference an existing regular file.
    #[error("the file '{}' does not exist", .path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The file is empty, corrupted, or not structurally a table.
    #[error("the file '{}' is empty or malformed: {reason}", .path.display())]
    Malformed {
        /// Offending file.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// One or more required columns are absent from the header row.
    #[error("the file must contain the following columns: {}; missing: {}", .required.join(", "), .missing.join(", "))]
    Schema {
        /// Full required column set, in identifier/date/price order.
        required: Vec<String>,
        /// Columns that were not found.
        missing: Vec<String>,
    },

    /// A date cell does not match the configured format.
    #[error("row {row}: date {value:?} does not match format '{format}'")]
    Format {
        /// 1-based source row (the header is row 1).
        row: usize,
        /// Cell text as read.
        value: String,
        /// Expected `chrono` format string.
        format: String,
    },

    /// A price cell is empty, non-numeric, or not finite.
    #[error("row {row}: price {value:?} is not a finite number")]
    InvalidPrice {
        /// 1-based source row (the header is row 1).
        row: usize,
        /// Cell text as read.
        value: String,
    },

    /// Fewer rows than a single window needs.
    #[error("the dataset must contain at least {required} data points, found {found}")]
    InsufficientData {
        /// Rows present after validation.
        found: usize,
        /// Minimum row count.
        required: usize,
    },

    /// The operating system failed to read the file.
    #[error("I/O error reading '{}'", .path.display())]
    Io {
        /// Offending file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Fieldless tag for [`LoadError`], convenient for matching and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum LoadErrorKind {
    /// See [`LoadError::NotFound`].
    NotFound,
    /// See [`LoadError::Malformed`].
    Malformed,
    /// See [`LoadError::Schema`].
    Schema,
    /// See [`LoadError::Format`].
    Format,
    /// See [`LoadError::InvalidPrice`].
    InvalidPrice,
    /// See [`LoadError::InsufficientData`].
    InsufficientData,
    /// See [`LoadError::Io`].
    Io,
}

impl LoadError {
    /// The variant tag of this error.
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::NotFound { .. } => LoadErrorKind::NotFound,
            LoadError::Malformed { .. } => LoadErrorKind::Malformed,
            LoadError::Schema { .. } => LoadErrorKind::Schema,
            LoadError::Format { .. } => LoadErrorKind::Format,
            LoadError::InvalidPrice { .. } => LoadErrorKind::InvalidPrice,
            LoadError::InsufficientData { .. } => LoadErrorKind::InsufficientData,
            LoadError::Io { .. } => LoadErrorKind::Io,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        LoadError::Malformed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Raised by [`batch::process_all`](crate::batch::process_all) when the root
/// directory itself is unusable. Per-file problems never surface here.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The root path does not exist or is not a directory.
    #[error("batch root '{}' is not a directory", .path.display())]
    NotADirectory {
        /// Configured root.
        path: PathBuf,
    },
}
