//! Run configuration: column naming, thresholds, and file locations.
//!
//! The TOML file has two optional sections, one per entry point:
//!
//! ```toml
//! [single]
//! source_path = "data/FLTRLSE.csv"
//! zscore_threshold = 2.0
//! pct_threshold = 2.0
//!
//! [batch]
//! root_dir = "data/lse"
//! extension = "xlsx"
//! zscore_threshold = 2.0
//! pct_threshold = 5.0
//!   [batch.columns]
//!   identifier = "Stock_ID"
//!   date = "Date"
//!   price = "Stock_Price"
//! ```
//!
//! Anything left out falls back to the presets on [`AnalysisParams`]. The two
//! sections are deliberately independent: the single-file and batch variants
//! have different default column names and deviation thresholds.
//!
//! Entrypoints:
//! - Parse + validate from a TOML string: [`load_config_str`]
//! - Parse + validate from a file path: [`load_config_path`]

use std::{collections::HashSet, path::PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date format used by every known input file (`31-12-2024`).
pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";

/// File extension the batch variant looks for when none is configured.
pub const DEFAULT_BATCH_EXTENSION: &str = "xlsx";

/// Validation failures for an otherwise well-formed configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A column name is blank after trimming.
    #[error("column name for '{0}' cannot be empty")]
    EmptyColumn(&'static str),

    /// Two roles map to the same column header.
    #[error("column '{0}' is assigned to more than one role")]
    DuplicateColumn(String),

    /// The date format string is blank.
    #[error("date_format cannot be empty")]
    EmptyDateFormat,

    /// A threshold is negative, NaN, or infinite.
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidThreshold {
        /// Which threshold.
        name: &'static str,
        /// Value supplied.
        value: f64,
    },

    /// The batch extension is blank after trimming the leading dot.
    #[error("batch extension cannot be empty")]
    EmptyExtension,
}

/// Header names of the three required columns, plus the date format.
///
/// Header matching is exact after trimming whitespace (and a UTF-8 BOM).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSchema {
    /// Identifier column (e.g., "Stock-ID").
    pub identifier: String,
    /// Date column (e.g., "Date").
    pub date: String,
    /// Price column (e.g., "Stock_Price").
    pub price: String,
    /// `chrono` format string for the date column.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl ColumnSchema {
    /// Column names used by the delimited-text exports (`Stock-ID`, `Date`, `Stock_Price`).
    pub fn delimited() -> Self {
        Self {
            identifier: "Stock-ID".into(),
            date: "Date".into(),
            price: "Stock_Price".into(),
            date_format: default_date_format(),
        }
    }

    /// Column names used by the spreadsheet exports (`Stock_ID`, `Date`, `Stock_Price`).
    pub fn spreadsheet() -> Self {
        Self {
            identifier: "Stock_ID".into(),
            ..Self::delimited()
        }
    }

    /// Required headers in identifier/date/price order.
    pub fn required(&self) -> [&str; 3] {
        [
            self.identifier.as_str(),
            self.date.as_str(),
            self.price.as_str(),
        ]
    }

    /// Check names are non-empty and pairwise distinct.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let roles = [
            ("identifier", &self.identifier),
            ("date", &self.date),
            ("price", &self.price),
        ];
        let mut seen = HashSet::new();
        for (role, name) in roles {
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::EmptyColumn(role));
            }
            if !seen.insert(name) {
                return Err(ConfigError::DuplicateColumn(name.to_string()));
            }
        }
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::EmptyDateFormat);
        }
        Ok(())
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::delimited()
    }
}

/// Everything the per-file pipeline needs besides the path and the RNG.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisParams {
    /// Column layout of the input.
    pub columns: ColumnSchema,
    /// `|z| > zscore_threshold` marks an outlier.
    pub zscore_threshold: f64,
    /// `pct_deviation > pct_threshold` marks a row above threshold.
    pub pct_threshold: f64,
}

impl AnalysisParams {
    /// Defaults of the single-file variant: delimited columns, z > 2, deviation > 2%.
    pub fn single_file() -> Self {
        Self {
            columns: ColumnSchema::delimited(),
            zscore_threshold: 2.0,
            pct_threshold: 2.0,
        }
    }

    /// Defaults of the batch variant: spreadsheet columns, z > 2, deviation > 5%.
    pub fn batch() -> Self {
        Self {
            columns: ColumnSchema::spreadsheet(),
            zscore_threshold: 2.0,
            pct_threshold: 5.0,
        }
    }

    /// Validate columns and both thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.columns.validate()?;
        check_threshold("zscore_threshold", self.zscore_threshold)?;
        check_threshold("pct_threshold", self.pct_threshold)?;
        Ok(())
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

/// `[single]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SingleSection {
    /// File to analyze.
    pub source_path: Option<PathBuf>,
    /// Overrides [`AnalysisParams::single_file`]'s z-score threshold.
    pub zscore_threshold: Option<f64>,
    /// Overrides [`AnalysisParams::single_file`]'s deviation threshold.
    pub pct_threshold: Option<f64>,
    /// Overrides [`ColumnSchema::delimited`].
    pub columns: Option<ColumnSchema>,
}

impl SingleSection {
    /// Merge this section onto the single-file preset.
    pub fn params(&self) -> AnalysisParams {
        merge(
            AnalysisParams::single_file(),
            self.columns.as_ref(),
            self.zscore_threshold,
            self.pct_threshold,
        )
    }
}

/// `[batch]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BatchSection {
    /// Directory searched recursively.
    pub root_dir: Option<PathBuf>,
    /// Extension of files to pick up, with or without the leading dot.
    pub extension: Option<String>,
    /// Overrides [`AnalysisParams::batch`]'s z-score threshold.
    pub zscore_threshold: Option<f64>,
    /// Overrides [`AnalysisParams::batch`]'s deviation threshold.
    pub pct_threshold: Option<f64>,
    /// Overrides [`ColumnSchema::spreadsheet`].
    pub columns: Option<ColumnSchema>,
}

impl BatchSection {
    /// Merge this section onto the batch preset.
    pub fn params(&self) -> AnalysisParams {
        merge(
            AnalysisParams::batch(),
            self.columns.as_ref(),
            self.zscore_threshold,
            self.pct_threshold,
        )
    }

    /// Configured extension without a leading dot, or [`DEFAULT_BATCH_EXTENSION`].
    pub fn extension(&self) -> String {
        self.extension
            .as_deref()
            .map(normalize_extension)
            .unwrap_or_else(|| DEFAULT_BATCH_EXTENSION.to_string())
    }
}

/// Trim whitespace and one leading dot: `" .XLSX"` -> `"XLSX"`.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    ext.strip_prefix('.').unwrap_or(ext).to_string()
}

fn merge(
    mut base: AnalysisParams,
    columns: Option<&ColumnSchema>,
    zscore_threshold: Option<f64>,
    pct_threshold: Option<f64>,
) -> AnalysisParams {
    if let Some(c) = columns {
        base.columns = c.clone();
    }
    if let Some(z) = zscore_threshold {
        base.zscore_threshold = z;
    }
    if let Some(p) = pct_threshold {
        base.pct_threshold = p;
    }
    base
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Single-file settings.
    #[serde(default)]
    pub single: SingleSection,
    /// Batch settings.
    #[serde(default)]
    pub batch: BatchSection,
}

impl AppConfig {
    /// Validate both sections' effective parameters and the batch extension.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.single.params().validate()?;
        self.batch.params().validate()?;
        if self.batch.extension().is_empty() {
            return Err(ConfigError::EmptyExtension);
        }
        Ok(())
    }
}

/// Parse and validate a configuration from a TOML string.
///
/// Errors:
/// - TOML syntax errors and unknown keys
/// - Validation errors (see [`ConfigError`])
pub fn load_config_str(toml_str: &str) -> anyhow::Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(toml_str).context("failed to parse config TOML")?;
    cfg.validate().context("invalid configuration")?;
    Ok(cfg)
}

/// Read a configuration TOML file from disk, parse, and validate it.
pub fn load_config_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<AppConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}
