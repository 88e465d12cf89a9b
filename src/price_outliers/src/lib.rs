//! Random-window outlier and deviation analysis for daily stock price tables.
//!
//! The pipeline per file is:
//! [`loader::load`] -> [`sampler::sample`] -> ([`outliers::detect_outliers`],
//! [`deviation::analyze_deviation`]). [`pipeline::analyze_file`] runs it for one
//! file and [`batch::process_all`] runs it for every matching file under a
//! directory tree.

#![deny(missing_docs)]

pub mod batch;
pub mod config;
pub mod deviation;
pub mod errors;
pub mod loader;
pub mod models;
pub mod outliers;
pub mod pipeline;
pub mod report;
pub mod sampler;
pub mod stats;

pub use errors::{LoadError, LoadErrorKind};
pub use models::{observation::Observation, table::PriceTable, window::Window, WINDOW_LEN};
