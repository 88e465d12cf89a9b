//! Canonical in-memory shapes for price data as it moves through the pipeline.
//!
//! [`observation::Observation`] is one validated row, [`table::PriceTable`] is a
//! whole validated file and [`window::Window`] is the 30-row slice the analyses
//! run on.

pub mod observation;
pub mod table;
pub mod window;

/// Number of consecutive observations in every sampled window.
pub const WINDOW_LEN: usize = 30;
