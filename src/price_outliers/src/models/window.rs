//! The fixed-length slice both analyses operate on.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{WINDOW_LEN, observation::Observation};

/// Exactly [`WINDOW_LEN`] consecutive observations copied out of a
/// [`PriceTable`](crate::models::table::PriceTable).
///
/// A window owns its rows; the analyses never modify it and build their own
/// scored copies instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Window {
    start: usize,
    observations: Vec<Observation>,
}

impl Window {
    pub(crate) fn new(start: usize, observations: Vec<Observation>) -> Self {
        debug_assert_eq!(observations.len(), WINDOW_LEN);
        Self {
            start,
            observations,
        }
    }

    /// Offset of the first row within the source table.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Rows in date order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Prices in row order.
    pub fn prices(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.price).collect()
    }

    /// Date range covered, first to last row inclusive.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        // Windows are never empty.
        let first = self.observations[0].date;
        let last = self.observations[self.observations.len() - 1].date;
        (first, last)
    }
}
