//! One validated input row.

use chrono::NaiveDate;
use serde::Serialize;

/// A single validated price row.
///
/// Only rows that passed loader validation exist as `Observation`s, so `price`
/// is always finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    /// Instrument identifier (e.g., "FLTR.L").
    pub identifier: String,
    /// Trading date.
    pub date: NaiveDate,
    /// Price for that date.
    pub price: f64,
}

impl Observation {
    /// Build an observation from its three fields.
    pub fn new(identifier: impl Into<String>, date: NaiveDate, price: f64) -> Self {
        Self {
            identifier: identifier.into(),
            date,
            price,
        }
    }
}
