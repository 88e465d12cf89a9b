//! Validated, date-sorted contents of one input file.

use tracing::debug;

use crate::{
    errors::LoadError,
    models::{WINDOW_LEN, observation::Observation, window::Window},
};

/// A whole file worth of observations, sorted ascending by date.
///
/// The only way to obtain one is through [`PriceTable::new`], which sorts and
/// enforces the minimum length, so every table can yield at least one window.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    observations: Vec<Observation>,
}

impl PriceTable {
    /// Sort `observations` by date and wrap them.
    ///
    /// The sort is stable: rows sharing a date keep their source order.
    ///
    /// Errors:
    /// - [`LoadError::InsufficientData`] when fewer than [`WINDOW_LEN`] rows are given
    pub fn new(mut observations: Vec<Observation>) -> Result<Self, LoadError> {
        observations.sort_by_key(|o| o.date);
        if observations.len() < WINDOW_LEN {
            return Err(LoadError::InsufficientData {
                found: observations.len(),
                required: WINDOW_LEN,
            });
        }
        debug!(rows = observations.len(), "built price table");
        Ok(Self { observations })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Rows in date order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Largest valid window offset (`len - WINDOW_LEN`).
    pub fn max_start(&self) -> usize {
        self.observations.len() - WINDOW_LEN
    }

    /// Copy out the window beginning at row `start`, or `None` if it would run
    /// past the end of the table.
    pub fn window_at(&self, start: usize) -> Option<Window> {
        let end = start.checked_add(WINDOW_LEN)?;
        let rows = self.observations.get(start..end)?;
        Some(Window::new(start, rows.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::errors::LoadErrorKind;

    fn obs(day_offset: i64, price: f64) -> Observation {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Observation::new("TEST", base + chrono::Duration::days(day_offset), price)
    }

    #[test]
    fn sorts_by_date_and_keeps_ties_in_source_order() {
        let mut rows: Vec<Observation> = (0..30).rev().map(|d| obs(d, d as f64)).collect();
        // Two rows share day 5; the first one in the input must stay first.
        rows.push(Observation::new("TIE", rows[24].date, -1.0));

        let table = PriceTable::new(rows).unwrap();
        let dates: Vec<_> = table.observations().iter().map(|o| o.date).collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));

        let day5: Vec<_> = table
            .observations()
            .iter()
            .filter(|o| o.date == obs(5, 0.0).date)
            .collect();
        assert_eq!(day5.len(), 2);
        assert_eq!(day5[0].identifier, "TEST");
        assert_eq!(day5[1].identifier, "TIE");
    }

    #[test]
    fn rejects_short_tables() {
        let rows: Vec<_> = (0..29).map(|d| obs(d, 1.0)).collect();
        let err = PriceTable::new(rows).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::InsufficientData);
    }

    #[test]
    fn window_at_bounds() {
        let rows: Vec<_> = (0..35).map(|d| obs(d, d as f64)).collect();
        let table = PriceTable::new(rows).unwrap();
        assert_eq!(table.max_start(), 5);

        let last = table.window_at(5).unwrap();
        assert_eq!(last.start(), 5);
        assert_eq!(last.observations().len(), WINDOW_LEN);
        assert_eq!(last.observations()[0].price, 5.0);
        assert_eq!(last.observations()[29].price, 34.0);

        assert!(table.window_at(6).is_none());
        assert!(table.window_at(usize::MAX).is_none());
    }
}
