//! Table loading: read a file, apply the column schema, validate, and sort.
//!
//! The readers ([`delimited`] for text, [`spreadsheet`] for workbooks) only turn
//! bytes into a grid of [`raw::Cell`]s. Everything schema-related happens here, in
//! a fixed order so the first failing step decides the error:
//!
//! 1. the path must be an existing file ([`LoadError::NotFound`])
//! 2. the reader must produce a header row ([`LoadError::Malformed`])
//! 3. all configured columns must be present ([`LoadError::Schema`])
//! 4. every date must parse ([`LoadError::Format`])
//! 5. every price must be a finite number ([`LoadError::InvalidPrice`])
//! 6. after a stable sort by date, at least 30 rows must remain
//!    ([`LoadError::InsufficientData`])

mod delimited;
mod raw;
mod spreadsheet;

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    config::ColumnSchema,
    errors::LoadError,
    models::{observation::Observation, table::PriceTable},
};
use raw::{Cell, RawTable};

/// Container format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated text. Used for every extension that is not a workbook.
    Delimited,
    /// Excel or OpenDocument workbook.
    Spreadsheet,
}

impl SourceFormat {
    /// Pick the reader for `path` by its (case-insensitive) extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => SourceFormat::Spreadsheet,
            _ => SourceFormat::Delimited,
        }
    }
}

/// Load `path` into a validated, date-sorted [`PriceTable`].
///
/// All-or-nothing: on any failure no table is returned.
pub fn load(path: impl AsRef<Path>, columns: &ColumnSchema) -> Result<PriceTable, LoadError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let format = SourceFormat::from_path(path);
    let raw = match format {
        SourceFormat::Delimited => delimited::read_delimited(path)?,
        SourceFormat::Spreadsheet => spreadsheet::read_workbook(path)?,
    };
    debug!(path = %path.display(), ?format, rows = raw.rows.len(), "read raw table");

    let observations = to_observations(raw, columns)?;
    PriceTable::new(observations)
}

struct ColumnIndex {
    identifier: usize,
    date: usize,
    price: usize,
}

fn resolve_columns(headers: &[String], columns: &ColumnSchema) -> Result<ColumnIndex, LoadError> {
    let find = |name: &str| headers.iter().position(|h| h == name.trim());

    let required = columns.required();
    let missing: Vec<String> = required
        .into_iter()
        .filter(|&name| find(name).is_none())
        .map(str::to_string)
        .collect();

    match (
        find(columns.identifier.as_str()),
        find(columns.date.as_str()),
        find(columns.price.as_str()),
    ) {
        (Some(identifier), Some(date), Some(price)) => Ok(ColumnIndex {
            identifier,
            date,
            price,
        }),
        _ => Err(LoadError::Schema {
            required: required.iter().map(|s| s.to_string()).collect(),
            missing,
        }),
    }
}

fn to_observations(raw: RawTable, columns: &ColumnSchema) -> Result<Vec<Observation>, LoadError> {
    let idx = resolve_columns(&raw.headers, columns)?;

    // Whole date column first, then prices, so a bad date always wins.
    let dates = raw
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| parse_date(&cell_at(row, idx.date), &columns.date_format, RawTable::source_row(i)))
        .collect::<Result<Vec<_>, _>>()?;

    let prices = raw
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| parse_price(&cell_at(row, idx.price), RawTable::source_row(i)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(raw
        .rows
        .iter()
        .zip(dates)
        .zip(prices)
        .map(|((row, date), price)| {
            Observation::new(cell_at(row, idx.identifier).display_text(), date, price)
        })
        .collect())
}

fn cell_at(row: &[Cell], i: usize) -> Cell {
    row.get(i).cloned().unwrap_or(Cell::Empty)
}

fn parse_date(cell: &Cell, format: &str, row: usize) -> Result<NaiveDate, LoadError> {
    match cell {
        Cell::Date(d) => Ok(*d),
        Cell::Text(s) => NaiveDate::parse_from_str(s.trim(), format).map_err(|_| LoadError::Format {
            row,
            value: s.clone(),
            format: format.to_string(),
        }),
        other => Err(LoadError::Format {
            row,
            value: other.display_text(),
            format: format.to_string(),
        }),
    }
}

fn parse_price(cell: &Cell, row: usize) -> Result<f64, LoadError> {
    let value = match cell {
        Cell::Number(n) => Some(*n),
        Cell::Text(s) => s.trim().parse::<f64>().ok(),
        Cell::Date(_) | Cell::Empty => None,
    };
    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::InvalidPrice {
            row,
            value: cell.display_text(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LoadErrorKind;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn raw(headers: &[&str], rows: Vec<Vec<Cell>>) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("a/b.XLSX")), SourceFormat::Spreadsheet);
        assert_eq!(SourceFormat::from_path(Path::new("a/b.ods")), SourceFormat::Spreadsheet);
        assert_eq!(SourceFormat::from_path(Path::new("a/b.csv")), SourceFormat::Delimited);
        assert_eq!(SourceFormat::from_path(Path::new("a/B.CSV")), SourceFormat::Delimited);
        assert_eq!(SourceFormat::from_path(Path::new("noext")), SourceFormat::Delimited);
    }

    #[test]
    fn schema_error_lists_every_missing_column() {
        let table = raw(&["Stock-ID", "Close"], vec![]);
        let err = to_observations(table, &ColumnSchema::delimited()).unwrap_err();
        match err {
            LoadError::Schema { required, missing } => {
                assert_eq!(required, vec!["Stock-ID", "Date", "Stock_Price"]);
                assert_eq!(missing, vec!["Date", "Stock_Price"]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn columns_are_found_in_any_order() {
        let table = raw(
            &["Stock_Price", "Extra", "Date", "Stock-ID"],
            vec![vec![text("10.5"), text("x"), text("02-01-2024"), text("ABC")]],
        );
        let obs = to_observations(table, &ColumnSchema::delimited()).unwrap();
        assert_eq!(
            obs,
            vec![Observation::new(
                "ABC",
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                10.5
            )]
        );
    }

    #[test]
    fn iso_dates_are_a_format_error() {
        let table = raw(
            &["Stock-ID", "Date", "Stock_Price"],
            vec![
                vec![text("A"), text("01-01-2024"), text("1")],
                vec![text("A"), text("2024-01-02"), text("1")],
            ],
        );
        let err = to_observations(table, &ColumnSchema::delimited()).unwrap_err();
        match err {
            LoadError::Format { row, value, format } => {
                assert_eq!(row, 3);
                assert_eq!(value, "2024-01-02");
                assert_eq!(format, "%d-%m-%Y");
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn date_errors_take_precedence_over_price_errors() {
        let table = raw(
            &["Stock-ID", "Date", "Stock_Price"],
            vec![
                vec![text("A"), text("01-01-2024"), text("n/a")],
                vec![text("A"), Cell::Empty, text("1")],
            ],
        );
        let err = to_observations(table, &ColumnSchema::delimited()).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Format);
    }

    #[test]
    fn non_numeric_and_non_finite_prices_are_rejected() {
        for bad in ["abc", "NaN", "inf", ""] {
            let price = if bad.is_empty() { Cell::Empty } else { text(bad) };
            let table = raw(
                &["Stock-ID", "Date", "Stock_Price"],
                vec![vec![text("A"), text("01-01-2024"), price]],
            );
            let err = to_observations(table, &ColumnSchema::delimited()).unwrap_err();
            assert_eq!(err.kind(), LoadErrorKind::InvalidPrice, "input {bad:?}");
        }
    }

    #[test]
    fn native_dates_and_numeric_identifiers() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 14).unwrap();
        let table = raw(
            &["Stock_ID", "Date", "Stock_Price"],
            vec![vec![Cell::Number(1001.0), Cell::Date(date), Cell::Number(99.0)]],
        );
        let obs = to_observations(table, &ColumnSchema::spreadsheet()).unwrap();
        assert_eq!(obs[0], Observation::new("1001", date, 99.0));
    }

    #[test]
    fn short_rows_read_missing_cells_as_empty() {
        let table = raw(
            &["Stock-ID", "Date", "Stock_Price"],
            vec![vec![text("A"), text("01-01-2024")]],
        );
        let err = to_observations(table, &ColumnSchema::delimited()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidPrice { row: 2, .. }));
    }
}
