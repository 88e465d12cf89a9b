//! Format-neutral grid produced by the readers and consumed by validation.

use chrono::NaiveDate;

/// One cell as the reader saw it, before any schema is applied.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Text(String),
    Number(f64),
    /// Native date cell (spreadsheets only).
    Date(NaiveDate),
    Empty,
}

impl Cell {
    /// Cell rendered back to text, for identifiers and error messages.
    pub(crate) fn display_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Date(d) => d.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// Header row plus body rows. `rows[i]` is source row `i + 2`.
#[derive(Debug, Default)]
pub(crate) struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// 1-based source row number of body row `idx` (the header is row 1).
    pub(crate) fn source_row(idx: usize) -> usize {
        idx + 2
    }
}

/// Trim whitespace and a UTF-8 BOM from a header cell.
pub(crate) fn normalize_header(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_bom_and_whitespace_are_stripped() {
        assert_eq!(normalize_header("\u{feff}Stock-ID "), "Stock-ID");
        assert_eq!(normalize_header("  Date"), "Date");
    }

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(1234.0).display_text(), "1234");
        assert_eq!(Cell::Number(12.5).display_text(), "12.5");
        assert_eq!(Cell::Empty.display_text(), "");
    }
}
