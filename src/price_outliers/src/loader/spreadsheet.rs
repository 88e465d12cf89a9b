//! Workbook reader backed by `calamine` (xlsx, xlsm, xlsb, xls, ods).

use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto};

use crate::{
    errors::LoadError,
    loader::raw::{Cell, RawTable, normalize_header},
};

/// Read the first worksheet; its first row is the header.
pub(crate) fn read_workbook(path: &Path) -> Result<RawTable, LoadError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::malformed(path, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::malformed(path, "workbook has no worksheets"))?
        .map_err(|e| LoadError::malformed(path, e))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| LoadError::malformed(path, "worksheet is empty"))?;
    let headers: Vec<String> = header_row
        .iter()
        .map(|c| normalize_header(&c.to_string()))
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::malformed(path, "no columns to parse from worksheet"));
    }

    let rows = rows
        .map(|row| row.iter().map(to_cell).collect())
        .collect();

    Ok(RawTable { headers, rows })
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.trim().to_string()),
        // xlsx/xls carry serial dates, ods carries ISO-8601 text.
        Data::DateTime(_) | Data::DateTimeIso(_) => match data.as_date() {
            Some(date) => Cell::Date(date),
            None => Cell::Text(data.to_string()),
        },
        other => Cell::Text(other.to_string()),
    }
}
