//! Delimited-text reader backed by the `csv` crate.

use std::path::Path;

use csv::ReaderBuilder;

use crate::{
    errors::LoadError,
    loader::raw::{Cell, RawTable, normalize_header},
};

/// Read a comma-separated file with a header row.
///
/// Ragged rows, invalid UTF-8 and a missing header row are reported as
/// [`LoadError::Malformed`].
pub(crate) fn read_delimited(path: &Path) -> Result<RawTable, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| classify(path, e))?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| classify(path, e))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::malformed(path, "no columns to parse from file"));
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| classify(path, e))?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawTable { headers, rows })
}

fn classify(path: &Path, err: csv::Error) -> LoadError {
    if !err.is_io_error() {
        return LoadError::malformed(path, err);
    }
    match err.into_kind() {
        csv::ErrorKind::Io(source) => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => LoadError::malformed(path, format!("{other:?}")),
    }
}
