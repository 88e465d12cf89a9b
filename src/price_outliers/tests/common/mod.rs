#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::{Datelike, Duration, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

/// Header line of the delimited exports.
pub const DELIMITED_HEADER: &str = "Stock-ID,Date,Stock_Price";

/// `n` data lines starting 2024-01-01, one day apart, prices 100, 101, ...
/// Dates use the `DD-MM-YYYY` format.
pub fn price_lines(id: &str, n: usize) -> Vec<String> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..n)
        .map(|i| {
            let d = base + Duration::days(i as i64);
            format!("{id},{},{}", d.format("%d-%m-%Y"), 100 + i)
        })
        .collect()
}

/// Write `header` plus `lines` to `dir/name` and return the path.
pub fn write_csv(dir: &Path, name: &str, header: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    let mut body = String::from(header);
    body.push('\n');
    for l in lines {
        body.push_str(l);
        body.push('\n');
    }
    std::fs::write(&path, body).expect("write csv");
    path
}

/// A valid delimited file with `n` rows.
pub fn write_valid(dir: &Path, name: &str, n: usize) -> PathBuf {
    write_csv(dir, name, DELIMITED_HEADER, &price_lines("FLTR", n))
}

/// How a workbook fixture stores its `Date` column.
#[derive(Debug, Clone, Copy)]
pub enum DateCells {
    /// Real spreadsheet dates with a date number format.
    Native,
    /// `DD-MM-YYYY` strings.
    Text,
}

/// A valid workbook with `Stock_ID`, `Date`, `Stock_Price` and `n` rows
/// (numeric id 1001, dates from 2024-01-01, prices 100, 101, ...).
pub fn write_workbook(dir: &Path, name: &str, n: usize, dates: DateCells) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }

    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd-mm-yyyy");
    let sheet = workbook.add_worksheet();
    for (col, header) in ["Stock_ID", "Date", "Stock_Price"].into_iter().enumerate() {
        sheet.write_string(0, col as u16, header).expect("write header");
    }

    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    for i in 0..n {
        let row = (i + 1) as u32;
        let d = base + Duration::days(i as i64);
        sheet.write_number(row, 0, 1001.0).expect("write id");
        match dates {
            DateCells::Native => {
                let dt = ExcelDateTime::from_ymd(d.year() as u16, d.month() as u8, d.day() as u8)
                    .expect("valid date");
                sheet
                    .write_datetime_with_format(row, 1, &dt, &date_format)
                    .expect("write date");
            }
            DateCells::Text => {
                sheet
                    .write_string(row, 1, d.format("%d-%m-%Y").to_string())
                    .expect("write date");
            }
        }
        sheet.write_number(row, 2, 100.0 + i as f64).expect("write price");
    }

    workbook.save(&path).expect("save workbook");
    path
}
