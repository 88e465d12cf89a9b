//! Plain-text rendering of analysis results for terminal output.
//!
//! Nothing in the analysis path prints; the CLI calls these functions (or
//! serializes the same structures as JSON).

use std::fmt::Write;

use crate::{
    batch::BatchReport,
    deviation::DeviationReport,
    models::window::Window,
    outliers::{OutlierReport, ZScoredRow},
    pipeline::FileAnalysis,
};

const ID_WIDTH: usize = 12;

fn header(out: &mut String, extra: &[&str]) {
    let _ = write!(out, "{:<ID_WIDTH$} {:<10} {:>12}", "Identifier", "Date", "Price");
    for col in extra {
        let _ = write!(out, " {col:>15}");
    }
    out.push('\n');
}

fn row_prefix(out: &mut String, identifier: &str, date: chrono::NaiveDate, price: f64) {
    let _ = write!(out, "{identifier:<ID_WIDTH$} {date:<10} {price:>12.4}");
}

/// The sampled rows, one per line.
pub fn render_window(window: &Window) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Randomly selected data points (source rows {}..{}):",
        window.start(),
        window.start() + window.observations().len()
    );
    header(&mut out, &[]);
    for o in window.observations() {
        row_prefix(&mut out, &o.identifier, o.date, o.price);
        out.push('\n');
    }
    out
}

fn z_rows(out: &mut String, rows: &[ZScoredRow]) {
    header(out, &["Z-Score"]);
    for r in rows {
        let o = &r.observation;
        row_prefix(out, &o.identifier, o.date, o.price);
        let _ = writeln!(out, " {:>15.4}", r.z_score);
    }
}

/// Z-score table followed by the outlier verdict and the outlier rows.
pub fn render_outliers(report: &OutlierReport) -> String {
    let mut out = String::new();
    out.push_str("Z-Scores for data points:\n");
    z_rows(&mut out, &report.scored.rows);
    out.push('\n');

    if report.is_empty() {
        let _ = writeln!(
            out,
            "No outliers detected with threshold of {}.",
            report.threshold
        );
    } else {
        let _ = writeln!(
            out,
            "Outliers detected with threshold of {}.",
            report.threshold
        );
        z_rows(&mut out, &report.outliers);
    }
    out
}

/// Window mean followed by the deviation table.
pub fn render_deviation(report: &DeviationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Mean of the {} data points: {}",
        report.rows.len(),
        report.mean_price
    );
    out.push('\n');
    out.push_str("Data with deviations and percentage deviations:\n");
    header(&mut out, &["Deviation", "Pct Deviation", "Above Threshold"]);
    for r in &report.rows {
        let o = &r.observation;
        row_prefix(&mut out, &o.identifier, o.date, o.price);
        let _ = writeln!(
            out,
            " {:>15.4} {:>15.4} {:>15}",
            r.deviation, r.pct_deviation, r.above_threshold
        );
    }
    out
}

/// Full report for one file: window, outliers, deviations.
pub fn render_file_analysis(analysis: &FileAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {}", analysis.path.display());
    out.push_str(&render_window(&analysis.window));
    out.push('\n');
    out.push_str(&render_outliers(&analysis.outliers));
    out.push('\n');
    out.push_str(&render_deviation(&analysis.deviation));
    out
}

/// One-line totals for a batch run.
pub fn render_batch_summary(report: &BatchReport) -> String {
    format!(
        "SUMMARY: {} processed, {} skipped",
        report.results.len(),
        report.skipped.len()
    )
}
