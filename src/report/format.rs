//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the estimation code stays free of presentation
//! - output changes are localized (and covered by snapshot tests)

use crate::domain::{GrowthRateReport, Heatmap};
use crate::growth::FilterStats;

/// Format the report as a table of buckets followed by the overall rate.
pub fn format_report(report: &GrowthRateReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== trends - Decade-wise Trend Growth Rate: {} ===\n", report.label));
    out.push_str(&format!("Years: {}-{}\n\n", report.first_year, report.last_year));

    out.push_str(&format!(
        "{:<12} {:>7} {:>13} {:>10}\n",
        "bucket", "points", "interpolated", "rate"
    ));
    out.push_str(&format!("{:-<12} {:-<7} {:-<13} {:-<10}\n", "", "", "", ""));

    for b in &report.buckets {
        out.push_str(&format!(
            "{:<12} {:>7} {:>13} {:>9.2}%\n",
            b.label, b.points, b.interpolated, b.rate_pct
        ));
    }
    for s in &report.skipped {
        out.push_str(&format!("  (skipped {s}) fewer than 2 points\n"));
    }

    out.push_str(&format!("\nOverall growth rate: {:.2}%\n", report.overall_rate_pct));
    out
}

/// One-line summary of what row filtering did.
pub fn format_filter_stats(stats: &FilterStats) -> String {
    let mut line = format!("Rows: read={} used={}", stats.rows_read, stats.rows_used);
    if stats.bad_year > 0 {
        line.push_str(&format!(" | non-year={}", stats.bad_year));
    }
    if stats.missing_total > 0 {
        line.push_str(&format!(" | missing Total={}", stats.missing_total));
    }
    if stats.outside_window > 0 {
        line.push_str(&format!(" | outside window={}", stats.outside_window));
    }
    line
}

/// Format a heatmap grid with one decimal per cell.
pub fn format_heatmap(heatmap: &Heatmap, title: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("{title}\n"));

    let name_w = heatmap
        .districts
        .iter()
        .map(|d| d.chars().count())
        .max()
        .unwrap_or(0)
        .max("District".len());
    let cell_w = heatmap
        .cells
        .iter()
        .flatten()
        .flatten()
        .map(|v| format!("{v:.1}").len())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut header = format!("{:<name_w$}", "District");
    for year in &heatmap.years {
        header.push_str(&format!(" {year:>cell_w$}"));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for (district, row) in heatmap.districts.iter().zip(&heatmap.cells) {
        let mut line = format!("{district:<name_w$}");
        for cell in row {
            match cell {
                Some(v) => line.push_str(&format!(" {v:>cell_w$.1}")),
                None => line.push_str(&format!(" {:>cell_w$}", "-")),
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}
