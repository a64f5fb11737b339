//! Export growth reports to CSV and JSON.
//!
//! CSV is meant for spreadsheets: one row per bucket plus a final `overall`
//! row. JSON carries the `{ "start-end": rate }` mapping, the overall rate, and
//! per-bucket detail.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::{BucketRate, DecadeBucket, GrowthRateReport};
use crate::error::AppError;

/// JSON export schema.
#[derive(Debug, Serialize)]
pub struct ReportFile<'a> {
    pub tool: &'static str,
    pub generated_at: DateTime<Local>,
    pub label: &'a str,
    pub first_year: i32,
    pub last_year: i32,
    pub rates: BTreeMap<String, f64>,
    pub overall_rate_percent: f64,
    pub buckets: &'a [BucketRate],
    pub skipped: &'a [DecadeBucket],
}

impl<'a> ReportFile<'a> {
    pub fn new(report: &'a GrowthRateReport) -> Self {
        Self {
            tool: "trends",
            generated_at: Local::now(),
            label: &report.label,
            first_year: report.first_year,
            last_year: report.last_year,
            rates: report.rates(),
            overall_rate_percent: report.overall_rate_pct,
            buckets: &report.buckets,
            skipped: &report.skipped,
        }
    }
}

/// Write the report as CSV.
pub fn write_report_csv(path: &Path, report: &GrowthRateReport) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(["bucket", "start", "end", "points", "interpolated", "rate_pct"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for b in &report.buckets {
        writer
            .write_record([
                b.label.clone(),
                b.bucket.start.to_string(),
                b.bucket.end.to_string(),
                b.points.to_string(),
                b.interpolated.to_string(),
                format!("{:.6}", b.rate_pct),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    let span = (report.last_year - report.first_year + 1).to_string();
    writer
        .write_record([
            "overall".to_string(),
            report.first_year.to_string(),
            report.last_year.to_string(),
            span,
            String::new(),
            format!("{:.6}", report.overall_rate_pct),
        ])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write the report as pretty JSON.
pub fn write_report_json(path: &Path, report: &GrowthRateReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &ReportFile::new(report))
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> GrowthRateReport {
        GrowthRateReport {
            label: "Milk".to_string(),
            first_year: 1995,
            last_year: 2010,
            buckets: vec![
                BucketRate {
                    label: "1995-2000".to_string(),
                    bucket: DecadeBucket::new(1995, 2000),
                    points: 6,
                    interpolated: 1,
                    rate_pct: 4.25,
                },
                BucketRate {
                    label: "2001-2010".to_string(),
                    bucket: DecadeBucket::new(2001, 2010),
                    points: 10,
                    interpolated: 0,
                    rate_pct: 3.5,
                },
            ],
            skipped: Vec::new(),
            overall_rate_pct: 3.75,
        }
    }

    #[test]
    fn csv_has_bucket_rows_and_overall() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write_report_csv(&path, &report()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "bucket,start,end,points,interpolated,rate_pct");
        assert_eq!(lines[1], "1995-2000,1995,2000,6,1,4.250000");
        assert_eq!(lines[3], "overall,1995,2010,16,,3.750000");
    }

    #[test]
    fn json_carries_mapping_and_overall() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_report_json(&path, &report()).unwrap();

        let value: serde_json::Value = serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(value["label"], "Milk");
        assert_eq!(value["rates"]["2001-2010"], 3.5);
        assert_eq!(value["overall_rate_percent"], 3.75);
        assert_eq!(value["buckets"][0]["bucket"]["start"], 1995);
    }

    #[test]
    fn unwritable_path_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.csv");
        let err = write_report_csv(&path, &report()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
