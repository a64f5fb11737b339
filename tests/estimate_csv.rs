use std::fs;
use std::path::{Path, PathBuf};

use crop_trends::domain::{EstimateConfig, GapPolicy, YearWindow};
use crop_trends::error::{AppError, GrowthError, MISSING_COLUMNS_MESSAGE};
use crop_trends::growth::estimate;
use crop_trends::io::{CsvSource, write_report_csv, write_report_json};
use crop_trends::plot::render_bar_chart;

fn write_csv(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn exponential_csv(first: i32, last: i32, growth: f64) -> String {
    let mut text = String::from("Year,Total,Remarks\n");
    for year in first..=last {
        let t = year - first;
        text.push_str(&format!("{year},{},\n", 100.0 * (1.0 + growth).powi(t)));
    }
    text
}

#[test]
fn long_exponential_series_has_aligned_buckets_at_five_percent() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "rice.csv", &exponential_csv(1955, 2024, 0.05));

    let est = estimate(&CsvSource::new(&path), "Rice", &EstimateConfig::default()).unwrap();
    let labels: Vec<&str> = est.report.buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "1955-1960", "1961-1970", "1971-1980", "1981-1990", "1991-2000", "2001-2010", "2011-2020",
            "2021-2024",
        ]
    );
    for bucket in &est.report.buckets {
        assert!((bucket.rate_pct - 5.0).abs() < 5e-6, "{}: {}", bucket.label, bucket.rate_pct);
    }
    assert!((est.report.overall_rate_pct - 5.0).abs() < 5e-6);
    assert_eq!(est.chart.title, "Decade-wise Trend Growth Rate for Rice");
    assert_eq!(est.chart.bars.len(), 8);
    assert_eq!(est.filter.rows_used, 70);
}

#[test]
fn messy_rows_are_filtered_before_estimation() {
    let dir = tempfile::tempdir().unwrap();
    let text = concat!(
        "Year,Total\n",
        "Total,999\n",
        "2000,100\n",
        "2001-02,5\n",
        "2003,\n",
        "2004,146.41\n",
        "20055,1\n",
    );
    let path = write_csv(dir.path(), "gram.csv", text);

    let est = estimate(&CsvSource::new(&path), "Gram", &EstimateConfig::default()).unwrap();
    assert_eq!(est.report.first_year, 2000);
    assert_eq!(est.report.last_year, 2004);
    assert_eq!(est.series.len(), 5);
    assert_eq!(est.series.interpolated_count(), 3);
    assert_eq!(est.filter.rows_used, 2);
    assert_eq!(est.filter.bad_year, 3);
    assert_eq!(est.filter.missing_total, 1);
}

#[test]
fn missing_total_column_fails_with_fixed_message() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "milk.csv", "Year,Production\n2000,1\n2001,2\n");

    let err = estimate(&CsvSource::new(&path), "Milk", &EstimateConfig::default()).unwrap_err();
    assert!(matches!(err, GrowthError::MissingColumns { .. }), "{err:?}");
    let app: AppError = err.into();
    assert_eq!(app.message(), MISSING_COLUMNS_MESSAGE);
    assert_eq!(app.exit_code(), 2);
}

#[test]
fn corrupt_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.csv");
    fs::write(&path, b"Year,Total\n2000,\xff\xfe\n").unwrap();

    let err = estimate(&CsvSource::new(&path), "Tur", &EstimateConfig::default()).unwrap_err();
    assert!(matches!(err, GrowthError::Read { .. }), "{err:?}");
}

#[test]
fn single_row_is_insufficient_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "meat.csv", "Year,Total\n2010,55\n");

    let err = estimate(&CsvSource::new(&path), "Meat", &EstimateConfig::default()).unwrap_err();
    assert!(matches!(err, GrowthError::InsufficientData { .. }), "{err:?}");
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn zero_total_is_an_invalid_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "inland.csv", "Year,Total\n2000,10\n2001,0\n2002,12\n");

    let err = estimate(&CsvSource::new(&path), "Inland", &EstimateConfig::default()).unwrap_err();
    assert_eq!(err, GrowthError::InvalidValue { year: 2001, value: 0.0 });
}

#[test]
fn window_past_the_data_depends_on_gap_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "marine.csv", "Year,Total\n2001,100\n2002,110\n2003,121\n");
    let window = YearWindow {
        from: Some(2001),
        to: Some(2005),
    };

    let reject = EstimateConfig {
        window,
        gap_policy: GapPolicy::Reject,
    };
    let err = estimate(&CsvSource::new(&path), "Marine", &reject).unwrap_err();
    assert!(matches!(err, GrowthError::UnboundedGap { .. }), "{err:?}");

    let flat = EstimateConfig {
        window,
        gap_policy: GapPolicy::Flat,
    };
    let est = estimate(&CsvSource::new(&path), "Marine", &flat).unwrap();
    assert_eq!(est.series.value(2004), Some(121.0));
    assert_eq!(est.series.value(2005), Some(121.0));
}

#[test]
fn exports_and_chart_render_from_one_estimate() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "wheat.csv", &exponential_csv(1991, 2010, 0.03));
    let est = estimate(&CsvSource::new(&path), "Wheat", &EstimateConfig::default()).unwrap();

    let csv_path = dir.path().join("wheat_rates.csv");
    write_report_csv(&csv_path, &est.report).unwrap();
    let csv_text = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_text.starts_with("bucket,start,end,points,interpolated,rate_pct\n"));
    assert!(csv_text.contains("1991-2000,1991,2000,10,0,"));
    assert!(csv_text.lines().last().unwrap().starts_with("overall,1991,2010,"));

    let json_path = dir.path().join("wheat.json");
    write_report_json(&json_path, &est.report).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["label"], "Wheat");
    let rate = json["rates"]["2001-2010"].as_f64().unwrap();
    assert!((rate - 3.0).abs() < 1e-6);

    let chart = render_bar_chart(&est.chart, 40);
    assert!(chart.starts_with("Decade-wise Trend Growth Rate for Wheat\n"));
    assert!(chart.contains("3.00%"));
}
