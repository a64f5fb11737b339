//! The growth rate estimator.
//!
//! `source -> table -> filtered rows -> complete series -> decade buckets ->
//! per-bucket and overall rates -> report + chart`
//!
//! The estimator is pure apart from reading its source: it never prints and
//! never renders. Callers decide how to show the result or the failure.

use tracing::{debug, info};

use crate::domain::{
    BucketRate, CompleteSeries, EstimateConfig, GrowthChart, GrowthRateReport, RawSeries, YearWindow,
};
use crate::error::GrowthError;
use crate::growth::decades::decade_buckets;
use crate::growth::filter::{FilterStats, YEAR_RANGE, filter_rows};
use crate::growth::interpolate::fill_gaps;
use crate::growth::rate::trend_growth_rate;
use crate::io::table::{SeriesSource, SeriesTable};

/// Everything one estimation produces.
#[derive(Debug, Clone)]
pub struct Estimate {
    pub report: GrowthRateReport,
    pub chart: GrowthChart,
    /// The gap-free series the rates were computed from.
    pub series: CompleteSeries,
    pub filter: FilterStats,
}

/// Estimate decade-wise and overall growth rates for the series in `source`.
pub fn estimate<S: SeriesSource + ?Sized>(
    source: &S,
    label: &str,
    config: &EstimateConfig,
) -> Result<Estimate, GrowthError> {
    debug!(source = %source.describe(), label, "estimating growth rates");
    let table = source.load()?;
    estimate_table(&table, label, config)
}

/// Same as [`estimate`] over an already-loaded table.
pub fn estimate_table(table: &SeriesTable, label: &str, config: &EstimateConfig) -> Result<Estimate, GrowthError> {
    validate_window(config.window)?;

    let (raw, filter) = filter_rows(table, config.window)?;
    debug!(?filter, "filtered rows");

    let (report, series) = estimate_series(&raw, label, config)?;
    let chart = GrowthChart::from_report(&report);

    info!(
        label,
        years = %format!("{}-{}", report.first_year, report.last_year),
        buckets = report.buckets.len(),
        overall_pct = report.overall_rate_pct,
        "estimated growth rates"
    );

    Ok(Estimate {
        report,
        chart,
        series,
        filter,
    })
}

/// Steps 3 onward: gap filling, bucketing, and rate fitting on a filtered series.
pub fn estimate_series(
    raw: &RawSeries,
    label: &str,
    config: &EstimateConfig,
) -> Result<(GrowthRateReport, CompleteSeries), GrowthError> {
    validate_window(config.window)?;
    let (Some(first_obs), Some(last_obs)) = (raw.first_year(), raw.last_year()) else {
        return Err(GrowthError::insufficient("no usable rows after filtering; need at least 2"));
    };
    if raw.len() < 2 {
        return Err(GrowthError::insufficient(format!(
            "{} usable row after filtering; need at least 2",
            raw.len()
        )));
    }

    let first = config.window.from.unwrap_or(first_obs);
    let last = config.window.to.unwrap_or(last_obs);
    let series = fill_gaps(raw, first, last, config.gap_policy)?;
    if series.interpolated_count() > 0 {
        debug!(filled = series.interpolated_count(), "filled missing years");
    }

    let mut buckets = Vec::new();
    let mut skipped = Vec::new();
    for bucket in decade_buckets(series.first_year(), series.last_year()) {
        let points = series.slice(bucket);
        if points.len() < 2 {
            debug!(bucket = %bucket, "skipping bucket with fewer than 2 points");
            skipped.push(bucket);
            continue;
        }

        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        let rate_pct = trend_growth_rate(&values).ok_or_else(|| GrowthError::Regression { label: bucket.label() })?;

        buckets.push(BucketRate {
            label: bucket.label(),
            bucket,
            points: points.len(),
            interpolated: points.iter().filter(|p| p.interpolated).count(),
            rate_pct,
        });
    }

    if buckets.is_empty() {
        return Err(GrowthError::insufficient("every decade bucket holds fewer than 2 points"));
    }

    let overall_rate_pct = trend_growth_rate(&series.values()).ok_or_else(|| GrowthError::Regression {
        label: "full series".to_string(),
    })?;

    let report = GrowthRateReport {
        label: label.to_string(),
        first_year: series.first_year(),
        last_year: series.last_year(),
        buckets,
        skipped,
        overall_rate_pct,
    };

    Ok((report, series))
}

fn validate_window(window: YearWindow) -> Result<(), GrowthError> {
    let invalid = || GrowthError::InvalidWindow {
        from: window.from.unwrap_or(*YEAR_RANGE.start()),
        to: window.to.unwrap_or(*YEAR_RANGE.end()),
    };
    let in_range = |bound: Option<i32>| bound.is_none_or(|year| YEAR_RANGE.contains(&year));
    if !in_range(window.from) || !in_range(window.to) {
        return Err(invalid());
    }
    match (window.from, window.to) {
        (Some(from), Some(to)) if from > to => Err(invalid()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GapPolicy, YearValue};
    use crate::io::table::Cell;

    fn growth_table(points: &[(i32, f64)]) -> SeriesTable {
        let mut table = SeriesTable::new(["Year", "Total"]);
        for &(year, total) in points {
            table.push_row(vec![Cell::Int(i64::from(year)), Cell::Float(total)]);
        }
        table
    }

    fn exponential(first: i32, last: i32, base: f64, growth: f64) -> Vec<(i32, f64)> {
        (first..=last)
            .map(|y| (y, base * growth.powi(y - first)))
            .collect()
    }

    #[test]
    fn constant_growth_is_uniform_across_buckets() {
        let table = growth_table(&exponential(1955, 2024, 100.0, 1.05));
        let est = estimate_table(&table, "Rice", &EstimateConfig::default()).unwrap();

        assert_eq!(est.report.buckets.len(), 8);
        assert!((est.report.overall_rate_pct - 5.0).abs() < 1e-6);
        for b in &est.report.buckets {
            assert!(
                (b.rate_pct - est.report.overall_rate_pct).abs() < 1e-6,
                "{} = {}",
                b.label,
                b.rate_pct
            );
        }
        assert_eq!(est.chart.bars.len(), est.report.buckets.len());
        assert_eq!(est.chart.reference.value, est.report.overall_rate_pct);
    }

    #[test]
    fn single_point_bucket_is_skipped_not_zeroed() {
        // 1960 forms a one-year leading bucket.
        let table = growth_table(&exponential(1960, 1970, 50.0, 1.02));
        let est = estimate_table(&table, "Wheat", &EstimateConfig::default()).unwrap();

        assert_eq!(est.report.skipped, vec![crate::domain::DecadeBucket::new(1960, 1960)]);
        assert!(est.report.rate_for("1960-1960").is_none());
        assert!(!est.report.rates().contains_key("1960-1960"));
        assert_eq!(est.report.rates().len(), 1);
        assert!(est.report.rate_for("1961-1970").is_some());
    }

    #[test]
    fn one_row_is_insufficient() {
        let table = growth_table(&[(2000, 10.0)]);
        let err = estimate_table(&table, "x", &EstimateConfig::default()).unwrap_err();
        assert!(matches!(err, GrowthError::InsufficientData { .. }), "{err:?}");
    }

    #[test]
    fn all_buckets_skipped_is_insufficient() {
        let table = growth_table(&[(1960, 10.0), (1961, 11.0)]);
        let err = estimate_table(&table, "x", &EstimateConfig::default()).unwrap_err();
        assert!(matches!(err, GrowthError::InsufficientData { .. }), "{err:?}");
    }

    #[test]
    fn interpolated_years_are_counted_per_bucket() {
        let table = growth_table(&[(2001, 100.0), (2004, 130.0), (2010, 190.0)]);
        let est = estimate_table(&table, "x", &EstimateConfig::default()).unwrap();
        let bucket = &est.report.buckets[0];
        assert_eq!(bucket.label, "2001-2010");
        assert_eq!(bucket.points, 10);
        assert_eq!(bucket.interpolated, 7);
        assert_eq!(est.series.value(2002), Some(110.0));
    }

    #[test]
    fn window_beyond_data_uses_gap_policy() {
        let table = growth_table(&exponential(2001, 2010, 10.0, 1.1));
        let reject = EstimateConfig {
            window: YearWindow { from: Some(1999), to: None },
            gap_policy: GapPolicy::Reject,
        };
        assert_eq!(
            estimate_table(&table, "x", &reject).unwrap_err(),
            GrowthError::UnboundedGap { year: 1999 }
        );

        let flat = EstimateConfig {
            gap_policy: GapPolicy::Flat,
            ..reject
        };
        let est = estimate_table(&table, "x", &flat).unwrap();
        assert_eq!(est.report.first_year, 1999);
        assert_eq!(est.series.value(1999), Some(10.0));
        assert_eq!(est.report.buckets[0].label, "1999-2000");
    }

    #[test]
    fn inverted_window_is_rejected() {
        let table = growth_table(&exponential(2001, 2010, 10.0, 1.1));
        let config = EstimateConfig {
            window: YearWindow { from: Some(2005), to: Some(2002) },
            ..EstimateConfig::default()
        };
        assert_eq!(
            estimate_table(&table, "x", &config).unwrap_err(),
            GrowthError::InvalidWindow { from: 2005, to: 2002 }
        );
    }

    #[test]
    fn out_of_range_window_bounds_are_rejected() {
        let table = growth_table(&exponential(2000, 2010, 10.0, 1.1));
        for (from, to, policy) in [
            (Some(i32::MIN), None, GapPolicy::Flat),
            (Some(i32::MIN), None, GapPolicy::Reject),
            (None, Some(99_999_999), GapPolicy::Flat),
            (Some(-5), Some(2005), GapPolicy::Reject),
        ] {
            let config = EstimateConfig {
                window: YearWindow { from, to },
                gap_policy: policy,
            };
            let err = estimate_table(&table, "x", &config).unwrap_err();
            assert!(matches!(err, GrowthError::InvalidWindow { .. }), "{from:?}..{to:?}: {err:?}");
        }
    }

    #[test]
    fn widest_valid_window_still_fills() {
        let raw = RawSeries::from_points(vec![YearValue::new(2000, 1.0), YearValue::new(2001, 2.0)]);
        let config = EstimateConfig {
            window: YearWindow { from: Some(1990), to: Some(2001) },
            gap_policy: GapPolicy::Flat,
        };
        let (_, series) = estimate_series(&raw, "x", &config).unwrap();
        assert_eq!(series.len(), 12);
        assert_eq!(series.value(1990), Some(1.0));
    }

    #[test]
    fn estimate_series_reports_observed_range() {
        let raw = RawSeries::from_points(vec![YearValue::new(1991, 2.0), YearValue::new(2000, 4.0)]);
        let (report, series) = estimate_series(&raw, "x", &EstimateConfig::default()).unwrap();
        assert_eq!((report.first_year, report.last_year), (1991, 2000));
        assert_eq!(series.len(), 10);
        assert_eq!(report.buckets.len(), 1);
        assert!(report.overall_rate_pct > 0.0);
    }
}
