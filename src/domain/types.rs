//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - built and discarded within a single estimation call
//! - exported to JSON/CSV
//! - handed to renderers without recomputation

use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A single `(Year, Total)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

impl YearValue {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}

/// Observations that survived row filtering: ascending, unique years, possibly with gaps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSeries {
    points: Vec<YearValue>,
}

impl RawSeries {
    /// Build from already-validated points. Sorts by year.
    ///
    /// Uniqueness is checked by the row filter; this constructor only orders.
    pub fn from_points(mut points: Vec<YearValue>) -> Self {
        points.sort_by_key(|p| p.year);
        Self { points }
    }

    pub fn points(&self) -> &[YearValue] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.points.first().map(|p| p.year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.points.last().map(|p| p.year)
    }
}

/// One year of a gap-free series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: f64,
    /// `true` when the value was filled in rather than read from the source.
    pub interpolated: bool,
}

/// A series with a value for every integer year in `[first_year, last_year]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteSeries {
    points: Vec<SeriesPoint>,
}

impl CompleteSeries {
    /// Returns `None` unless `points` is non-empty and strictly consecutive.
    pub fn new(points: Vec<SeriesPoint>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let consecutive = points.windows(2).all(|w| w[1].year == w[0].year + 1);
        consecutive.then_some(Self { points })
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_year(&self) -> i32 {
        self.points[0].year
    }

    pub fn last_year(&self) -> i32 {
        self.points[self.points.len() - 1].year
    }

    pub fn value(&self, year: i32) -> Option<f64> {
        let idx = usize::try_from(year - self.first_year()).ok()?;
        self.points.get(idx).map(|p| p.value)
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Points whose year falls inside `bucket` (clipped to the series range).
    pub fn slice(&self, bucket: DecadeBucket) -> &[SeriesPoint] {
        let first = self.first_year();
        let last = self.last_year();
        let start = bucket.start.max(first);
        let end = bucket.end.min(last);
        if start > end {
            return &[];
        }
        let lo = (start - first) as usize;
        let hi = (end - first) as usize;
        &self.points[lo..=hi]
    }

    pub fn interpolated_count(&self) -> usize {
        self.points.iter().filter(|p| p.interpolated).count()
    }
}

/// A contiguous, inclusive year range used as the unit of rate aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DecadeBucket {
    pub start: i32,
    pub end: i32,
}

impl DecadeBucket {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// `"start-end"`, the key used in reports and on chart axes.
    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }

    /// Number of years covered.
    pub fn span(&self) -> usize {
        (self.end - self.start + 1).max(0) as usize
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl fmt::Display for DecadeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Growth rate of one bucket with at least two points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketRate {
    pub label: String,
    pub bucket: DecadeBucket,
    pub points: usize,
    pub interpolated: usize,
    pub rate_pct: f64,
}

/// Per-decade and overall trend growth rates for one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthRateReport {
    pub label: String,
    pub first_year: i32,
    pub last_year: i32,
    /// Buckets with a defined rate, ascending.
    pub buckets: Vec<BucketRate>,
    /// Buckets left out because they hold fewer than two points.
    pub skipped: Vec<DecadeBucket>,
    pub overall_rate_pct: f64,
}

impl GrowthRateReport {
    /// The `{ "start-end": rate_pct }` view of the report.
    pub fn rates(&self) -> BTreeMap<String, f64> {
        self.buckets
            .iter()
            .map(|b| (b.label.clone(), b.rate_pct))
            .collect()
    }

    pub fn rate_for(&self, label: &str) -> Option<f64> {
        self.buckets
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.rate_pct)
    }
}

/// How to fill a missing year that has an observed value on only one side.
///
/// This only arises when an explicit year window extends past the observed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GapPolicy {
    /// Fail the estimation with an unbounded-gap error.
    #[default]
    Reject,
    /// Carry the nearest observed value into the gap.
    Flat,
}

/// Optional inclusive bounds on the years considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YearWindow {
    pub from: Option<i32>,
    pub to: Option<i32>,
}

impl YearWindow {
    pub fn contains(&self, year: i32) -> bool {
        self.from.is_none_or(|from| year >= from) && self.to.is_none_or(|to| year <= to)
    }
}

/// Knobs for one estimation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EstimateConfig {
    pub window: YearWindow,
    pub gap_policy: GapPolicy,
}

/// Which dashboard view a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    #[default]
    Growth,
    Heatmap,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 2] = [AnalysisType::Growth, AnalysisType::Heatmap];

    pub fn display_name(self) -> &'static str {
        match self {
            AnalysisType::Growth => "Trend Growth Rate",
            AnalysisType::Heatmap => "Heatmap",
        }
    }
}

/// District-by-year grid for the heatmap view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Heatmap {
    /// Row labels in first-seen order.
    pub districts: Vec<String>,
    /// Column labels, ascending.
    pub years: Vec<i32>,
    /// `cells[row][col]`, `None` where the source had no value.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl Heatmap {
    pub fn get(&self, district: &str, year: i32) -> Option<f64> {
        let row = self.districts.iter().position(|d| d == district)?;
        let col = self.years.iter().position(|&y| y == year)?;
        self.cells[row][col]
    }

    /// `(min, max)` over present cells.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in self.cells.iter().flatten().flatten() {
            lo = lo.min(*v);
            hi = hi.max(*v);
        }
        (lo.is_finite() && hi.is_finite()).then_some((lo, hi))
    }
}
