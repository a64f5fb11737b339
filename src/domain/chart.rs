//! Render-agnostic chart description.
//!
//! The estimator binds its report to a [`GrowthChart`]; the ASCII, SVG and TUI
//! renderers only read it.

use serde::Serialize;

use super::GrowthRateReport;

pub const X_LABEL: &str = "Decade Range";
pub const Y_LABEL: &str = "Trend Growth Rate (%)";
pub const BAR_SERIES_LABEL: &str = "Decade-wise Trend Growth Rate";

/// One bar: a bucket label and its growth rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    /// Text drawn on top of the bar, e.g. `"3.14%"`.
    pub annotation: String,
}

/// Horizontal line at the overall growth rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: String,
}

/// Decade-wise growth bar chart with an overall reference line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<ChartBar>,
    pub reference: ReferenceLine,
}

impl GrowthChart {
    pub fn from_report(report: &GrowthRateReport) -> Self {
        let bars = report
            .buckets
            .iter()
            .map(|b| ChartBar {
                label: b.label.clone(),
                value: b.rate_pct,
                annotation: format_pct(b.rate_pct),
            })
            .collect();

        Self {
            title: format!("Decade-wise Trend Growth Rate for {}", report.label),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            bars,
            reference: ReferenceLine {
                value: report.overall_rate_pct,
                label: format!("Overall Growth Rate ({})", format_pct(report.overall_rate_pct)),
            },
        }
    }

    /// X-axis tick labels, one per bar.
    pub fn x_ticks(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.label.as_str()).collect()
    }

    /// Value range covering zero, every bar and the reference line.
    pub fn value_range(&self) -> (f64, f64) {
        let mut lo = 0.0_f64.min(self.reference.value);
        let mut hi = 0.0_f64.max(self.reference.value);
        for bar in &self.bars {
            lo = lo.min(bar.value);
            hi = hi.max(bar.value);
        }
        if !(lo.is_finite() && hi.is_finite()) || hi - lo < 1e-12 {
            return (lo.min(0.0), lo.min(0.0) + 1.0);
        }
        (lo, hi)
    }

    /// `value_range` padded by `frac` of its span on both sides, for plotting.
    pub fn padded_range(&self, frac: f64) -> (f64, f64) {
        let (lo, hi) = self.value_range();
        let pad = ((hi - lo) * frac).max(1e-9);
        let lo = if lo < 0.0 { lo - pad } else { lo };
        (lo, hi + pad)
    }
}

/// `"{v:.2}%"`.
pub fn format_pct(v: f64) -> String {
    format!("{v:.2}%")
}
