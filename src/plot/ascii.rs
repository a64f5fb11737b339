//! ASCII bar chart for terminal output.
//!
//! This is intentionally "dumb" (one row per bucket, fixed width), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - bars: `#`, drawn from the zero column to the bucket rate
//! - overall growth rate: `|` wherever a bar does not cover it
//! - zero on the axis: `0`

use crate::domain::GrowthChart;

/// Render `chart` with `width` columns for the bar area.
pub fn render_bar_chart(chart: &GrowthChart, width: usize) -> String {
    let width = width.max(10);

    let mut out = String::new();
    out.push_str(&chart.title);
    out.push('\n');

    if chart.bars.is_empty() {
        out.push_str("(no buckets)\n");
        return out;
    }

    let (lo, hi) = chart.value_range();
    let label_w = chart
        .bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);

    let zero = map_x(0.0, lo, hi, width);
    let reference = map_x(chart.reference.value, lo, hi, width);

    for bar in &chart.bars {
        let mut row = vec![' '; width];
        let end = map_x(bar.value, lo, hi, width);
        for cell in &mut row[zero.min(end)..=zero.max(end)] {
            *cell = '#';
        }
        if row[reference] == ' ' {
            row[reference] = '|';
        }
        let row: String = row.into_iter().collect();
        out.push_str(&format!("{:<label_w$} |{row}| {}\n", bar.label, bar.annotation));
    }

    let mut axis = vec!['-'; width];
    axis[zero] = '0';
    let axis: String = axis.into_iter().collect();
    out.push_str(&format!("{:<label_w$} +{axis}+\n", ""));
    out.push_str(&format!("{:<label_w$}  [{lo:.2}, {hi:.2}] {}\n", "", chart.y_label));
    out.push_str(&format!("{:<label_w$}  | {}\n", "", chart.reference.label));

    out
}

fn map_x(v: f64, lo: f64, hi: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}
