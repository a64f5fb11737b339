//! Gap filling.
//!
//! Every year in the target range gets a value. A missing year between two
//! observed years is filled on the straight line joining them:
//!
//! ```text
//! value = prev + (next - prev) / (next_year - prev_year) * (year - prev_year)
//! ```
//!
//! A missing year with an observation on one side only is governed by
//! [`GapPolicy`].

use crate::domain::{CompleteSeries, GapPolicy, RawSeries, SeriesPoint, YearValue};
use crate::error::GrowthError;

/// Fill `[first, last]` from `raw`.
///
/// `raw` must be sorted by year with unique years (as produced by the row filter).
pub fn fill_gaps(raw: &RawSeries, first: i32, last: i32, policy: GapPolicy) -> Result<CompleteSeries, GrowthError> {
    if first > last {
        return Err(GrowthError::InvalidWindow { from: first, to: last });
    }
    let known = raw.points();
    if known.is_empty() {
        return Err(GrowthError::insufficient("no observed values to fill from"));
    }

    let span = last
        .checked_sub(first)
        .and_then(|d| usize::try_from(d).ok())
        .and_then(|d| d.checked_add(1))
        .ok_or(GrowthError::InvalidWindow { from: first, to: last })?;
    let mut points = Vec::with_capacity(span);
    // Index of the first known point with year >= the current year.
    let mut next_idx = 0usize;

    for year in first..=last {
        while next_idx < known.len() && known[next_idx].year < year {
            next_idx += 1;
        }

        if let Some(p) = known.get(next_idx).filter(|p| p.year == year) {
            points.push(SeriesPoint {
                year,
                value: p.value,
                interpolated: false,
            });
            continue;
        }

        let prev = next_idx.checked_sub(1).map(|i| known[i]);
        let next = known.get(next_idx).copied();
        let value = match (prev, next) {
            (Some(prev), Some(next)) => linear(prev, next, year),
            (Some(edge), None) | (None, Some(edge)) => match policy {
                GapPolicy::Flat => edge.value,
                GapPolicy::Reject => return Err(GrowthError::UnboundedGap { year }),
            },
            (None, None) => return Err(GrowthError::UnboundedGap { year }),
        };

        points.push(SeriesPoint {
            year,
            value,
            interpolated: true,
        });
    }

    CompleteSeries::new(points).ok_or_else(|| GrowthError::insufficient("gap filling produced an empty series"))
}

fn linear(prev: YearValue, next: YearValue, year: i32) -> f64 {
    let step = (next.value - prev.value) / f64::from(next.year - prev.year);
    prev.value + step * f64::from(year - prev.year)
}
