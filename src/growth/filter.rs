//! Row filtering: from a raw table to a clean `(Year, Total)` series.
//!
//! Rules, in order:
//! - the table must have `Year` and `Total` columns
//! - a row counts only if its `Year` text is exactly four ASCII digits
//! - rows outside the requested year window are dropped
//! - rows with an empty or non-numeric `Total` are dropped
//! - surviving totals must be finite and strictly positive
//! - surviving years must be unique

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{RawSeries, YearValue, YearWindow};
use crate::error::GrowthError;
use crate::io::table::SeriesTable;

pub const YEAR_COLUMN: &str = "Year";
pub const TOTAL_COLUMN: &str = "Total";

/// Every year a four-digit `Year` cell can spell.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

// ASCII digits only: `\d` would also accept non-Latin numerals.
static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("year pattern is a valid regex"));

/// Counts of what happened to each row, for logging and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterStats {
    pub rows_read: usize,
    pub bad_year: usize,
    pub outside_window: usize,
    pub missing_total: usize,
    pub rows_used: usize,
}

/// `true` if `text` is a four-digit year.
pub fn is_year_text(text: &str) -> bool {
    YEAR_PATTERN.is_match(text)
}

/// Apply the row rules to `table`.
pub fn filter_rows(table: &SeriesTable, window: YearWindow) -> Result<(RawSeries, FilterStats), GrowthError> {
    let (Some(year_col), Some(total_col)) = (table.column_index(YEAR_COLUMN), table.column_index(TOTAL_COLUMN))
    else {
        return Err(GrowthError::MissingColumns {
            missing: table.missing_columns(&[YEAR_COLUMN, TOTAL_COLUMN]),
        });
    };

    let mut stats = FilterStats {
        rows_read: table.rows().len(),
        ..FilterStats::default()
    };
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();

    for row in 0..table.rows().len() {
        let Some(year) = table
            .cell(row, year_col)
            .as_text()
            .filter(|text| is_year_text(text))
            .and_then(|text| text.parse::<i32>().ok())
        else {
            stats.bad_year += 1;
            continue;
        };

        if !window.contains(year) {
            stats.outside_window += 1;
            continue;
        }

        let Some(total) = table.cell(row, total_col).as_f64() else {
            stats.missing_total += 1;
            continue;
        };

        if !total.is_finite() || total <= 0.0 {
            return Err(GrowthError::InvalidValue { year, value: total });
        }
        if by_year.insert(year, total).is_some() {
            return Err(GrowthError::DuplicateYear { year });
        }
    }

    stats.rows_used = by_year.len();
    let points = by_year
        .into_iter()
        .map(|(year, value)| YearValue::new(year, value))
        .collect();

    Ok((RawSeries::from_points(points), stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::table::Cell;

    fn table(rows: Vec<(Cell, Cell)>) -> SeriesTable {
        let mut t = SeriesTable::new([YEAR_COLUMN, TOTAL_COLUMN]);
        for (year, total) in rows {
            t.push_row(vec![year, total]);
        }
        t
    }

    #[test]
    fn only_four_digit_years_survive() {
        let t = table(vec![
            (Cell::from("1990"), Cell::from("10")),
            (Cell::from("199X"), Cell::from("11")),
            (Cell::Int(1991), Cell::from("12")),
            (Cell::from("19900"), Cell::from("13")),
            (Cell::Float(1992.0), Cell::from("14")),
            (Cell::from("TE"), Cell::from("15")),
        ]);

        let (series, stats) = filter_rows(&t, YearWindow::default()).unwrap();
        let years: Vec<i32> = series.points().iter().map(|p| p.year).collect();
        assert_eq!(years, vec![1990, 1991]);
        assert_eq!(stats.bad_year, 4);
        assert_eq!(stats.rows_used, 2);
    }

    #[test]
    fn non_ascii_digits_are_not_years() {
        assert!(is_year_text("2001"));
        assert!(!is_year_text("२००१"));
        assert!(!is_year_text(" 2001"));
    }

    #[test]
    fn null_totals_are_dropped_after_year_filter() {
        let t = table(vec![
            (Cell::from("2000"), Cell::Empty),
            (Cell::from("2001"), Cell::from("n/a")),
            (Cell::from("2002"), Cell::from("5")),
            (Cell::from("bad"), Cell::Empty),
        ]);
        let (series, stats) = filter_rows(&t, YearWindow::default()).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(stats.missing_total, 2);
        assert_eq!(stats.bad_year, 1);
    }

    #[test]
    fn window_is_applied_before_value_checks() {
        let t = table(vec![
            (Cell::from("1950"), Cell::from("-1")),
            (Cell::from("1960"), Cell::from("5")),
            (Cell::from("1961"), Cell::from("6")),
        ]);
        let window = YearWindow { from: Some(1960), to: None };
        let (series, stats) = filter_rows(&t, window).unwrap();
        assert_eq!(series.first_year(), Some(1960));
        assert_eq!(stats.outside_window, 1);
    }

    #[test]
    fn rows_are_sorted_by_year() {
        let t = table(vec![
            (Cell::from("2003"), Cell::from("3")),
            (Cell::from("2001"), Cell::from("1")),
        ]);
        let (series, _) = filter_rows(&t, YearWindow::default()).unwrap();
        assert_eq!(series.first_year(), Some(2001));
        assert_eq!(series.last_year(), Some(2003));
    }

    #[test]
    fn missing_total_column_is_reported() {
        let t = SeriesTable::new(["Year", "Value"]).with_row(vec![Cell::from("2000"), Cell::from("1")]);
        let err = filter_rows(&t, YearWindow::default()).unwrap_err();
        assert_eq!(
            err,
            GrowthError::MissingColumns {
                missing: vec!["Total".to_string()]
            }
        );
    }

    #[test]
    fn both_missing_columns_are_listed() {
        let t = SeriesTable::new(["year", "total"]).with_row(vec![Cell::from("2000"), Cell::from("1")]);
        let err = filter_rows(&t, YearWindow::default()).unwrap_err();
        assert_eq!(
            err,
            GrowthError::MissingColumns {
                missing: vec!["Year".to_string(), "Total".to_string()]
            }
        );
    }

    #[test]
    fn non_positive_and_duplicate_values_fail() {
        let zero = table(vec![(Cell::from("2000"), Cell::from("0"))]);
        assert_eq!(
            filter_rows(&zero, YearWindow::default()).unwrap_err(),
            GrowthError::InvalidValue { year: 2000, value: 0.0 }
        );

        let dup = table(vec![
            (Cell::from("2000"), Cell::from("1")),
            (Cell::Int(2000), Cell::from("2")),
        ]);
        assert_eq!(
            filter_rows(&dup, YearWindow::default()).unwrap_err(),
            GrowthError::DuplicateYear { year: 2000 }
        );
    }
}
