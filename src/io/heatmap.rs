//! District x year heatmap files.
//!
//! A heatmap CSV has one row per `(District, Year, Value)`. We pivot it to a
//! grid with districts as rows (first-seen order) and years as columns
//! (ascending).

use std::collections::BTreeSet;
use std::path::Path;

use tracing::warn;

use crate::domain::Heatmap;
use crate::error::AppError;
use crate::growth::is_year_text;
use crate::io::ingest::CsvSource;
use crate::io::table::{SeriesSource, SeriesTable};

pub const HEATMAP_COLUMNS_MESSAGE: &str = "Heatmap file must contain 'District', 'Year', and 'Value' columns";

/// Load and pivot a heatmap CSV.
pub fn load_heatmap(path: &Path) -> Result<Heatmap, AppError> {
    let table = CsvSource::new(path)
        .load()
        .map_err(|e| AppError::new(2, format!("Error reading heatmap: {e}")))?;
    pivot_heatmap(&table)
}

/// Pivot a `District`/`Year`/`Value` table.
///
/// Rows with an empty district or a year that is not four digits are skipped.
/// A repeated `(District, Year)` keeps the last value, even when it is empty.
pub fn pivot_heatmap(table: &SeriesTable) -> Result<Heatmap, AppError> {
    let (Some(district_col), Some(year_col), Some(value_col)) = (
        table.column_index("District"),
        table.column_index("Year"),
        table.column_index("Value"),
    ) else {
        return Err(AppError::new(2, HEATMAP_COLUMNS_MESSAGE));
    };

    let mut entries: Vec<(usize, i32, Option<f64>)> = Vec::new();
    let mut districts: Vec<String> = Vec::new();
    let mut years: BTreeSet<i32> = BTreeSet::new();

    for row in 0..table.rows().len() {
        let Some(district) = table.cell(row, district_col).as_text().filter(|d| !d.is_empty()) else {
            continue;
        };
        let Some(year) = table
            .cell(row, year_col)
            .as_text()
            .filter(|t| is_year_text(t))
            .and_then(|t| t.parse::<i32>().ok())
        else {
            continue;
        };

        let district_idx = match districts.iter().position(|d| *d == district) {
            Some(idx) => idx,
            None => {
                districts.push(district);
                districts.len() - 1
            }
        };
        years.insert(year);
        entries.push((district_idx, year, table.cell(row, value_col).as_f64()));
    }

    if districts.is_empty() {
        return Err(AppError::new(3, "Heatmap file has no usable District/Year rows."));
    }

    let years: Vec<i32> = years.into_iter().collect();
    let mut cells = vec![vec![None; years.len()]; districts.len()];
    let mut seen: BTreeSet<(usize, usize)> = BTreeSet::new();
    for (row, year, value) in entries {
        // `years` holds every year seen above.
        let Ok(col) = years.binary_search(&year) else { continue };
        if !seen.insert((row, col)) {
            warn!(district = %districts[row], year, "duplicate heatmap cell; keeping the last value");
        }
        cells[row][col] = value;
    }

    Ok(Heatmap { districts, years, cells })
}
