//! CSV ingest.
//!
//! Turns a delimited text file into a [`SeriesTable`] without interpreting any
//! column. Interpretation (which rows count, what a valid year is) belongs to
//! the growth pipeline.
//!
//! Parse policy:
//! - the first record is the header; names are trimmed and a UTF-8 BOM is stripped
//! - records shorter than the header are padded with empty cells
//! - records longer than the header, invalid UTF-8, or a missing header are read errors

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::GrowthError;
use crate::io::table::{Cell, SeriesSource, SeriesTable};

/// A CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeriesSource for CsvSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<SeriesTable, GrowthError> {
        let file = File::open(&self.path)
            .map_err(|e| GrowthError::read(format!("failed to open '{}': {e}", self.path.display())))?;
        read_table(file)
    }
}

/// Read a whole CSV stream into a table.
pub fn read_table<R: Read>(reader: R) -> Result<SeriesTable, GrowthError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| GrowthError::read(format!("failed to read CSV header: {e}")))?
        .clone();

    let columns: Vec<String> = headers.iter().map(normalize_header_name).collect();
    if columns.iter().all(String::is_empty) {
        return Err(GrowthError::read("no columns to parse from file"));
    }

    let mut table = SeriesTable::new(columns.iter().cloned());
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header, and lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| GrowthError::read(format!("CSV parse error on line {line}: {e}")))?;

        if record.len() > columns.len() {
            return Err(GrowthError::read(format!(
                "line {line}: expected {} fields, saw {}",
                columns.len(),
                record.len()
            )));
        }

        table.push_row(record.iter().map(Cell::from_field).collect());
    }

    debug!(columns = ?table.columns(), rows = table.rows().len(), "read CSV table");
    Ok(table)
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a BOM; left
    // in place it would make `Year` look missing.
    name.trim_start_matches('\u{feff}').trim().to_string()
}
