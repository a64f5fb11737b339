//! Tabular sources.
//!
//! The estimator does not care where rows come from. Anything that can produce
//! a [`SeriesTable`] implements [`SeriesSource`]: a CSV file on disk
//! ([`crate::io::CsvSource`]) or a table built in memory.

use crate::error::GrowthError;

/// A single typed value in a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    Empty,
}

impl Cell {
    /// Parse a raw CSV field. Empty (after trimming) becomes [`Cell::Empty`].
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    /// String form used for pattern checks on keys such as `Year`.
    ///
    /// Floats keep their fractional part (`1990.0`), so a float year never
    /// passes a digits-only check.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Text(s) => Some(s.trim().to_string()),
            Cell::Int(i) => Some(i.to_string()),
            Cell::Float(f) => Some(format!("{f:?}")),
            Cell::Empty => None,
        }
    }

    /// Numeric value, or `None` for empty, unparsable, or NaN cells.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Int(i) => *i as f64,
            Cell::Float(f) => *f,
            Cell::Empty => return None,
        };
        if v.is_nan() { None } else { Some(v) }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::from_field(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Empty, Into::into)
    }
}

/// Named columns plus rows of cells. Short rows read as empty cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl SeriesTable {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Builder-style `push_row`.
    pub fn with_row(mut self, row: Vec<Cell>) -> Self {
        self.rows.push(row);
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `(row, col)`; missing trailing fields read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(EMPTY)
    }

    /// Names from `required` that are not columns of this table.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }
}

/// Anything that can be read fully into a [`SeriesTable`].
pub trait SeriesSource {
    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;

    fn load(&self) -> Result<SeriesTable, GrowthError>;
}

impl SeriesSource for SeriesTable {
    fn describe(&self) -> String {
        format!("in-memory table ({} rows)", self.rows.len())
    }

    fn load(&self) -> Result<SeriesTable, GrowthError> {
        Ok(self.clone())
    }
}

impl<T: SeriesSource + ?Sized> SeriesSource for &T {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn load(&self) -> Result<SeriesTable, GrowthError> {
        (**self).load()
    }
}
