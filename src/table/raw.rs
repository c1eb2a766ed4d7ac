//! Row-oriented input tables
//!
//! A `RawTable` keeps the header apart from the data rows, so consumers never
//! have to skip row 0 themselves. Tables arrive either as an in-memory value or
//! as JSON in the `[[header...], [row...], ...]` layout written by the forecast
//! generator.

use super::error::{Result, TableError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value: text for names and dates, numbers for measures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// Numeric value of the cell
    ///
    /// Numbers are returned as-is; text is parsed after trimming.
    /// Returns None for text that is not a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

/// Header plus data rows; every row has the header's width
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Create a table, rejecting rows whose width differs from the header
    pub fn new(header: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let expected = header.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(TableError::RaggedRow {
                // 1-based row number in the input, header included
                row: i + 1,
                expected,
                found: row.len(),
            });
        }

        Ok(Self { header, rows })
    }

    /// Split a table whose first row holds the column names
    ///
    /// An empty input yields an empty table (no columns, no rows).
    pub fn from_rows(mut rows: Vec<Vec<Cell>>) -> Result<Self> {
        if rows.is_empty() {
            return Ok(Self {
                header: Vec::new(),
                rows: Vec::new(),
            });
        }

        let data = rows.split_off(1);
        let header = rows
            .pop()
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(column, cell)| match cell {
                Cell::Text(name) => Ok(name),
                Cell::Number(_) => Err(TableError::InvalidHeader { column }),
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(header, data)
    }

    /// Parse a JSON array-of-arrays table (header row first)
    pub fn from_json_str(json: &str) -> Result<Self> {
        let rows: Vec<Vec<Cell>> = serde_json::from_str(json)?;
        Self::from_rows(rows)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of data rows (header excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header and rows joined back into one row list, for use as a dataset source
    pub fn to_source(&self) -> Vec<Vec<Cell>> {
        let mut source = Vec::with_capacity(self.rows.len() + 1);
        source.push(self.header.iter().map(|h| Cell::Text(h.clone())).collect());
        source.extend(self.rows.iter().cloned());
        source
    }
}
