//! Column name resolution
//!
//! Builds a name → position map from the header row only, so the cost is
//! proportional to the table width and independent of its length.

use super::error::{Result, TableError};
use super::raw::RawTable;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Column positions keyed by header name
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
    names: Vec<String>,
}

impl ColumnIndex {
    /// Build the index for a table's header
    pub fn new(table: &RawTable) -> Self {
        Self::from_header(table.header())
    }

    /// Build the index from a list of column names
    ///
    /// A repeated name resolves to its last position.
    pub fn from_header(header: &[String]) -> Self {
        let positions = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Self {
            positions,
            names: header.to_vec(),
        }
    }

    /// Position of `name`, or `MissingField` when the header lacks it
    pub fn resolve(&self, name: &str) -> Result<usize> {
        match self.positions.get(name) {
            Some(&idx) => {
                debug!(field = name, index = idx, "resolved column");
                Ok(idx)
            }
            None => {
                warn!(field = name, available = ?self.names, "column not found in header");
                Err(TableError::MissingField {
                    field: name.to_string(),
                    available: self.names.clone(),
                })
            }
        }
    }

    /// Resolve several names at once, failing on the first missing one
    pub fn resolve_all(&self, names: &[&str]) -> Result<Vec<usize>> {
        names.iter().map(|name| self.resolve(name)).collect()
    }
}
