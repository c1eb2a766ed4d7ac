use thiserror::Error;

/// Errors raised while reading a table or deriving chart data from it
#[derive(Debug, Error)]
pub enum TableError {
    /// A required column is absent from the header row
    #[error("missing field '{field}' (available: {})", available.join(", "))]
    MissingField {
        field: String,
        available: Vec<String>,
    },

    /// A data row does not have the header's width
    #[error("row {row} has {found} cells, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Header cell that is not a column name
    #[error("header cell {column} is not a string")]
    InvalidHeader { column: usize },

    /// A cell could not be read as the type its column requires
    #[error("row {row}, field '{field}': {reason}")]
    InvalidCell {
        row: usize,
        field: String,
        reason: String,
    },

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// DataFrame access error
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

/// Type alias for Results using TableError
pub type Result<T> = std::result::Result<T, TableError>;
