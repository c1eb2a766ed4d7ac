//! Polars DataFrame to RawTable conversion
//!
//! Lets callers that already hold columnar data (CSV/Parquet readers, upstream
//! computations) feed the chart pipeline without going through JSON.
//! String columns become text cells, date columns are rendered as text, and
//! every other column is cast to Float64.

use super::error::{Result, TableError};
use super::raw::{Cell, RawTable};
use polars::prelude::*;

/// Convert a DataFrame into a row-oriented table, keeping column order
///
/// Null values are rejected: the chart pipeline has no representation for
/// missing cells.
pub fn dataframe_to_raw_table(df: &DataFrame) -> Result<RawTable> {
    let nrows = df.height();
    let mut header = Vec::with_capacity(df.width());
    let mut rows: Vec<Vec<Cell>> = (0..nrows).map(|_| Vec::with_capacity(df.width())).collect();

    for col in df.get_columns() {
        let series = col.as_materialized_series();
        let name = series.name().to_string();
        let cells = column_cells(series, &name)?;

        for (row, cell) in rows.iter_mut().zip(cells) {
            row.push(cell);
        }
        header.push(name);
    }

    RawTable::new(header, rows)
}

/// Read one column as cells
fn column_cells(series: &Series, name: &str) -> Result<Vec<Cell>> {
    let null_cell = |row: usize| TableError::InvalidCell {
        row: row + 1,
        field: name.to_string(),
        reason: "null value".to_string(),
    };

    match series.dtype() {
        DataType::String => series
            .str()?
            .into_iter()
            .enumerate()
            .map(|(i, opt)| opt.map(|s| Cell::Text(s.to_string())).ok_or_else(|| null_cell(i)))
            .collect(),
        DataType::Date | DataType::Datetime(_, _) => {
            let as_text = series.cast(&DataType::String)?;
            as_text
                .str()?
                .into_iter()
                .enumerate()
                .map(|(i, opt)| opt.map(|s| Cell::Text(s.to_string())).ok_or_else(|| null_cell(i)))
                .collect()
        }
        _ => {
            let as_f64 = series.cast(&DataType::Float64)?;
            as_f64
                .f64()?
                .into_iter()
                .enumerate()
                .map(|(i, opt)| opt.map(Cell::Number).ok_or_else(|| null_cell(i)))
                .collect()
        }
    }
}
