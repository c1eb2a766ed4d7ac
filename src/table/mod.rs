//! Tabular input: raw tables, column resolution, DataFrame ingestion
//!
//! Structure:
//! - `raw.rs`: `RawTable` (header + rows) and `Cell`
//! - `columns.rs`: `ColumnIndex` header lookup
//! - `frame.rs`: polars `DataFrame` conversion
//! - `error.rs`: Error types

pub mod columns;
pub mod error;
pub mod frame;
pub mod raw;

pub use columns::ColumnIndex;
pub use error::{Result, TableError};
pub use frame::dataframe_to_raw_table;
pub use raw::{Cell, RawTable};
