//! Forecast Chart Library
//!
//! Turns row-oriented forecast and income tables into declarative,
//! renderer-agnostic line chart specifications.
//!
//! Module organization:
//! - `table`: raw tables, column resolution, DataFrame ingestion
//! - `series`: Farm / HODL / Only A variant expansion
//! - `chart`: specification types, builder, presets, formatting
//! - `config`: chart configuration from properties
//! - `pipeline`: table → specification in one pass

pub mod chart;
pub mod config;
pub mod pipeline;
pub mod series;
pub mod table;

pub use chart::ChartSpec;
pub use config::{ChartConfig, ChartKind};
pub use pipeline::generate_chart;
pub use table::{RawTable, TableError};
