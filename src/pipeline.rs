//! Shared chart generation pipeline
//!
//! One synchronous pass from a raw table to a chart specification:
//! 1. Resolves the columns the chart kind needs (fails fast when one is missing)
//! 2. Derives Farm / HODL / Only A rows for forecast tables
//! 3. Builds the specification with the kind's preset
//!
//! Each call returns a fresh `ChartSpec`; nothing is cached between calls.

use crate::chart::{presets, ChartSpec};
use crate::config::{ChartConfig, ChartKind};
use crate::series::{derive_series, SeriesObserver};
use crate::table::{ColumnIndex, RawTable, Result};
use tracing::info;

/// Generate the chart specification for `table`
///
/// `observer` receives the derived forecast data (unused for income charts).
/// A table with a header but no rows produces a specification with no series.
pub fn generate_chart(
    table: &RawTable,
    config: &ChartConfig,
    observer: Option<&dyn SeriesObserver>,
) -> Result<ChartSpec> {
    info!(
        kind = ?config.kind,
        columns = table.header().len(),
        rows = table.len(),
        "generating chart"
    );

    let spec = match config.kind {
        ChartKind::Forecast => {
            let derived = derive_series(table, observer)?;
            presets::forecast(config).build(&derived.entities, derived.table.to_source())
        }
        ChartKind::Income => {
            ColumnIndex::new(table).resolve_all(&presets::INCOME_FIELDS)?;

            // The country list is fixed, but an empty table still renders as
            // an empty chart
            let countries: &[String] = if table.is_empty() {
                &[]
            } else {
                &config.income_countries
            };
            presets::income(config).build(countries, table.to_source())
        }
    };

    info!(
        series = spec.series.len(),
        datasets = spec.dataset.len(),
        "chart specification ready"
    );

    Ok(spec)
}
