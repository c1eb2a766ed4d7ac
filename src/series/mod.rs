//! Forecast series derivation
//!
//! - `derive.rs`: Farm / HODL / Only A variant expansion and the observer hook

pub mod derive;

pub use derive::{
    derive_series, DerivedSeries, DerivedTable, SeriesObserver, TracingObserver, Variant,
    VariantRow, DERIVED_HEADER, REQUIRED_FIELDS,
};
