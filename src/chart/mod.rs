//! Chart specification building
//!
//! Structure:
//! - `spec.rs`: serializable `ChartSpec` and formatter descriptors
//! - `builder.rs`: `ChartSpecBuilder` parameterized by expansion, filter and formatters
//! - `presets.rs`: forecast and income builder configurations
//! - `format.rs`: rounding, currency and locale text
//! - `properties.rs`: chart.json property registry and reader

pub mod builder;
pub mod format;
pub mod presets;
pub mod properties;
pub mod spec;

pub use builder::{ChartSpecBuilder, Expansion, FilterTemplate};
pub use format::{format_currency, format_locale, pad_label, round2};
pub use spec::{ChartSpec, LabelFormatter, ValueFormatter, RAW_DATASET_ID};
