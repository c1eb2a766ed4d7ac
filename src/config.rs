//! Chart configuration from chart properties
//!
//! All default values come from chart.json through `ChartPropertyReader`;
//! this module only types and range-checks them.

use crate::chart::properties::ChartPropertyReader;
use std::collections::HashMap;

/// Which chart flavor to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    /// Farm / HODL / Only A series per forecast entity
    #[default]
    Forecast,
    /// One series per country over an income table
    Income,
}

impl ChartKind {
    /// Parse from a property value; validation happens in `get_enum`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "income" => Self::Income,
            _ => Self::Forecast,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,

    /// Chart title; the kind's default title when not set
    pub title: String,

    /// Initial animation duration (ms)
    pub animation_duration: u32,

    /// Width the variant name is padded to in forecast end labels
    pub label_width: usize,

    /// Font for forecast text (chart and tooltips), None = renderer default
    pub font_family: Option<String>,

    /// Right margin of the forecast chart
    pub forecast_grid_right: u32,

    /// Right margin of the income chart
    pub income_grid_right: u32,

    /// Lowest year kept by the income filters, None = no bound
    pub income_min_year: Option<f64>,

    /// Countries plotted by the income chart, in series order
    pub income_countries: Vec<String>,
}

impl ChartConfig {
    /// Create config from user-set property values
    ///
    /// Unset or invalid values use the defaults declared in chart.json.
    pub fn from_properties(user_values: &HashMap<String, String>) -> Self {
        let props = ChartPropertyReader::new(user_values);

        let kind = ChartKind::parse(&props.get_enum("chart.kind"));

        // An explicit title wins over the per-kind default
        let title = props.get_optional_string("chart.title").unwrap_or_else(|| {
            match kind {
                ChartKind::Forecast => props.get_string("forecast.title"),
                ChartKind::Income => props.get_string("income.title"),
            }
        });

        Self {
            kind,
            title,
            animation_duration: props.get_u32_in_range("animation.duration", 0, 60_000),
            label_width: props.get_u32_in_range("label.width", 0, 200) as usize,
            font_family: props.get_optional_string("forecast.font.family"),
            forecast_grid_right: props.get_u32_in_range("forecast.grid.right", 0, 2000),
            income_grid_right: props.get_u32_in_range("income.grid.right", 0, 2000),
            income_min_year: props.get_optional_f64("income.year.min"),
            income_countries: props.get_list("income.countries"),
        }
    }

    /// Defaults for `kind`
    pub fn for_kind(kind: ChartKind) -> Self {
        let kind_value = match kind {
            ChartKind::Forecast => "forecast",
            ChartKind::Income => "income",
        };
        let values = HashMap::from([("chart.kind".to_string(), kind_value.to_string())]);
        Self::from_properties(&values)
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::from_properties(&HashMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_defaults() {
        let config = ChartConfig::default();
        assert_eq!(config.kind, ChartKind::Forecast);
        assert_eq!(config.title, "Forecast - Yield Farming");
        assert_eq!(config.animation_duration, 3000);
        assert_eq!(config.label_width, 20);
        assert_eq!(config.font_family.as_deref(), Some("Source Code Pro"));
        assert_eq!(config.forecast_grid_right, 250);
    }

    #[test]
    fn test_income_defaults() {
        let config = ChartConfig::for_kind(ChartKind::Income);
        assert_eq!(config.kind, ChartKind::Income);
        assert_eq!(config.title, "Income in various countries since 1950");
        assert_eq!(config.income_grid_right, 140);
        assert_eq!(config.income_min_year, Some(1950.0));
        assert_eq!(
            config.income_countries,
            vec![
                "Finland",
                "France",
                "Germany",
                "Iceland",
                "Norway",
                "Poland",
                "Russia",
                "United Kingdom"
            ]
        );
    }

    #[test]
    fn test_explicit_title_and_disabled_bound() {
        let values = HashMap::from([
            ("chart.kind".to_string(), "income".to_string()),
            ("chart.title".to_string(), "It's all in the wrist!".to_string()),
            ("income.year.min".to_string(), " ".to_string()),
        ]);
        let config = ChartConfig::from_properties(&values);
        assert_eq!(config.title, "It's all in the wrist!");
        assert_eq!(config.income_min_year, None);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(ChartKind::parse("INCOME"), ChartKind::Income);
        assert_eq!(ChartKind::parse("forecast"), ChartKind::Forecast);
        assert_eq!(ChartKind::parse("other"), ChartKind::Forecast);
    }
}
