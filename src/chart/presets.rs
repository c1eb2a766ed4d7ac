//! Builder configurations for the two chart flavors

use super::builder::{ChartSpecBuilder, Expansion, FilterTemplate};
use super::spec::{Encode, LabelFormatter, ValueFormatter};
use crate::config::ChartConfig;
use crate::series::Variant;

/// Columns the income chart reads
pub const INCOME_FIELDS: [&str; 3] = ["Income", "Country", "Year"];

fn encode(x: &str, y: &str, name: &str) -> Encode {
    Encode {
        x: x.to_string(),
        y: y.to_string(),
        label: vec![name.to_string(), y.to_string()],
        item_name: x.to_string(),
        tooltip: vec![y.to_string()],
    }
}

/// Farm / HODL / Only A series over a derived forecast table
pub fn forecast(config: &ChartConfig) -> ChartSpecBuilder {
    ChartSpecBuilder::new(
        config.title.clone(),
        FilterTemplate::by_name("Name"),
        encode("Date", "Value", "Name"),
    )
    .expansion(Expansion::Variants(Variant::ALL.to_vec()))
    .label_formatter(LabelFormatter::PaddedCurrency {
        width: config.label_width,
    })
    .tooltip_formatter(Some(ValueFormatter::Currency))
    .y_axis_name("Total Value (USD)")
    .grid_right(config.forecast_grid_right)
    .animation_duration(config.animation_duration)
    .font_family(config.font_family.clone())
}

/// One series per country over a raw income table
pub fn income(config: &ChartConfig) -> ChartSpecBuilder {
    ChartSpecBuilder::new(
        config.title.clone(),
        FilterTemplate::by_name("Country").lower_bound("Year", config.income_min_year),
        encode("Year", "Income", "Country"),
    )
    .label_formatter(LabelFormatter::Locale)
    .y_axis_name("Income")
    .grid_right(config.income_grid_right)
    .animation_duration(config.animation_duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::FilterOp;
    use crate::config::ChartKind;
    use crate::table::Cell;

    #[test]
    fn test_forecast_preset() {
        let spec = forecast(&ChartConfig::default()).build(
            &["P".to_string()],
            vec![vec![Cell::from("Date"), Cell::from("Name"), Cell::from("Value"), Cell::from("APR")]],
        );

        assert_eq!(spec.title.text, "Forecast - Yield Farming");
        assert_eq!(spec.y_axis.name, "Total Value (USD)");
        assert_eq!(spec.grid.right, 250);
        assert_eq!(spec.series.len(), 3);
        assert_eq!(spec.series[2].name, "P Only A");
        assert_eq!(spec.series[0].encode.label, vec!["Name", "Value"]);
        assert_eq!(spec.series[0].encode.item_name, "Date");
        assert_eq!(
            spec.series[0].end_label.formatter,
            LabelFormatter::PaddedCurrency { width: 20 }
        );
        assert!(spec.series[0].tooltip.is_some());
    }

    #[test]
    fn test_income_preset_filters() {
        let config = ChartConfig::for_kind(ChartKind::Income);
        let spec = income(&config).build(
            &["France".to_string()],
            vec![vec![Cell::from("Income"), Cell::from("Country"), Cell::from("Year")]],
        );

        let conditions = &spec.dataset[1].transform.as_ref().unwrap().config.and;
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0].dimension, "Year");
        assert_eq!(conditions[0].op, FilterOp::Gte(1950.0));
        assert_eq!(conditions[1].op, FilterOp::Eq(Cell::from("France")));
        assert_eq!(spec.y_axis.name, "Income");
        assert_eq!(spec.grid.right, 140);
        assert!(spec.series[0].tooltip.is_none());
        assert!(spec.text_style.is_none());
    }
}
