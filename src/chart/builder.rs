//! Parameterized chart specification builder
//!
//! Both chart flavors go through the same builder. What differs is supplied
//! as configuration:
//! - how one entity expands into series (identity or forecast variants)
//! - the filter selecting each series' rows
//! - the encoding and the end-label / tooltip formatters

use super::spec::{
    dataset_id, ChartSpec, DatasetDef, Emphasis, EndLabel, Encode, FilterCondition, Grid,
    LabelFormatter, LabelLayout, SeriesDef, SeriesKind, SeriesTooltip, TextStyle, Title, Tooltip,
    ValueFormatter, XAxis, YAxis, RAW_DATASET_ID,
};
use crate::series::Variant;
use crate::table::Cell;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Default animation duration
pub const DEFAULT_ANIMATION_DURATION: u32 = 3000;

/// How one entity name becomes series names
#[derive(Debug, Clone, PartialEq)]
pub enum Expansion {
    /// One series named after the entity
    Identity,
    /// One series per variant, named `{entity}{suffix}`
    Variants(Vec<Variant>),
}

impl Expansion {
    pub fn expand(&self, entity: &str) -> Vec<String> {
        match self {
            Expansion::Identity => vec![entity.to_string()],
            Expansion::Variants(variants) => variants.iter().map(|v| v.label(entity)).collect(),
        }
    }
}

/// Filter selecting a series' rows from the raw dataset
///
/// Produces an optional `dimension >= bound` condition followed by
/// `name_dimension = series name`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTemplate {
    pub name_dimension: String,
    pub lower_bound: Option<(String, f64)>,
}

impl FilterTemplate {
    pub fn by_name(name_dimension: impl Into<String>) -> Self {
        Self {
            name_dimension: name_dimension.into(),
            lower_bound: None,
        }
    }

    pub fn lower_bound(mut self, dimension: impl Into<String>, bound: Option<f64>) -> Self {
        self.lower_bound = bound.map(|b| (dimension.into(), b));
        self
    }

    pub fn conditions(&self, series_name: &str) -> Vec<FilterCondition> {
        let mut conditions = Vec::with_capacity(2);
        if let Some((dimension, bound)) = &self.lower_bound {
            conditions.push(FilterCondition::gte(dimension.clone(), *bound));
        }
        conditions.push(FilterCondition::eq(
            self.name_dimension.clone(),
            series_name,
        ));
        conditions
    }
}

/// Builder for `ChartSpec`
#[derive(Debug, Clone)]
pub struct ChartSpecBuilder {
    title: String,
    expansion: Expansion,
    filter: FilterTemplate,
    encode: Encode,
    label_formatter: LabelFormatter,
    tooltip_formatter: Option<ValueFormatter>,
    y_axis_name: String,
    grid_right: u32,
    animation_duration: u32,
    font_family: Option<String>,
}

impl ChartSpecBuilder {
    /// Create a builder with identity expansion and no tooltip formatter
    pub fn new(title: impl Into<String>, filter: FilterTemplate, encode: Encode) -> Self {
        Self {
            title: title.into(),
            expansion: Expansion::Identity,
            filter,
            encode,
            label_formatter: LabelFormatter::Locale,
            tooltip_formatter: None,
            y_axis_name: String::new(),
            grid_right: 0,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            font_family: None,
        }
    }

    pub fn expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    pub fn label_formatter(mut self, formatter: LabelFormatter) -> Self {
        self.label_formatter = formatter;
        self
    }

    pub fn tooltip_formatter(mut self, formatter: Option<ValueFormatter>) -> Self {
        self.tooltip_formatter = formatter;
        self
    }

    pub fn y_axis_name(mut self, name: impl Into<String>) -> Self {
        self.y_axis_name = name.into();
        self
    }

    pub fn grid_right(mut self, right: u32) -> Self {
        self.grid_right = right;
        self
    }

    pub fn animation_duration(mut self, duration: u32) -> Self {
        self.animation_duration = duration;
        self
    }

    pub fn font_family(mut self, font: Option<String>) -> Self {
        self.font_family = font;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Build the specification for `entities` over `source`
    ///
    /// `source` is the raw dataset (header row first). Series and filtered
    /// datasets follow the entity order, then the expansion order.
    ///
    /// Dataset ids are unique: a repeated series name, or one whose id would
    /// shadow the raw dataset, is skipped.
    pub fn build(&self, entities: &[String], source: Vec<Vec<Cell>>) -> ChartSpec {
        let mut seen = HashSet::new();
        let series_names: Vec<String> = entities
            .iter()
            .flat_map(|entity| self.expansion.expand(entity))
            .filter(|name| {
                if dataset_id(name) == RAW_DATASET_ID {
                    warn!(
                        series = name.as_str(),
                        "series id collides with the raw dataset, skipped"
                    );
                    return false;
                }
                if !seen.insert(name.clone()) {
                    warn!(series = name.as_str(), "repeated series name, skipped");
                    return false;
                }
                true
            })
            .collect();

        debug!(
            entities = entities.len(),
            series = series_names.len(),
            source_rows = source.len(),
            "building chart specification"
        );

        let text_style = self.font_family.as_ref().map(|font| TextStyle {
            font_family: font.clone(),
        });

        let mut dataset = Vec::with_capacity(series_names.len() + 1);
        dataset.push(DatasetDef::source(RAW_DATASET_ID, source));

        let mut series = Vec::with_capacity(series_names.len());
        for name in series_names {
            let id = dataset_id(&name);
            dataset.push(DatasetDef::filtered(
                id.clone(),
                RAW_DATASET_ID,
                self.filter.conditions(&name),
            ));
            series.push(self.series_def(id, name, text_style.clone()));
        }

        ChartSpec {
            animation_duration: self.animation_duration,
            dataset,
            title: Title {
                text: self.title.clone(),
            },
            tooltip: Tooltip::default(),
            x_axis: XAxis::default(),
            y_axis: YAxis {
                name: self.y_axis_name.clone(),
            },
            grid: Grid {
                right: self.grid_right,
            },
            series,
            text_style,
        }
    }

    fn series_def(&self, dataset_id: String, name: String, text_style: Option<TextStyle>) -> SeriesDef {
        SeriesDef {
            kind: SeriesKind::Line,
            dataset_id,
            show_symbol: false,
            name,
            end_label: EndLabel {
                show: true,
                formatter: self.label_formatter.clone(),
            },
            label_layout: LabelLayout::default(),
            emphasis: Emphasis::default(),
            encode: self.encode.clone(),
            tooltip: self.tooltip_formatter.clone().map(|value_formatter| SeriesTooltip {
                value_formatter,
                text_style,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode() -> Encode {
        Encode {
            x: "Date".to_string(),
            y: "Value".to_string(),
            label: vec!["Name".to_string(), "Value".to_string()],
            item_name: "Date".to_string(),
            tooltip: vec!["Value".to_string()],
        }
    }

    fn source() -> Vec<Vec<Cell>> {
        vec![
            vec![Cell::from("Date"), Cell::from("Name"), Cell::from("Value")],
            vec![Cell::from("d1"), Cell::from("a"), Cell::Number(1.0)],
            vec![Cell::from("d1"), Cell::from("b"), Cell::Number(2.0)],
        ]
    }

    #[test]
    fn test_expansion() {
        assert_eq!(Expansion::Identity.expand("France"), vec!["France"]);
        let variants = Expansion::Variants(Variant::ALL.to_vec());
        assert_eq!(
            variants.expand("P"),
            vec!["P Farm", "P HODL", "P Only A"]
        );
    }

    #[test]
    fn test_filter_template_conditions() {
        let plain = FilterTemplate::by_name("Name");
        assert_eq!(plain.conditions("x"), vec![FilterCondition::eq("Name", "x")]);

        let bounded = FilterTemplate::by_name("Country").lower_bound("Year", Some(1950.0));
        assert_eq!(
            bounded.conditions("France"),
            vec![
                FilterCondition::gte("Year", 1950.0),
                FilterCondition::eq("Country", "France")
            ]
        );

        let unbounded = FilterTemplate::by_name("Country").lower_bound("Year", None);
        assert_eq!(unbounded.conditions("France").len(), 1);
    }

    #[test]
    fn test_build_identity() {
        let builder = ChartSpecBuilder::new("T", FilterTemplate::by_name("Name"), encode())
            .y_axis_name("Y")
            .grid_right(140);
        let spec = builder.build(&["a".to_string(), "b".to_string()], source());

        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.dataset.len(), 3);
        assert_eq!(spec.dataset[0].id, RAW_DATASET_ID);
        assert_eq!(spec.dataset[1].id, "dataset_a");
        assert_eq!(spec.dataset[2].from_dataset_id.as_deref(), Some(RAW_DATASET_ID));
        assert_eq!(spec.series[1].dataset_id, "dataset_b");
        assert_eq!(spec.series[1].name, "b");
        assert!(!spec.series[0].show_symbol);
        assert!(spec.series[0].tooltip.is_none());
        assert_eq!(spec.grid.right, 140);
        assert_eq!(spec.y_axis.name, "Y");
        assert_eq!(spec.animation_duration, DEFAULT_ANIMATION_DURATION);
        assert!(spec.text_style.is_none());
        assert_eq!(spec.filtered_rows("dataset_b").len(), 1);
    }

    #[test]
    fn test_build_with_tooltip_and_font() {
        let builder = ChartSpecBuilder::new("T", FilterTemplate::by_name("Name"), encode())
            .tooltip_formatter(Some(ValueFormatter::Currency))
            .font_family(Some("Mono".to_string()))
            .animation_duration(500);
        let spec = builder.build(&["a".to_string()], source());

        let tooltip = spec.series[0].tooltip.as_ref().unwrap();
        assert_eq!(tooltip.value_formatter, ValueFormatter::Currency);
        assert_eq!(tooltip.text_style.as_ref().unwrap().font_family, "Mono");
        assert_eq!(spec.text_style.as_ref().unwrap().font_family, "Mono");
        assert_eq!(spec.animation_duration, 500);
    }

    #[test]
    fn test_build_keeps_dataset_ids_unique() {
        let builder = ChartSpecBuilder::new("T", FilterTemplate::by_name("Name"), encode());
        let entities: Vec<String> = ["a", "a", "raw", "b"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let spec = builder.build(&entities, source());

        let ids: Vec<&str> = spec.dataset.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec![RAW_DATASET_ID, "dataset_a", "dataset_b"]);
        assert_eq!(spec.series.len(), 2);
        assert!(spec.raw_dataset().unwrap().source.is_some());
    }

    #[test]
    fn test_build_without_entities() {
        let builder = ChartSpecBuilder::new("Empty", FilterTemplate::by_name("Name"), encode());
        let spec = builder.build(&[], vec![source().remove(0)]);

        assert!(spec.series.is_empty());
        assert_eq!(spec.dataset.len(), 1);
        assert_eq!(spec.raw_dataset().unwrap().source.as_ref().unwrap().len(), 1);
        assert!(spec.end_labels().is_empty());
    }
}
