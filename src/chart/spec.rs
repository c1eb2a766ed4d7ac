//! Declarative chart specification
//!
//! Serializes to an ECharts-style option object: a raw dataset, filtered
//! datasets chained from it, line series bound to those datasets, and global
//! title/axis/tooltip settings. Formatters are descriptors (not closures) so
//! the whole specification stays serializable; `format` evaluates them.

use super::format::{format_currency, format_locale, pad_label};
use crate::table::{Cell, Result};
use serde::Serialize;

/// Id of the dataset holding the full source table
pub const RAW_DATASET_ID: &str = "dataset_raw";

/// Id of the filtered dataset backing the series `name`
pub fn dataset_id(name: &str) -> String {
    format!("dataset_{}", name)
}

/// Complete chart specification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub animation_duration: u32,
    pub dataset: Vec<DatasetDef>,
    pub title: Title,
    pub tooltip: Tooltip,
    pub x_axis: XAxis,
    pub y_axis: YAxis,
    pub grid: Grid,
    pub series: Vec<SeriesDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
}

/// A dataset: either a source table or a filter over another dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Vec<Vec<Cell>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_dataset_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<FilterTransform>,
}

impl DatasetDef {
    pub fn source(id: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            id: id.into(),
            source: Some(rows),
            from_dataset_id: None,
            transform: None,
        }
    }

    pub fn filtered(
        id: impl Into<String>,
        from: impl Into<String>,
        conditions: Vec<FilterCondition>,
    ) -> Self {
        Self {
            id: id.into(),
            source: None,
            from_dataset_id: Some(from.into()),
            transform: Some(FilterTransform::and(conditions)),
        }
    }
}

/// `{ type: "filter", config: { and: [...] } }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterTransform {
    #[serde(rename = "type")]
    pub kind: String,
    pub config: FilterConfig,
}

impl FilterTransform {
    pub fn and(conditions: Vec<FilterCondition>) -> Self {
        Self {
            kind: "filter".to_string(),
            config: FilterConfig { and: conditions },
        }
    }

    /// True when `row` satisfies every condition
    pub fn matches(&self, row: &[Cell], header: &[String]) -> bool {
        self.config.and.iter().all(|c| c.matches(row, header))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterConfig {
    pub and: Vec<FilterCondition>,
}

/// One predicate on a dimension, e.g. `{ dimension: "Name", "=": "X Farm" }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCondition {
    pub dimension: String,
    #[serde(flatten)]
    pub op: FilterOp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FilterOp {
    #[serde(rename = "=")]
    Eq(Cell),
    #[serde(rename = "gte")]
    Gte(f64),
}

impl FilterCondition {
    pub fn eq(dimension: impl Into<String>, value: impl Into<Cell>) -> Self {
        Self {
            dimension: dimension.into(),
            op: FilterOp::Eq(value.into()),
        }
    }

    pub fn gte(dimension: impl Into<String>, bound: f64) -> Self {
        Self {
            dimension: dimension.into(),
            op: FilterOp::Gte(bound),
        }
    }

    /// Evaluate against a row; an unknown dimension never matches
    pub fn matches(&self, row: &[Cell], header: &[String]) -> bool {
        let Some(cell) = header
            .iter()
            .position(|h| *h == self.dimension)
            .and_then(|idx| row.get(idx))
        else {
            return false;
        };

        match &self.op {
            FilterOp::Eq(expected) => cell == expected,
            FilterOp::Gte(bound) => cell.as_f64().is_some_and(|v| v >= *bound),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
}

/// One line series bound to a filtered dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDef {
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub dataset_id: String,
    pub show_symbol: bool,
    pub name: String,
    pub end_label: EndLabel,
    pub label_layout: LabelLayout,
    pub emphasis: Emphasis,
    pub encode: Encode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<SeriesTooltip>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndLabel {
    pub show: bool,
    pub formatter: LabelFormatter,
}

/// Overlap handling hint for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelLayout {
    pub move_overlap: String,
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self {
            move_overlap: "shiftY".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Emphasis {
    pub focus: String,
}

impl Default for Emphasis {
    fn default() -> Self {
        Self {
            focus: "series".to_string(),
        }
    }
}

/// Mapping of dataset dimensions to visual channels
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Encode {
    pub x: String,
    pub y: String,
    /// Dimensions handed to the end-label formatter: `[name, value]`
    pub label: Vec<String>,
    pub item_name: String,
    pub tooltip: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesTooltip {
    pub value_formatter: ValueFormatter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub order: String,
    pub trigger: String,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            order: "valueDesc".to_string(),
            trigger: "axis".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XAxis {
    #[serde(rename = "type")]
    pub kind: String,
    pub name_location: String,
}

impl Default for XAxis {
    fn default() -> Self {
        Self {
            kind: "category".to_string(),
            name_location: "middle".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxis {
    pub name: String,
}

/// Plot margins; the right margin leaves room for end labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub right: u32,
}

/// End-label text rule, applied to the `[name, value]` label dimensions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "template", rename_all = "camelCase")]
pub enum LabelFormatter {
    /// `pad_label(name, width) + ": " + format_currency(value)`
    PaddedCurrency { width: usize },
    /// `name + ": " + format_locale(value)`
    Locale,
}

impl LabelFormatter {
    pub fn format(&self, name: &str, value: f64) -> String {
        match self {
            LabelFormatter::PaddedCurrency { width } => {
                format!("{}: {}", pad_label(name, *width), format_currency(value))
            }
            LabelFormatter::Locale => format!("{}: {}", name, format_locale(value)),
        }
    }
}

/// Tooltip value rule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "template", rename_all = "camelCase")]
pub enum ValueFormatter {
    Currency,
}

impl ValueFormatter {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormatter::Currency => format_currency(value),
        }
    }
}

impl ChartSpec {
    pub fn dataset(&self, id: &str) -> Option<&DatasetDef> {
        self.dataset.iter().find(|d| d.id == id)
    }

    /// The dataset carrying the source table
    pub fn raw_dataset(&self) -> Option<&DatasetDef> {
        self.dataset(RAW_DATASET_ID)
    }

    /// Rows a renderer would select for `dataset_id`
    ///
    /// Source datasets return all data rows; filtered datasets apply their
    /// conditions to the parent's rows. Unknown ids yield nothing.
    pub fn filtered_rows(&self, dataset_id: &str) -> Vec<&[Cell]> {
        let Some(def) = self.dataset(dataset_id) else {
            return Vec::new();
        };

        let (source, transform) = match (&def.source, &def.from_dataset_id) {
            (Some(rows), _) => (rows, None),
            (None, Some(parent)) => match self.dataset(parent).and_then(|p| p.source.as_ref()) {
                Some(rows) => (rows, def.transform.as_ref()),
                None => return Vec::new(),
            },
            (None, None) => return Vec::new(),
        };

        let Some((header_row, data)) = source.split_first() else {
            return Vec::new();
        };
        let header: Vec<String> = header_row.iter().map(|c| c.to_string()).collect();

        data.iter()
            .map(|row| row.as_slice())
            .filter(|row| transform.map_or(true, |t| t.matches(row, &header)))
            .collect()
    }

    /// End-label text of every series at its last data point
    ///
    /// Returns `(series name, label)` pairs in series order; series whose
    /// dataset selects no rows are skipped.
    pub fn end_labels(&self) -> Vec<(String, String)> {
        let Some(header) = self
            .raw_dataset()
            .and_then(|d| d.source.as_ref())
            .and_then(|rows| rows.first())
            .map(|row| row.iter().map(|c| c.to_string()).collect::<Vec<_>>())
        else {
            return Vec::new();
        };

        self.series
            .iter()
            .filter_map(|series| {
                let rows = self.filtered_rows(&series.dataset_id);
                let last = rows.last()?;
                let position = |dim: &String| header.iter().position(|h| h == dim);
                let name_idx = series.encode.label.first().and_then(position)?;
                let value_idx = series.encode.label.get(1).and_then(position)?;

                let name = last[name_idx].to_string();
                let value = last[value_idx].as_f64().unwrap_or(f64::NAN);
                Some((series.name.clone(), series.end_label.formatter.format(&name, value)))
            })
            .collect()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
