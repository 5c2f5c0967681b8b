//! Built-form metrics of a project.
//!
//! Metrics come from users and from detection, so every field is optional
//! and parsed leniently: numbers or numeric strings are kept, anything else
//! is dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    /// Plot area in square metres.
    pub plot_area: Option<f64>,
    /// Gross floor area in square metres.
    pub floor_area: Option<f64>,
    /// Building height in metres.
    pub building_height: Option<f64>,
    pub unit_count: Option<u32>,
    pub units_per_hectare: Option<f64>,
    pub floor_area_ratio: Option<f64>,
    /// Green space as a percentage of the plot.
    pub green_space_ratio: Option<f64>,
    pub densification_type: Option<String>,
}

impl ProjectMetrics {
    /// Reads metrics from a loosely typed JSON object.
    ///
    /// Non-objects yield empty metrics.
    pub fn from_loose(value: &Value) -> Self {
        let get = |key: &str| value.get(key);
        Self {
            plot_area: get("plot_area").and_then(loose_number),
            floor_area: get("floor_area").and_then(loose_number),
            building_height: get("building_height").and_then(loose_number),
            unit_count: get("unit_count")
                .and_then(loose_number)
                .filter(|n| *n >= 0.0 && *n <= u32::MAX as f64)
                .map(|n| n.trunc() as u32),
            units_per_hectare: get("units_per_hectare").and_then(loose_number),
            floor_area_ratio: get("floor_area_ratio").and_then(loose_number),
            green_space_ratio: get("green_space_ratio").and_then(loose_number),
            densification_type: get("densification_type").and_then(loose_text),
        }
    }

    /// Overwrites fields that are present in `other`.
    pub fn merge(&mut self, other: ProjectMetrics) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(
            plot_area,
            floor_area,
            building_height,
            unit_count,
            units_per_hectare,
            floor_area_ratio,
            green_space_ratio,
            densification_type
        );
    }

    pub fn is_empty(&self) -> bool {
        *self == ProjectMetrics::default()
    }
}

/// Finite number from a JSON number or numeric string.
pub fn loose_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Non-blank trimmed text.
pub fn loose_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numbers_and_numeric_strings() {
        let metrics = ProjectMetrics::from_loose(&json!({
            "plot_area": 3000,
            "floor_area": "40,000",
            "building_height": "116.5",
            "unit_count": "113",
            "floor_area_ratio": 13.3,
            "densification_type": " Vertical Densification "
        }));
        assert_eq!(metrics.plot_area, Some(3000.0));
        assert_eq!(metrics.floor_area, Some(40000.0));
        assert_eq!(metrics.building_height, Some(116.5));
        assert_eq!(metrics.unit_count, Some(113));
        assert_eq!(metrics.floor_area_ratio, Some(13.3));
        assert_eq!(metrics.densification_type.as_deref(), Some("Vertical Densification"));
    }

    #[test]
    fn drops_blank_and_garbage_values() {
        let metrics = ProjectMetrics::from_loose(&json!({
            "plot_area": "",
            "floor_area": "huge",
            "unit_count": -4,
            "green_space_ratio": true,
            "densification_type": "   "
        }));
        assert!(metrics.is_empty());
    }

    #[test]
    fn non_object_yields_empty_metrics() {
        assert!(ProjectMetrics::from_loose(&json!("nope")).is_empty());
        assert!(ProjectMetrics::from_loose(&Value::Null).is_empty());
    }

    #[test]
    fn merge_keeps_existing_values_when_absent() {
        let mut base = ProjectMetrics {
            plot_area: Some(100.0),
            unit_count: Some(5),
            ..Default::default()
        };
        base.merge(ProjectMetrics {
            unit_count: Some(10),
            building_height: Some(30.0),
            ..Default::default()
        });
        assert_eq!(base.plot_area, Some(100.0));
        assert_eq!(base.unit_count, Some(10));
        assert_eq!(base.building_height, Some(30.0));
    }
}
