//! Project information produced by detection.

use serde::{Deserialize, Serialize};

use super::aggregate::ProjectDetails;
use super::metrics::ProjectMetrics;

/// Where detected information came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    /// Matched a known project.
    Catalog,
    /// Nothing matched; placeholder information only.
    Fallback,
}

/// Best-effort project information. Every field is untrusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedProject {
    pub name: String,
    pub location: Option<String>,
    pub architect: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub metrics: ProjectMetrics,
    #[serde(default)]
    pub images: Vec<String>,
    pub source: DetectionSource,
}

impl DetectedProject {
    /// Placeholder information for a project nobody recognised.
    pub fn fallback(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            location: Some("Location not detected".to_string()),
            architect: Some("Architect not detected".to_string()),
            year: None,
            description: Some(format!(
                "Auto-detection attempted for {}. Please provide additional information manually.",
                name.trim()
            )),
            website: None,
            metrics: ProjectMetrics::default(),
            images: Vec::new(),
            source: DetectionSource::Fallback,
        }
    }

    pub fn is_detected(&self) -> bool {
        self.source == DetectionSource::Catalog
    }

    /// Details ready to merge into a project.
    pub fn into_details(self) -> ProjectDetails {
        ProjectDetails {
            location: self.location,
            architect: self.architect,
            year: self.year,
            description: self.description,
            website: self.website,
            metrics: self.metrics,
            images: self.images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_carries_placeholder_text() {
        let detected = DetectedProject::fallback("  Harbour Flats ");
        assert_eq!(detected.name, "Harbour Flats");
        assert_eq!(detected.source, DetectionSource::Fallback);
        assert!(!detected.is_detected());
        assert_eq!(
            detected.description.as_deref(),
            Some("Auto-detection attempted for Harbour Flats. Please provide additional information manually.")
        );
    }

    #[test]
    fn source_serializes_snake_case() {
        let value = serde_json::to_value(DetectionSource::Catalog).unwrap();
        assert_eq!(value, "catalog");
    }
}
