//! DTOs for project endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::aug::{CriteriaAssessment, ProfilePoint, ScoringError};
use crate::domain::foundation::{ProjectId, Timestamp};
use crate::domain::project::{loose_number, loose_text, Project, ProjectDetails, ProjectMetrics};

/// Loosely typed project attributes as sent by clients.
///
/// Text fields accept strings or numbers, the year and metrics accept
/// numbers or numeric strings. Metrics may be sent flat or under
/// `metrics`; nested values win.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectInput {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(default)]
    pub architect: Option<Value>,
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub website: Option<Value>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl ProjectInput {
    pub fn name(&self) -> Option<String> {
        self.name.as_ref().and_then(loose_text)
    }

    pub fn details(&self) -> ProjectDetails {
        let text = |v: &Option<Value>| v.as_ref().and_then(loose_text);

        let flat = Value::Object(self.rest.clone());
        let mut metrics = ProjectMetrics::from_loose(&flat);
        if let Some(nested) = self.rest.get("metrics") {
            metrics.merge(ProjectMetrics::from_loose(nested));
        }

        ProjectDetails {
            location: text(&self.location),
            architect: text(&self.architect),
            year: self
                .year
                .as_ref()
                .and_then(loose_number)
                .filter(|y| (i32::MIN as f64..=i32::MAX as f64).contains(y))
                .map(|y| y.trunc() as i32),
            description: text(&self.description),
            website: text(&self.website),
            metrics,
            images: self.images.clone(),
        }
    }
}

/// Row of the project list.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    pub location: Option<String>,
    pub architect: Option<String>,
    pub year: Option<i32>,
    pub overall_score: Option<u16>,
    pub sustainability_percentage: Option<f64>,
    pub created_at: Timestamp,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: *project.id(),
            name: project.name().to_string(),
            location: project.location().map(str::to_string),
            architect: project.architect().map(str::to_string),
            year: project.year(),
            overall_score: project.analysis().map(|a| a.overall_score()),
            sustainability_percentage: project.analysis().map(|a| a.sustainability_percentage()),
            created_at: *project.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectSummary>,
    pub total: usize,
}

/// One unreadable assessment response.
#[derive(Debug, Clone, Serialize)]
pub struct InputErrorView {
    pub key: String,
    pub reason: String,
}

impl From<&ScoringError> for InputErrorView {
    fn from(err: &ScoringError) -> Self {
        match err {
            ScoringError::InvalidInput { key, reason } => Self {
                key: key.clone(),
                reason: reason.clone(),
            },
            other => Self {
                key: String::new(),
                reason: other.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponse {
    pub project_id: ProjectId,
    pub assessment: CriteriaAssessment,
    pub input_errors: Vec<InputErrorView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub project_id: ProjectId,
    pub profile: Vec<ProfilePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn input_reads_loose_fields() {
        let input: ProjectInput = serde_json::from_value(json!({
            "name": "Bosco Verticale",
            "location": "Milan",
            "year": "2014",
            "plot_area": "3,000",
            "green_space_ratio": 75
        }))
        .unwrap();

        assert_eq!(input.name().as_deref(), Some("Bosco Verticale"));
        let details = input.details();
        assert_eq!(details.location.as_deref(), Some("Milan"));
        assert_eq!(details.year, Some(2014));
        assert_eq!(details.metrics.plot_area, Some(3000.0));
        assert_eq!(details.metrics.green_space_ratio, Some(75.0));
    }

    #[test]
    fn nested_metrics_win_over_flat() {
        let input: ProjectInput = serde_json::from_value(json!({
            "name": "X",
            "floor_area": 100,
            "metrics": { "floor_area": 250 }
        }))
        .unwrap();
        assert_eq!(input.details().metrics.floor_area, Some(250.0));
    }

    #[test]
    fn blank_and_odd_values_are_dropped() {
        let input: ProjectInput = serde_json::from_value(json!({
            "name": "  ",
            "architect": "",
            "year": "unknown"
        }))
        .unwrap();
        assert!(input.name().is_none());
        let details = input.details();
        assert!(details.architect.is_none());
        assert!(details.year.is_none());
    }
}
