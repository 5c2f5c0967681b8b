//! DTOs for analysis endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::projects::dto::ProjectInput;
use crate::application::handlers::BatchEntry;
use crate::domain::aug::AnalysisResult;
use crate::domain::project::Project;

#[derive(Debug, Clone, Serialize)]
pub struct DetectAndAnalyzeResponse {
    pub project: Project,
    pub analysis: AnalysisResult,
    pub auto_detected: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchAnalyzeRequest {
    #[serde(default)]
    pub projects: Vec<ProjectInput>,
}

impl BatchAnalyzeRequest {
    pub fn entries(&self) -> Vec<BatchEntry> {
        self.projects
            .iter()
            .map(|input| {
                let details = input.details();
                BatchEntry {
                    name: input.name(),
                    location: details.location,
                    architect: details.architect,
                    year: details.year,
                    description: details.description,
                    metrics: details.metrics,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResultView {
    pub name: String,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchAnalyzeResponse {
    pub results: Vec<BatchResultView>,
    pub analyzed: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub project_ids: Vec<String>,
}
