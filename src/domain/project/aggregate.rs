//! Project aggregate.
//!
//! A project is a stored architectural scheme. It carries at most one
//! current analysis and at most one criteria assessment; recording a new
//! one replaces the previous value wholesale.

use serde::{Deserialize, Serialize};

use super::metrics::ProjectMetrics;
use crate::domain::aug::{AnalysisResult, CriteriaAssessment};
use crate::domain::foundation::{DomainError, ProjectId, Timestamp};

/// Maximum length for a project name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Optional descriptive attributes. Present fields overwrite, absent ones
/// leave the project untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub location: Option<String>,
    pub architect: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub metrics: ProjectMetrics,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Project aggregate.
///
/// # Invariants
///
/// - `name` is 1-200 characters after trimming
/// - `analysis`, when present, satisfies every score invariant (enforced by
///   `AnalysisResult` itself)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    location: Option<String>,
    architect: Option<String>,
    year: Option<i32>,
    description: Option<String>,
    website: Option<String>,
    #[serde(default)]
    metrics: ProjectMetrics,
    #[serde(default)]
    images: Vec<String>,
    analysis: Option<AnalysisResult>,
    assessment: Option<CriteriaAssessment>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Project {
    /// Creates a project with only a name.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is blank or too long
    pub fn new(id: ProjectId, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = Self::validate_name(name.into())?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            name,
            location: None,
            architect: None,
            year: None,
            description: None,
            website: None,
            metrics: ProjectMetrics::default(),
            images: Vec::new(),
            analysis: None,
            assessment: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn validate_name(name: String) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("name", "Project name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(
                "name",
                format!("Project name cannot exceed {} characters", MAX_NAME_LENGTH),
            ));
        }
        Ok(trimmed.to_string())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn architect(&self) -> Option<&str> {
        self.architect.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn metrics(&self) -> &ProjectMetrics {
        &self.metrics
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn assessment(&self) -> Option<&CriteriaAssessment> {
        self.assessment.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Overwrites attributes present in `details`. Blank strings are ignored.
    pub fn apply_details(&mut self, details: ProjectDetails) {
        fn keep(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        if let Some(v) = keep(details.location) {
            self.location = Some(v);
        }
        if let Some(v) = keep(details.architect) {
            self.architect = Some(v);
        }
        if details.year.is_some() {
            self.year = details.year;
        }
        if let Some(v) = keep(details.description) {
            self.description = Some(v);
        }
        if let Some(v) = keep(details.website) {
            self.website = Some(v);
        }
        self.metrics.merge(details.metrics);
        if !details.images.is_empty() {
            self.images = details.images;
        }
        self.touch();
    }

    /// Replaces the current analysis.
    pub fn record_analysis(&mut self, analysis: AnalysisResult) {
        self.analysis = Some(analysis);
        self.touch();
    }

    /// Replaces the current criteria assessment.
    pub fn record_assessment(&mut self, assessment: CriteriaAssessment) {
        self.assessment = Some(assessment);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
