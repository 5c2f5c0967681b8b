//! Project and analysis error types.

use crate::domain::aug::ScoringError;
use crate::domain::foundation::{DomainError, ErrorCode, ProjectId};

/// Errors from project commands and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    /// Project was not found.
    NotFound(ProjectId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Repository failure.
    Persistence(String),
    /// Scoring engine defect.
    Internal(String),
}

impl ProjectError {
    pub fn not_found(id: ProjectId) -> Self {
        ProjectError::NotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProjectError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn persistence(message: impl Into<String>) -> Self {
        ProjectError::Persistence(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ProjectError::NotFound(_) => ErrorCode::ProjectNotFound,
            ProjectError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ProjectError::Persistence(_) => ErrorCode::DatabaseError,
            ProjectError::Internal(_) => ErrorCode::InternalError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ProjectError::NotFound(id) => format!("Project not found: {}", id),
            ProjectError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ProjectError::Persistence(msg) => format!("Persistence error: {}", msg),
            ProjectError::Internal(msg) => format!("Internal error: {}", msg),
        }
    }
}

impl std::fmt::Display for ProjectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ProjectError {}

impl From<DomainError> for ProjectError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ProjectError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::CatalogInconsistency | ErrorCode::InternalError => {
                ProjectError::Internal(err.message)
            }
            _ => ProjectError::Persistence(err.to_string()),
        }
    }
}

impl From<ScoringError> for ProjectError {
    fn from(err: ScoringError) -> Self {
        ProjectError::Internal(err.to_string())
    }
}

/// Errors from running an analysis.
///
/// Synthesis failures never appear here: they are recovered by fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Project was not found.
    NotFound(ProjectId),
    /// Request was invalid.
    ValidationFailed { field: String, message: String },
    /// Loading or saving failed.
    Persistence(String),
    /// Project detection failed.
    Detection(String),
    /// Fallback computation broke; a defect rather than an environmental
    /// failure.
    Internal(String),
}

impl AnalysisError {
    pub fn not_found(id: ProjectId) -> Self {
        AnalysisError::NotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AnalysisError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn persistence(err: DomainError) -> Self {
        AnalysisError::Persistence(err.to_string())
    }
    pub fn detection(err: DomainError) -> Self {
        AnalysisError::Detection(err.to_string())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::NotFound(_) => ErrorCode::ProjectNotFound,
            AnalysisError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AnalysisError::Persistence(_) => ErrorCode::DatabaseError,
            AnalysisError::Detection(_) => ErrorCode::DetectionFailed,
            AnalysisError::Internal(_) => ErrorCode::CatalogInconsistency,
        }
    }
    pub fn message(&self) -> String {
        match self {
            AnalysisError::NotFound(id) => format!("Project not found: {}", id),
            AnalysisError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AnalysisError::Persistence(msg) => format!("Persistence error: {}", msg),
            AnalysisError::Detection(msg) => format!("Detection error: {}", msg),
            AnalysisError::Internal(msg) => format!("Analysis failed: {}", msg),
        }
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AnalysisError {}

impl From<ScoringError> for AnalysisError {
    fn from(err: ScoringError) -> Self {
        AnalysisError::Internal(err.to_string())
    }
}

impl From<ProjectError> for AnalysisError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(id) => AnalysisError::NotFound(id),
            ProjectError::ValidationFailed { field, message } => {
                AnalysisError::ValidationFailed { field, message }
            }
            ProjectError::Persistence(msg) => AnalysisError::Persistence(msg),
            ProjectError::Internal(msg) => AnalysisError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_project_not_found() {
        let id = ProjectId::new();
        let err = ProjectError::not_found(id);
        assert_eq!(err.code(), ErrorCode::ProjectNotFound);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn domain_validation_error_keeps_field() {
        let err: ProjectError = DomainError::validation("name", "blank").into();
        assert_eq!(err, ProjectError::validation("name", "blank"));
    }

    #[test]
    fn domain_database_error_is_persistence() {
        let err: ProjectError = DomainError::database("connection reset").into();
        assert!(matches!(err, ProjectError::Persistence(_)));
    }

    #[test]
    fn scoring_error_is_internal_analysis_error() {
        let err: AnalysisError = ScoringError::catalog("wrong count").into();
        assert_eq!(err.code(), ErrorCode::CatalogInconsistency);
    }

    #[test]
    fn detection_error_is_distinct_from_persistence() {
        let err = AnalysisError::detection(DomainError::new(ErrorCode::DetectionFailed, "lookup down"));
        assert_eq!(err.code(), ErrorCode::DetectionFailed);
        let err = AnalysisError::persistence(DomainError::database("down"));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
