//! Scoring engine error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by the scoring engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// Raw input could not be read as a number.
    #[error("invalid input for '{key}': {reason}")]
    InvalidInput { key: String, reason: String },

    /// The fixed criteria structure or a derived budget is malformed.
    /// Indicates a defect, never an environmental failure.
    #[error("catalog inconsistency: {0}")]
    CatalogInconsistency(String),
}

impl ScoringError {
    /// Creates an invalid input error.
    pub fn invalid_input(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ScoringError::InvalidInput {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates a catalog inconsistency error.
    pub fn catalog(message: impl Into<String>) -> Self {
        ScoringError::CatalogInconsistency(message.into())
    }

    /// Returns true for defects that must abort an analysis.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScoringError::CatalogInconsistency(_))
    }
}

impl From<ScoringError> for DomainError {
    fn from(err: ScoringError) -> Self {
        match &err {
            ScoringError::InvalidInput { key, .. } => {
                DomainError::new(ErrorCode::InvalidFormat, err.to_string()).with_detail("field", key.clone())
            }
            ScoringError::CatalogInconsistency(_) => {
                DomainError::new(ErrorCode::CatalogInconsistency, err.to_string())
            }
        }
    }
}
