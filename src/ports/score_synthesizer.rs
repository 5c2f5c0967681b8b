//! Score synthesizer port.
//!
//! A synthesizer produces a full criterion breakdown for a project, usually
//! by asking a language model. Implementations only ever hand back a
//! validated structure: three categories of six criteria with scores in
//! [0, 20]. Anything else is a `SynthesisError`, which callers recover
//! from with the fallback allocator.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::AIError;
use crate::domain::aug::{CategoryBreakdowns, Recommendation};
use crate::domain::foundation::ProjectId;
use crate::domain::project::{Project, ProjectMetrics};

/// Port for producing synthesized criterion scores.
#[async_trait]
pub trait ScoreSynthesizer: Send + Sync {
    /// Synthesize a validated breakdown for a project.
    ///
    /// # Errors
    ///
    /// Any failure (provider error, malformed payload, not configured)
    /// is a `SynthesisError`. Callers never propagate it.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAnalysis, SynthesisError>;
}

/// Project data handed to the synthesizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SynthesisRequest {
    pub project_id: Option<ProjectId>,
    pub name: String,
    pub location: Option<String>,
    pub architect: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub metrics: ProjectMetrics,
}

impl SynthesisRequest {
    pub fn from_project(project: &Project) -> Self {
        Self {
            project_id: Some(*project.id()),
            name: project.name().to_string(),
            location: project.location().map(str::to_string),
            architect: project.architect().map(str::to_string),
            year: project.year(),
            description: project.description().map(str::to_string),
            metrics: project.metrics().clone(),
        }
    }

    /// Text scanned for fallback keyword boosts: name followed directly by
    /// the description.
    pub fn keyword_text(&self) -> String {
        format!("{}{}", self.name, self.description.as_deref().unwrap_or(""))
    }
}

/// A validated breakdown from the synthesizer.
///
/// Category totals inside `categories` are always the sums of their
/// criterion scores.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedAnalysis {
    pub categories: CategoryBreakdowns,
    pub recommendations: Vec<Recommendation>,
    pub insights: Vec<String>,
}

/// Why synthesis did not produce a breakdown.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// No synthesizer is configured.
    #[error("synthesis unavailable: {0}")]
    Unavailable(String),

    /// The model provider failed.
    #[error("provider error: {0}")]
    Provider(#[from] AIError),

    /// The model answered but the payload did not validate.
    #[error("malformed synthesis payload: {0}")]
    Malformed(String),

    /// The call did not finish within the configured bound.
    #[error("synthesis timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl SynthesisError {
    pub fn malformed(message: impl Into<String>) -> Self {
        SynthesisError::Malformed(message.into())
    }
}
