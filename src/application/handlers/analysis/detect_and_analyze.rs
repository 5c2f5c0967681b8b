//! DetectAndAnalyzeHandler - Creates a project from a name, enriches it with
//! detected information and analyses it in one step.

use std::sync::Arc;

use tracing::info;

use super::orchestrator::AnalysisOrchestrator;
use crate::domain::aug::AnalysisResult;
use crate::domain::foundation::ProjectId;
use crate::domain::project::{AnalysisError, Project, ProjectDetails, ProjectError};
use crate::ports::{ProjectDetector, ProjectRepository, SynthesisRequest};

/// Command to detect, analyse and store a project.
#[derive(Debug, Clone)]
pub struct DetectAndAnalyzeCommand {
    pub name: String,
    /// Caller-supplied attributes. These win over detected ones.
    pub details: ProjectDetails,
}

#[derive(Debug, Clone)]
pub struct DetectAndAnalyzeResult {
    pub project: Project,
    pub analysis: AnalysisResult,
    /// Whether the detector recognised the project.
    pub auto_detected: bool,
}

pub struct DetectAndAnalyzeHandler {
    repository: Arc<dyn ProjectRepository>,
    detector: Arc<dyn ProjectDetector>,
    orchestrator: Arc<AnalysisOrchestrator>,
}

impl DetectAndAnalyzeHandler {
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        detector: Arc<dyn ProjectDetector>,
        orchestrator: Arc<AnalysisOrchestrator>,
    ) -> Self {
        Self {
            repository,
            detector,
            orchestrator,
        }
    }

    pub async fn handle(
        &self,
        cmd: DetectAndAnalyzeCommand,
    ) -> Result<DetectAndAnalyzeResult, AnalysisError> {
        let mut project =
            Project::new(ProjectId::new(), cmd.name.as_str()).map_err(ProjectError::from)?;

        let detected = self
            .detector
            .detect(project.name())
            .await
            .map_err(AnalysisError::detection)?;
        let auto_detected = detected.is_detected();

        project.apply_details(detected.into_details());
        project.apply_details(cmd.details);

        let analysis = self
            .orchestrator
            .analyze(&SynthesisRequest::from_project(&project))
            .await?;
        project.record_analysis(analysis.clone());

        self.repository
            .save(&project)
            .await
            .map_err(AnalysisError::persistence)?;

        info!(
            project_id = %project.id(),
            auto_detected,
            "Detected project analysed and stored"
        );

        Ok(DetectAndAnalyzeResult {
            project,
            analysis,
            auto_detected,
        })
    }
}
