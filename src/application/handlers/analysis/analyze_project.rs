//! AnalyzeProjectHandler - Command handler for re-running the analysis of a
//! stored project.

use std::sync::Arc;

use tracing::info;

use super::orchestrator::AnalysisOrchestrator;
use crate::domain::aug::AnalysisResult;
use crate::domain::foundation::ProjectId;
use crate::domain::project::{AnalysisError, Project};
use crate::ports::{ProjectRepository, SynthesisRequest};

/// Command to analyse a stored project.
#[derive(Debug, Clone)]
pub struct AnalyzeProjectCommand {
    pub project_id: ProjectId,
}

/// Result of a successful analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeProjectResult {
    pub project: Project,
    pub analysis: AnalysisResult,
}

/// Handler for analysing stored projects.
pub struct AnalyzeProjectHandler {
    repository: Arc<dyn ProjectRepository>,
    orchestrator: Arc<AnalysisOrchestrator>,
}

impl AnalyzeProjectHandler {
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        orchestrator: Arc<AnalysisOrchestrator>,
    ) -> Self {
        Self {
            repository,
            orchestrator,
        }
    }

    pub async fn handle(
        &self,
        cmd: AnalyzeProjectCommand,
    ) -> Result<AnalyzeProjectResult, AnalysisError> {
        // 1. Load project
        let mut project = self
            .repository
            .load(&cmd.project_id)
            .await
            .map_err(AnalysisError::persistence)?
            .ok_or(AnalysisError::NotFound(cmd.project_id))?;

        // 2. Run the analysis
        let analysis = self
            .orchestrator
            .analyze(&SynthesisRequest::from_project(&project))
            .await?;

        // 3. Replace the stored analysis
        project.record_analysis(analysis.clone());
        self.repository
            .save(&project)
            .await
            .map_err(AnalysisError::persistence)?;

        info!(project_id = %cmd.project_id, "Project analysis stored");

        Ok(AnalyzeProjectResult { project, analysis })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::UnavailableSynthesizer;
    use crate::adapters::memory::InMemoryProjectRepository;
    use crate::application::handlers::analysis::OrchestratorSettings;
    use crate::domain::aug::AnalysisSource;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use async_trait::async_trait;

    struct FailingSaveRepository {
        inner: InMemoryProjectRepository,
    }

    #[async_trait]
    impl ProjectRepository for FailingSaveRepository {
        async fn load(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
            self.inner.load(id).await
        }

        async fn save(&self, _project: &Project) -> Result<(), DomainError> {
            Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated save failure",
            ))
        }

        async fn list(&self) -> Result<Vec<Project>, DomainError> {
            self.inner.list().await
        }
    }

    fn orchestrator() -> Arc<AnalysisOrchestrator> {
        Arc::new(AnalysisOrchestrator::new(
            Arc::new(UnavailableSynthesizer),
            OrchestratorSettings::default(),
        ))
    }

    #[tokio::test]
    async fn stores_fallback_analysis_on_project() {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let project = Project::new(ProjectId::new(), "Harbour Flats").unwrap();
        repo.save(&project).await.unwrap();

        let handler = AnalyzeProjectHandler::new(repo.clone(), orchestrator());
        let result = handler
            .handle(AnalyzeProjectCommand {
                project_id: *project.id(),
            })
            .await
            .unwrap();

        assert_eq!(result.analysis.source(), AnalysisSource::Fallback);
        let stored = repo.load(project.id()).await.unwrap().unwrap();
        assert_eq!(stored.analysis(), Some(&result.analysis));
    }

    #[tokio::test]
    async fn unknown_project_is_not_found() {
        let handler =
            AnalyzeProjectHandler::new(Arc::new(InMemoryProjectRepository::new()), orchestrator());
        let id = ProjectId::new();

        let err = handler
            .handle(AnalyzeProjectCommand { project_id: id })
            .await
            .unwrap_err();
        assert_eq!(err, AnalysisError::NotFound(id));
    }

    #[tokio::test]
    async fn save_failure_is_persistence_error() {
        let inner = InMemoryProjectRepository::new();
        let project = Project::new(ProjectId::new(), "Harbour Flats").unwrap();
        inner.save(&project).await.unwrap();

        let handler =
            AnalyzeProjectHandler::new(Arc::new(FailingSaveRepository { inner }), orchestrator());
        let err = handler
            .handle(AnalyzeProjectCommand {
                project_id: *project.id(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Persistence(_)));
    }
}
