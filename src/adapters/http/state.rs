//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use crate::application::handlers::{
    AnalysisOrchestrator, AnalyzeProjectHandler, AssessProjectHandler, BatchAnalyzeHandler,
    CompareProjectsHandler, CreateProjectHandler, DetectAndAnalyzeHandler, GetProfileHandler,
    GetProjectHandler, ListProjectsHandler,
};
use crate::ports::{ProjectDetector, ProjectRepository};

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct AppState {
    pub project_repository: Arc<dyn ProjectRepository>,
    pub project_detector: Arc<dyn ProjectDetector>,
    pub orchestrator: Arc<AnalysisOrchestrator>,
}

impl AppState {
    pub fn new(
        project_repository: Arc<dyn ProjectRepository>,
        project_detector: Arc<dyn ProjectDetector>,
        orchestrator: Arc<AnalysisOrchestrator>,
    ) -> Self {
        Self {
            project_repository,
            project_detector,
            orchestrator,
        }
    }

    pub fn create_project_handler(&self) -> CreateProjectHandler {
        CreateProjectHandler::new(self.project_repository.clone())
    }

    pub fn get_project_handler(&self) -> GetProjectHandler {
        GetProjectHandler::new(self.project_repository.clone())
    }

    pub fn list_projects_handler(&self) -> ListProjectsHandler {
        ListProjectsHandler::new(self.project_repository.clone())
    }

    pub fn assess_project_handler(&self) -> AssessProjectHandler {
        AssessProjectHandler::new(self.project_repository.clone())
    }

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.project_repository.clone())
    }

    pub fn analyze_project_handler(&self) -> AnalyzeProjectHandler {
        AnalyzeProjectHandler::new(self.project_repository.clone(), self.orchestrator.clone())
    }

    pub fn detect_and_analyze_handler(&self) -> DetectAndAnalyzeHandler {
        DetectAndAnalyzeHandler::new(
            self.project_repository.clone(),
            self.project_detector.clone(),
            self.orchestrator.clone(),
        )
    }

    pub fn batch_analyze_handler(&self) -> BatchAnalyzeHandler {
        BatchAnalyzeHandler::new(self.orchestrator.clone())
    }

    pub fn compare_projects_handler(&self) -> CompareProjectsHandler {
        CompareProjectsHandler::new(self.project_repository.clone())
    }
}
