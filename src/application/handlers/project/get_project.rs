//! Project queries: fetch one project or list them all.

use std::sync::Arc;

use crate::domain::foundation::ProjectId;
use crate::domain::project::{Project, ProjectError};
use crate::ports::ProjectRepository;

/// Query handler for a single project.
pub struct GetProjectHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl GetProjectHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, project_id: ProjectId) -> Result<Project, ProjectError> {
        self.repository
            .load(&project_id)
            .await?
            .ok_or(ProjectError::NotFound(project_id))
    }
}

/// Query handler listing projects, newest first.
pub struct ListProjectsHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl ListProjectsHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Vec<Project>, ProjectError> {
        Ok(self.repository.list().await?)
    }
}
