//! CreateProjectHandler - Command handler for creating projects.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::ProjectId;
use crate::domain::project::{Project, ProjectDetails, ProjectError};
use crate::ports::ProjectRepository;

/// Command to create a new project.
#[derive(Debug, Clone)]
pub struct CreateProjectCommand {
    pub name: String,
    pub details: ProjectDetails,
}

/// Handler for creating projects.
pub struct CreateProjectHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl CreateProjectHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateProjectCommand) -> Result<Project, ProjectError> {
        let mut project = Project::new(ProjectId::new(), cmd.name)?;
        project.apply_details(cmd.details);

        self.repository.save(&project).await?;

        info!(project_id = %project.id(), name = %project.name(), "Project created");
        Ok(project)
    }
}
