//! GetProfileHandler - Radar chart data for a project's criteria assessment.

use std::sync::Arc;

use crate::domain::aug::{radar_profile, CriteriaCatalog, ProfilePoint};
use crate::domain::foundation::ProjectId;
use crate::domain::project::ProjectError;
use crate::ports::ProjectRepository;

pub struct GetProfileHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl GetProfileHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    /// Eighteen points in catalog order; zeros when nothing was assessed.
    pub async fn handle(&self, project_id: ProjectId) -> Result<Vec<ProfilePoint>, ProjectError> {
        let project = self
            .repository
            .load(&project_id)
            .await?
            .ok_or(ProjectError::NotFound(project_id))?;

        Ok(radar_profile(CriteriaCatalog::aug(), project.assessment()))
    }
}
