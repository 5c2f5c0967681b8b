//! AssessProjectHandler - Scores sub-criterion responses and stores the
//! assessment on the project.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::aug::{AssessmentResponses, CriteriaAssessment, CriteriaAssessor, CriteriaCatalog, ScoringError};
use crate::domain::foundation::ProjectId;
use crate::domain::project::{Project, ProjectError};
use crate::ports::ProjectRepository;

#[derive(Debug, Clone)]
pub struct AssessProjectCommand {
    pub project_id: ProjectId,
    pub responses: AssessmentResponses,
}

#[derive(Debug, Clone)]
pub struct AssessProjectResult {
    pub project: Project,
    pub assessment: CriteriaAssessment,
    /// Responses that could not be read; each scored 0.
    pub input_errors: Vec<ScoringError>,
}

pub struct AssessProjectHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl AssessProjectHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: AssessProjectCommand) -> Result<AssessProjectResult, ProjectError> {
        let mut project = self
            .repository
            .load(&cmd.project_id)
            .await?
            .ok_or(ProjectError::NotFound(cmd.project_id))?;

        let outcome = CriteriaAssessor::new(CriteriaCatalog::aug()).assess(&cmd.responses)?;
        if !outcome.input_errors.is_empty() {
            debug!(
                project_id = %cmd.project_id,
                count = outcome.input_errors.len(),
                "Unreadable assessment inputs scored as zero"
            );
        }

        project.record_assessment(outcome.assessment.clone());
        self.repository.save(&project).await?;

        info!(
            project_id = %cmd.project_id,
            overall_score = outcome.assessment.overall.total,
            "Criteria assessment stored"
        );

        Ok(AssessProjectResult {
            project,
            assessment: outcome.assessment,
            input_errors: outcome.input_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProjectRepository;
    use serde_json::json;

    fn responses(value: serde_json::Value) -> AssessmentResponses {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn scores_responses_and_stores_assessment() {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let project = Project::new(ProjectId::new(), "Harbour Flats").unwrap();
        repo.save(&project).await.unwrap();

        let result = AssessProjectHandler::new(repo.clone())
            .handle(AssessProjectCommand {
                project_id: *project.id(),
                responses: responses(json!({
                    "architectural": {
                        "compactness_site_coverage_ratio": 7,
                        "compactness_floor_area_ratio": "4",
                        "compactness_building_footprint_efficiency": -3
                    }
                })),
            })
            .await
            .unwrap();

        let compactness = &result.assessment.categories[0].criteria[0];
        assert_eq!(compactness.key, "compactness");
        assert_eq!(compactness.total.value(), 9);
        assert!(result.input_errors.is_empty());

        let stored = repo.load(project.id()).await.unwrap().unwrap();
        assert_eq!(stored.assessment(), Some(&result.assessment));
    }

    #[tokio::test]
    async fn unreadable_inputs_are_reported_not_fatal() {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let project = Project::new(ProjectId::new(), "Harbour Flats").unwrap();
        repo.save(&project).await.unwrap();

        let result = AssessProjectHandler::new(repo)
            .handle(AssessProjectCommand {
                project_id: *project.id(),
                responses: responses(json!({
                    "green": { "energy_efficiency_renewable_energy_integration": "lots" }
                })),
            })
            .await
            .unwrap();

        assert_eq!(result.input_errors.len(), 1);
        assert_eq!(result.assessment.overall.total, 0);
    }

    #[tokio::test]
    async fn missing_project_is_not_found() {
        let id = ProjectId::new();
        let err = AssessProjectHandler::new(Arc::new(InMemoryProjectRepository::new()))
            .handle(AssessProjectCommand {
                project_id: id,
                responses: AssessmentResponses::default(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, ProjectError::NotFound(id));
    }
}
