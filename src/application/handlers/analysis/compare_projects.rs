//! CompareProjectsHandler - Query handler ranking stored analyses against
//! each other.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::aug::Category;
use crate::domain::foundation::ProjectId;
use crate::domain::project::AnalysisError;
use crate::ports::ProjectRepository;

/// Minimum number of analysed projects in a comparison.
pub const MIN_COMPARED: usize = 2;

#[derive(Debug, Clone)]
pub struct CompareProjectsQuery {
    pub project_ids: Vec<ProjectId>,
}

/// Scores of one compared project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectScores {
    pub project_id: ProjectId,
    pub name: String,
    pub overall_score: u16,
    pub sustainability_percentage: f64,
    pub architectural: u16,
    pub urban: u16,
    pub green: u16,
}

impl ProjectScores {
    pub fn category(&self, category: Category) -> u16 {
        match category {
            Category::Architectural => self.architectural,
            Category::Urban => self.urban,
            Category::Green => self.green,
        }
    }
}

/// Leading project of each category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryLeaders {
    pub architectural: ProjectId,
    pub urban: ProjectId,
    pub green: ProjectId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub projects: Vec<ProjectScores>,
    pub best_overall: ProjectId,
    pub category_leaders: CategoryLeaders,
}

pub struct CompareProjectsHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl CompareProjectsHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    /// Repeated ids count once. Projects without an analysis are left out.
    /// Ties go to the project listed first.
    ///
    /// # Errors
    ///
    /// - `NotFound` if any id is unknown
    /// - `ValidationFailed` if fewer than two analysed projects remain
    pub async fn handle(&self, query: CompareProjectsQuery) -> Result<ComparisonReport, AnalysisError> {
        let mut seen = HashSet::new();
        let mut projects = Vec::with_capacity(query.project_ids.len());
        for id in query.project_ids.iter().filter(|id| seen.insert(**id)) {
            let project = self
                .repository
                .load(id)
                .await
                .map_err(AnalysisError::persistence)?
                .ok_or(AnalysisError::NotFound(*id))?;

            if let Some(analysis) = project.analysis() {
                let [architectural, urban, green] = analysis.categories().scores();
                projects.push(ProjectScores {
                    project_id: *project.id(),
                    name: project.name().to_string(),
                    overall_score: analysis.overall_score(),
                    sustainability_percentage: analysis.sustainability_percentage(),
                    architectural: architectural.value(),
                    urban: urban.value(),
                    green: green.value(),
                });
            }
        }

        if projects.len() < MIN_COMPARED {
            return Err(AnalysisError::validation(
                "project_ids",
                format!(
                    "At least {} analysed projects are required for comparison",
                    MIN_COMPARED
                ),
            ));
        }

        let best_overall = leader(&projects, |p| p.overall_score);
        let category_leaders = CategoryLeaders {
            architectural: leader(&projects, |p| p.category(Category::Architectural)),
            urban: leader(&projects, |p| p.category(Category::Urban)),
            green: leader(&projects, |p| p.category(Category::Green)),
        };

        Ok(ComparisonReport {
            projects,
            best_overall,
            category_leaders,
        })
    }
}

/// First project with the highest key. `projects` is never empty here.
fn leader(projects: &[ProjectScores], key: impl Fn(&ProjectScores) -> u16) -> ProjectId {
    let mut best = &projects[0];
    for candidate in &projects[1..] {
        if key(candidate) > key(best) {
            best = candidate;
        }
    }
    best.project_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProjectRepository;
    use crate::domain::aug::{
        AnalysisResult, AnalysisSource, CategoryBreakdown, CategoryBreakdowns, CriteriaCatalog,
        CriterionEntry, CriterionScore,
    };
    use crate::domain::project::Project;

    fn breakdown(category: Category, score: u8) -> CategoryBreakdown {
        let entries = CriteriaCatalog::aug()
            .for_category(category)
            .into_iter()
            .map(|c| CriterionEntry {
                name: c.name.to_string(),
                score: CriterionScore::try_new(score).unwrap(),
                analysis: String::new(),
            })
            .collect();
        CategoryBreakdown::from_entries(entries).unwrap()
    }

    async fn analysed(repo: &InMemoryProjectRepository, name: &str, scores: [u8; 3]) -> ProjectId {
        let mut project = Project::new(ProjectId::new(), name).unwrap();
        project.record_analysis(AnalysisResult::new(
            CategoryBreakdowns {
                architectural: breakdown(Category::Architectural, scores[0]),
                urban: breakdown(Category::Urban, scores[1]),
                green: breakdown(Category::Green, scores[2]),
            },
            vec![],
            vec![],
            AnalysisSource::Synthesized,
            None,
        ));
        repo.save(&project).await.unwrap();
        *project.id()
    }

    #[tokio::test]
    async fn picks_best_overall_and_category_leaders() {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let a = analysed(&repo, "A", [18, 10, 10]).await;
        let b = analysed(&repo, "B", [10, 15, 15]).await;

        let report = CompareProjectsHandler::new(repo)
            .handle(CompareProjectsQuery {
                project_ids: vec![a, b],
            })
            .await
            .unwrap();

        assert_eq!(report.best_overall, b);
        assert_eq!(report.category_leaders.architectural, a);
        assert_eq!(report.category_leaders.urban, b);
        assert_eq!(report.category_leaders.green, b);
        assert_eq!(report.projects[0].architectural, 108);
    }

    #[tokio::test]
    async fn ties_go_to_first_listed() {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let a = analysed(&repo, "A", [12, 12, 12]).await;
        let b = analysed(&repo, "B", [12, 12, 12]).await;

        let report = CompareProjectsHandler::new(repo)
            .handle(CompareProjectsQuery {
                project_ids: vec![b, a],
            })
            .await
            .unwrap();
        assert_eq!(report.best_overall, b);
    }

    #[tokio::test]
    async fn fewer_than_two_analysed_projects_is_rejected() {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let a = analysed(&repo, "A", [12, 12, 12]).await;
        let bare = Project::new(ProjectId::new(), "Bare").unwrap();
        repo.save(&bare).await.unwrap();

        let err = CompareProjectsHandler::new(repo)
            .handle(CompareProjectsQuery {
                project_ids: vec![a, *bare.id()],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let a = analysed(&repo, "A", [12, 12, 12]).await;
        let missing = ProjectId::new();

        let err = CompareProjectsHandler::new(repo)
            .handle(CompareProjectsQuery {
                project_ids: vec![a, missing],
            })
            .await
            .unwrap_err();
        assert_eq!(err, AnalysisError::NotFound(missing));
    }

    #[tokio::test]
    async fn repeated_id_counts_once() {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let a = analysed(&repo, "A", [12, 12, 12]).await;

        let err = CompareProjectsHandler::new(repo)
            .handle(CompareProjectsQuery {
                project_ids: vec![a, a],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn duplicates_keep_first_seen_order() {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let a = analysed(&repo, "A", [12, 12, 12]).await;
        let b = analysed(&repo, "B", [12, 12, 12]).await;

        let report = CompareProjectsHandler::new(repo)
            .handle(CompareProjectsQuery {
                project_ids: vec![b, a, b],
            })
            .await
            .unwrap();
        let ids: Vec<ProjectId> = report.projects.iter().map(|p| p.project_id).collect();
        assert_eq!(ids, vec![b, a]);
        assert_eq!(report.best_overall, b);
    }
}
