//! In-Memory Project Repository
//!
//! Keeps project snapshots in a map. Used for development, tests and
//! deployments without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::project::Project;
use crate::ports::ProjectRepository;

/// In-memory storage for projects
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored projects
    pub async fn len(&self) -> usize {
        self.projects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.projects.read().await.is_empty()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn load(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        Ok(self.projects.read().await.get(id).cloned())
    }

    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        self.projects
            .write()
            .await
            .insert(*project.id(), project.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Project>, DomainError> {
        let mut projects: Vec<Project> = self.projects.read().await.values().cloned().collect();
        projects.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn project(name: &str) -> Project {
        Project::new(ProjectId::new(), name).unwrap()
    }

    #[tokio::test]
    async fn save_then_load_returns_snapshot() {
        let repo = InMemoryProjectRepository::new();
        let p = project("Harbour Flats");
        repo.save(&p).await.unwrap();

        let loaded = repo.load(p.id()).await.unwrap().unwrap();
        assert_eq!(loaded, p);
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let repo = InMemoryProjectRepository::new();
        assert!(repo.load(&ProjectId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_existing_snapshot() {
        let repo = InMemoryProjectRepository::new();
        let mut p = project("Harbour Flats");
        repo.save(&p).await.unwrap();

        p.apply_details(crate::domain::project::ProjectDetails {
            location: Some("Oslo".to_string()),
            ..Default::default()
        });
        repo.save(&p).await.unwrap();

        assert_eq!(repo.len().await, 1);
        let loaded = repo.load(p.id()).await.unwrap().unwrap();
        assert_eq!(loaded.location(), Some("Oslo"));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = InMemoryProjectRepository::new();
        let older = project("Older");
        tokio::time::sleep(Duration::from_millis(5)).await;
        let newer = project("Newer");
        repo.save(&older).await.unwrap();
        repo.save(&newer).await.unwrap();

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }
}
