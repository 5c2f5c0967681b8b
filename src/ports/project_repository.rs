//! Project repository port.
//!
//! Projects are persisted as whole snapshots: `save` inserts or replaces
//! everything, including the current analysis and assessment.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::project::Project;

/// Repository port for Project aggregate persistence.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Find a project by its ID.
    ///
    /// Returns `None` if not found.
    async fn load(&self, id: &ProjectId) -> Result<Option<Project>, DomainError>;

    /// Insert or replace a project snapshot.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, project: &Project) -> Result<(), DomainError>;

    /// All projects, most recently created first.
    async fn list(&self) -> Result<Vec<Project>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ProjectRepository) {}
    }
}
