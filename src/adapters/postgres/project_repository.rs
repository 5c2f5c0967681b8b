//! PostgreSQL implementation of ProjectRepository.
//!
//! Each project is stored as one JSONB snapshot next to a few indexed
//! columns. The `projects` table is provisioned outside this crate:
//!
//! ```sql
//! CREATE TABLE projects (
//!     id            UUID PRIMARY KEY,
//!     name          TEXT NOT NULL,
//!     overall_score INTEGER,
//!     snapshot      JSONB NOT NULL,
//!     created_at    TIMESTAMPTZ NOT NULL,
//!     updated_at    TIMESTAMPTZ NOT NULL
//! );
//! ```

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId};
use crate::domain::project::Project;
use crate::ports::ProjectRepository;

/// PostgreSQL implementation of ProjectRepository.
#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn load(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        let row = sqlx::query("SELECT snapshot FROM projects WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch project: {}", e),
                )
            })?;

        row.map(row_to_project).transpose()
    }

    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, name, overall_score, snapshot, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                overall_score = EXCLUDED.overall_score,
                snapshot = EXCLUDED.snapshot,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(project.id().as_uuid())
        .bind(project.name())
        .bind(project.analysis().map(|a| a.overall_score() as i32))
        .bind(Json(project))
        .bind(project.created_at().as_datetime())
        .bind(project.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save project: {}", e),
            )
        })?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Project>, DomainError> {
        let rows = sqlx::query("SELECT snapshot FROM projects ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list projects: {}", e),
                )
            })?;

        rows.into_iter().map(row_to_project).collect()
    }
}

fn row_to_project(row: PgRow) -> Result<Project, DomainError> {
    let Json(project): Json<Project> = row.try_get("snapshot").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to decode project snapshot: {}", e),
        )
    })?;
    Ok(project)
}
