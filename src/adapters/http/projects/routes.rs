//! Route configuration for project endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{assess_project, create_project, get_profile, get_project, list_projects};
use crate::adapters::http::state::AppState;

/// Creates the project router.
///
/// Routes:
/// - `GET  /api/projects` - List projects
/// - `POST /api/projects` - Create a project
/// - `GET  /api/projects/:id` - Get a project
/// - `POST /api/projects/:id/assess` - Criteria assessment
/// - `GET  /api/projects/:id/profile` - Radar profile
pub fn projects_router() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/:id", get(get_project))
        .route("/api/projects/:id/assess", post(assess_project))
        .route("/api/projects/:id/profile", get(get_profile))
}
