//! HTTP handlers for project endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{
    AssessmentResponse, InputErrorView, ProfileResponse, ProjectInput, ProjectListResponse,
    ProjectSummary,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{AssessProjectCommand, CreateProjectCommand};
use crate::domain::aug::AssessmentResponses;
use crate::domain::foundation::ProjectId;

pub(crate) fn parse_project_id(raw: &str) -> Result<ProjectId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid project ID format"))
}

/// GET /api/projects - List projects, newest first
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let projects = state.list_projects_handler().handle().await?;
    let projects: Vec<ProjectSummary> = projects.iter().map(ProjectSummary::from).collect();

    Ok(Json(ProjectListResponse {
        total: projects.len(),
        projects,
    }))
}

/// POST /api/projects - Create a project
pub async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<ProjectInput>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateProjectCommand {
        name: input.name().unwrap_or_default(),
        details: input.details(),
    };
    let project = state.create_project_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/:id - Full project snapshot
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let project_id = parse_project_id(&id)?;
    let project = state.get_project_handler().handle(project_id).await?;
    Ok(Json(project))
}

/// POST /api/projects/:id/assess - Score sub-criterion responses
pub async fn assess_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(responses): Json<AssessmentResponses>,
) -> Result<impl IntoResponse, ApiError> {
    let project_id = parse_project_id(&id)?;
    let result = state
        .assess_project_handler()
        .handle(AssessProjectCommand {
            project_id,
            responses,
        })
        .await?;

    Ok(Json(AssessmentResponse {
        project_id,
        input_errors: result.input_errors.iter().map(InputErrorView::from).collect(),
        assessment: result.assessment,
    }))
}

/// GET /api/projects/:id/profile - Radar chart data
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let project_id = parse_project_id(&id)?;
    let profile = state.get_profile_handler().handle(project_id).await?;
    Ok(Json(ProfileResponse {
        project_id,
        profile,
    }))
}
