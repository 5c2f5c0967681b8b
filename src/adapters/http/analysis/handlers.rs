//! HTTP handlers for analysis endpoints.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use super::dto::{
    BatchAnalyzeRequest, BatchAnalyzeResponse, BatchResultView, CompareRequest,
    DetectAndAnalyzeResponse,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::projects::dto::ProjectInput;
use crate::adapters::http::projects::handlers::parse_project_id;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    AnalyzeProjectCommand, BatchAnalyzeCommand, CompareProjectsQuery, DetectAndAnalyzeCommand,
};

/// POST /api/projects/:id/analysis - Re-run the analysis of a stored project
pub async fn analyze_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let project_id = parse_project_id(&id)?;
    let result = state
        .analyze_project_handler()
        .handle(AnalyzeProjectCommand { project_id })
        .await?;
    Ok(Json(result.analysis))
}

/// POST /api/ai-analysis - Detect by name, merge request fields, analyse and store
pub async fn detect_and_analyze(
    State(state): State<AppState>,
    Json(input): Json<ProjectInput>,
) -> Result<impl IntoResponse, ApiError> {
    let name = input
        .name()
        .ok_or_else(|| ApiError::bad_request("Project name is required"))?;

    let result = state
        .detect_and_analyze_handler()
        .handle(DetectAndAnalyzeCommand {
            name,
            details: input.details(),
        })
        .await?;

    Ok(Json(DetectAndAnalyzeResponse {
        project: result.project,
        analysis: result.analysis,
        auto_detected: result.auto_detected,
    }))
}

/// POST /api/analyze/batch - Analyse several descriptions without storing them
pub async fn batch_analyze(
    State(state): State<AppState>,
    Json(request): Json<BatchAnalyzeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .batch_analyze_handler()
        .handle(BatchAnalyzeCommand {
            entries: request.entries(),
        })
        .await?;

    let results: Vec<BatchResultView> = result
        .items
        .into_iter()
        .map(|item| BatchResultView {
            name: item.name,
            analysis: item.analysis,
        })
        .collect();

    Ok(Json(BatchAnalyzeResponse {
        analyzed: results.len(),
        skipped: result.skipped,
        results,
    }))
}

/// POST /api/compare - Compare stored analyses
pub async fn compare_projects(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let project_ids = request
        .project_ids
        .iter()
        .map(|id| parse_project_id(id))
        .collect::<Result<Vec<_>, _>>()?;

    let report = state
        .compare_projects_handler()
        .handle(CompareProjectsQuery { project_ids })
        .await?;
    Ok(Json(report))
}
