//! Route configuration for analysis endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{analyze_project, batch_analyze, compare_projects, detect_and_analyze};
use crate::adapters::http::state::AppState;

/// Creates the analysis router.
///
/// Routes:
/// - `POST /api/projects/:id/analysis` - Analyse a stored project
/// - `POST /api/ai-analysis` - Detect, analyse and store a project by name
/// - `POST /api/analyze/batch` - Batch analysis without persistence
/// - `POST /api/compare` - Compare analysed projects
pub fn analysis_router() -> Router<AppState> {
    Router::new()
        .route("/api/projects/:id/analysis", post(analyze_project))
        .route("/api/ai-analysis", post(detect_and_analyze))
        .route("/api/analyze/batch", post(batch_analyze))
        .route("/api/compare", post(compare_projects))
}
