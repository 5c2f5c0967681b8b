//! HTTP adapters - REST API implementations.
//!
//! Each area has its own router; `api_router` mounts them all on one
//! shared `AppState`.

pub mod analysis;
pub mod error;
pub mod projects;
pub mod state;
pub mod system;

use axum::routing::get;
use axum::Router;

pub use analysis::analysis_router;
pub use error::{ApiError, ErrorResponse};
pub use projects::projects_router;
pub use state::AppState;

/// Full API router with state applied.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/api/criteria", get(system::list_criteria))
        .merge(projects_router())
        .merge(analysis_router())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::UnavailableSynthesizer;
    use crate::adapters::detection::CatalogProjectDetector;
    use crate::adapters::memory::InMemoryProjectRepository;
    use crate::application::{AnalysisOrchestrator, OrchestratorSettings};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        api_router(AppState::new(
            Arc::new(InMemoryProjectRepository::new()),
            Arc::new(CatalogProjectDetector::new()),
            Arc::new(AnalysisOrchestrator::new(
                Arc::new(UnavailableSynthesizer),
                OrchestratorSettings::default(),
            )),
        ))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn criteria_lists_three_categories_of_six() {
        let (status, body) = get_json(app(), "/api/criteria").await;
        assert_eq!(status, StatusCode::OK);
        let categories = body["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0]["category"], "architectural");
        for category in categories {
            assert_eq!(category["criteria"].as_array().unwrap().len(), 6);
        }
        assert_eq!(
            categories[0]["criteria"][0]["sub_criteria"].as_array().unwrap().len(),
            4
        );
    }

    #[tokio::test]
    async fn malformed_project_id_is_bad_request() {
        let (status, body) = get_json(app(), "/api/projects/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }
}
