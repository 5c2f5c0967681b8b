//! Health check and criteria catalog endpoints.

use axum::extract::Json;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::domain::aug::{sub_criterion_label, Category, CriteriaCatalog, Criterion};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Serialize)]
pub struct SubCriterionView {
    pub key: &'static str,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct CriterionView {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub sub_criteria: Vec<SubCriterionView>,
}

impl From<&Criterion> for CriterionView {
    fn from(criterion: &Criterion) -> Self {
        Self {
            key: criterion.key,
            name: criterion.name,
            description: criterion.description,
            sub_criteria: criterion
                .sub_criteria
                .iter()
                .map(|key| SubCriterionView {
                    key: *key,
                    label: sub_criterion_label(key),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub category: Category,
    pub label: &'static str,
    pub criteria: Vec<CriterionView>,
}

#[derive(Debug, Serialize)]
pub struct CriteriaResponse {
    pub categories: Vec<CategoryView>,
}

/// GET /api/criteria - Catalog definitions in framework order
pub async fn list_criteria() -> impl IntoResponse {
    let catalog = CriteriaCatalog::aug();
    Json(CriteriaResponse {
        categories: Category::ALL
            .iter()
            .map(|category| CategoryView {
                category: *category,
                label: category.label(),
                criteria: catalog
                    .for_category(*category)
                    .into_iter()
                    .map(CriterionView::from)
                    .collect(),
            })
            .collect(),
    })
}
