//! Analysis handlers.
//!
//! The orchestrator turns project data into a finalized `AnalysisResult`;
//! the handlers around it load, enrich and persist projects.

mod analyze_project;
mod batch_analyze;
mod compare_projects;
mod detect_and_analyze;
mod orchestrator;

pub use analyze_project::{AnalyzeProjectCommand, AnalyzeProjectHandler, AnalyzeProjectResult};
pub use batch_analyze::{
    BatchAnalyzeCommand, BatchAnalyzeHandler, BatchAnalyzeResult, BatchEntry, BatchItem,
};
pub use compare_projects::{
    CategoryLeaders, CompareProjectsHandler, CompareProjectsQuery, ComparisonReport,
    ProjectScores, MIN_COMPARED,
};
pub use detect_and_analyze::{
    DetectAndAnalyzeCommand, DetectAndAnalyzeHandler, DetectAndAnalyzeResult,
};
pub use orchestrator::{AnalysisOrchestrator, OrchestratorSettings};
