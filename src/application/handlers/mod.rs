//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod analysis;
pub mod project;

pub use analysis::{
    AnalysisOrchestrator, AnalyzeProjectCommand, AnalyzeProjectHandler, AnalyzeProjectResult,
    BatchAnalyzeCommand, BatchAnalyzeHandler, BatchAnalyzeResult, BatchEntry, BatchItem,
    CompareProjectsHandler, CompareProjectsQuery, ComparisonReport, DetectAndAnalyzeCommand,
    DetectAndAnalyzeHandler, DetectAndAnalyzeResult, OrchestratorSettings,
};
pub use project::{
    AssessProjectCommand, AssessProjectHandler, AssessProjectResult, CreateProjectCommand,
    CreateProjectHandler, GetProfileHandler, GetProjectHandler, ListProjectsHandler,
};
