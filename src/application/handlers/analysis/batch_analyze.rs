//! BatchAnalyzeHandler - Analyses several unsaved project descriptions
//! concurrently.

use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use super::orchestrator::AnalysisOrchestrator;
use crate::domain::aug::AnalysisResult;
use crate::domain::project::{AnalysisError, ProjectMetrics};
use crate::ports::SynthesisRequest;

/// One project description in a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchEntry {
    pub name: Option<String>,
    pub location: Option<String>,
    pub architect: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub metrics: ProjectMetrics,
}

impl BatchEntry {
    /// Entries without a usable name are skipped.
    fn to_request(&self) -> Option<SynthesisRequest> {
        let name = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
        Some(SynthesisRequest {
            project_id: None,
            name: name.to_string(),
            location: self.location.clone(),
            architect: self.architect.clone(),
            year: self.year,
            description: self.description.clone(),
            metrics: self.metrics.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct BatchAnalyzeCommand {
    pub entries: Vec<BatchEntry>,
}

#[derive(Debug, Clone)]
pub struct BatchItem {
    pub name: String,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Clone)]
pub struct BatchAnalyzeResult {
    pub items: Vec<BatchItem>,
    pub skipped: usize,
}

pub struct BatchAnalyzeHandler {
    orchestrator: Arc<AnalysisOrchestrator>,
}

impl BatchAnalyzeHandler {
    pub fn new(orchestrator: Arc<AnalysisOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Results keep the order of the named entries.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the batch has no entries at all
    pub async fn handle(&self, cmd: BatchAnalyzeCommand) -> Result<BatchAnalyzeResult, AnalysisError> {
        if cmd.entries.is_empty() {
            return Err(AnalysisError::validation("projects", "No projects provided"));
        }

        let requests: Vec<SynthesisRequest> =
            cmd.entries.iter().filter_map(BatchEntry::to_request).collect();
        let skipped = cmd.entries.len() - requests.len();
        debug!(count = requests.len(), skipped, "Running batch analysis");

        let outcomes = join_all(requests.iter().map(|r| self.orchestrator.analyze(r))).await;

        let items = requests
            .into_iter()
            .zip(outcomes)
            .map(|(request, outcome)| {
                outcome.map(|analysis| BatchItem {
                    name: request.name,
                    analysis,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BatchAnalyzeResult { items, skipped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::UnavailableSynthesizer;
    use crate::application::handlers::analysis::OrchestratorSettings;

    fn handler() -> BatchAnalyzeHandler {
        BatchAnalyzeHandler::new(Arc::new(AnalysisOrchestrator::new(
            Arc::new(UnavailableSynthesizer),
            OrchestratorSettings::default(),
        )))
    }

    fn entry(name: Option<&str>, description: Option<&str>) -> BatchEntry {
        BatchEntry {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn skips_entries_without_name() {
        let result = handler()
            .handle(BatchAnalyzeCommand {
                entries: vec![
                    entry(Some("Alpha"), None),
                    entry(None, Some("orphan")),
                    entry(Some("  "), None),
                    entry(Some("Beta"), Some("solar roof")),
                ],
            })
            .await
            .unwrap();

        assert_eq!(result.skipped, 2);
        let names: Vec<_> = result.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
        assert_eq!(result.items[0].analysis.overall_score(), 257);
        assert_eq!(result.items[1].analysis.overall_score(), 267);
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let err = handler()
            .handle(BatchAnalyzeCommand { entries: vec![] })
            .await
            .unwrap_err();
        assert_eq!(err, AnalysisError::validation("projects", "No projects provided"));
    }
}
