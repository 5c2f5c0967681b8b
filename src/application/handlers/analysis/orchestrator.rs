//! AnalysisOrchestrator - runs one analysis from project data to a
//! finalized result.
//!
//! Criterion scores come from the score synthesizer when it answers in
//! time with a valid breakdown, and from the fallback allocator otherwise.
//! Synthesis failures never reach the caller.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::domain::aug::{
    fallback_insights, fallback_recommendations, AnalysisResult, AnalysisSource, AnalysisStage,
    CategoryBreakdowns, CategoryBudgets, CriteriaCatalog, FallbackAllocator, Recommendation,
};
use crate::domain::foundation::StateMachine;
use crate::domain::project::AnalysisError;
use crate::ports::{ScoreSynthesizer, SynthesisError, SynthesisRequest, SynthesizedAnalysis};

/// Tunables for the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrchestratorSettings {
    /// Upper bound on a single synthesis call.
    pub synthesis_timeout: Duration,
    /// Base fallback budgets before keyword boosts.
    pub budgets: CategoryBudgets,
    /// Base seed for fallback jitter, mixed with the project name so equal
    /// budgets still jitter differently. `None` draws from entropy per
    /// request.
    pub fallback_seed: Option<u64>,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            synthesis_timeout: Duration::from_secs(30),
            budgets: CategoryBudgets::default(),
            fallback_seed: None,
        }
    }
}

/// Scored criterion breakdown plus the texts that go with it.
struct Scored {
    categories: CategoryBreakdowns,
    recommendations: Vec<Recommendation>,
    insights: Vec<String>,
    source: AnalysisSource,
    note: Option<String>,
}

/// Drives an analysis through `Pending -> Scored -> Finalized`.
pub struct AnalysisOrchestrator {
    synthesizer: Arc<dyn ScoreSynthesizer>,
    catalog: &'static CriteriaCatalog,
    settings: OrchestratorSettings,
}

impl AnalysisOrchestrator {
    pub fn new(synthesizer: Arc<dyn ScoreSynthesizer>, settings: OrchestratorSettings) -> Self {
        Self {
            synthesizer,
            catalog: CriteriaCatalog::aug(),
            settings,
        }
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Analyses a project with a per-request RNG.
    ///
    /// # Errors
    ///
    /// - `Internal` if the fallback computation is broken
    pub async fn analyze(&self, request: &SynthesisRequest) -> Result<AnalysisResult, AnalysisError> {
        let mut rng = match self.settings.fallback_seed {
            Some(seed) => StdRng::seed_from_u64(request_seed(seed, request)),
            None => StdRng::from_entropy(),
        };
        self.analyze_with_rng(request, &mut rng).await
    }

    /// Analyses a project drawing fallback jitter from `rng`.
    pub async fn analyze_with_rng<R: Rng + Send>(
        &self,
        request: &SynthesisRequest,
        rng: &mut R,
    ) -> Result<AnalysisResult, AnalysisError> {
        let stage = AnalysisStage::Pending;

        let scored = match self.synthesize(request).await {
            Ok(synthesized) => Scored {
                categories: synthesized.categories,
                recommendations: synthesized.recommendations,
                insights: synthesized.insights,
                source: AnalysisSource::Synthesized,
                note: None,
            },
            Err(err) => {
                warn!(
                    project = %request.name,
                    error = %err,
                    "Score synthesis failed, using fallback allocation"
                );
                self.fallback(request, rng, &err)?
            }
        };
        let stage = advance(stage, AnalysisStage::Scored)?;

        let result = AnalysisResult::new(
            scored.categories,
            scored.recommendations,
            scored.insights,
            scored.source,
            scored.note,
        );
        advance(stage, AnalysisStage::Finalized)?;

        info!(
            project = %request.name,
            source = ?result.source(),
            overall_score = result.overall_score(),
            percentage = result.sustainability_percentage(),
            "Analysis finalized"
        );

        Ok(result)
    }

    async fn synthesize(
        &self,
        request: &SynthesisRequest,
    ) -> Result<SynthesizedAnalysis, SynthesisError> {
        let bound = self.settings.synthesis_timeout;
        match timeout(bound, self.synthesizer.synthesize(request)).await {
            Ok(result) => result,
            Err(_) => Err(SynthesisError::Timeout {
                timeout_secs: bound.as_secs(),
            }),
        }
    }

    fn fallback<R: Rng>(
        &self,
        request: &SynthesisRequest,
        rng: &mut R,
        cause: &SynthesisError,
    ) -> Result<Scored, AnalysisError> {
        let budgets = self.settings.budgets.adjusted_for(&request.keyword_text());
        debug!(
            architectural = budgets.architectural,
            urban = budgets.urban,
            green = budgets.green,
            "Fallback budgets"
        );

        let allocations = FallbackAllocator::new(self.catalog).allocate_all(&budgets, rng)?;
        let categories = CategoryBreakdowns::from_allocations(&allocations)?;

        Ok(Scored {
            categories,
            recommendations: fallback_recommendations(),
            insights: fallback_insights(),
            source: AnalysisSource::Fallback,
            note: Some(format!(
                "Synthesized scoring unavailable ({}); scores were produced by fallback allocation",
                cause
            )),
        })
    }
}

/// Mixes the configured seed with the project name (FNV-1a), so a seeded
/// deployment is reproducible per project.
fn request_seed(base: u64, request: &SynthesisRequest) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    request
        .name
        .trim()
        .bytes()
        .fold(FNV_OFFSET ^ base, |hash, byte| {
            (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
        })
}

fn advance(from: AnalysisStage, to: AnalysisStage) -> Result<AnalysisStage, AnalysisError> {
    from.transition_to(to)
        .map_err(|e| AnalysisError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{LlmScoreSynthesizer, MockAIProvider, SynthesisSettings, UnavailableSynthesizer};
    use crate::domain::aug::{Category, CategoryBreakdown, CriterionEntry, Priority};
    use async_trait::async_trait;

    struct FixedSynthesizer {
        score: u8,
    }

    #[async_trait]
    impl ScoreSynthesizer for FixedSynthesizer {
        async fn synthesize(
            &self,
            _request: &SynthesisRequest,
        ) -> Result<SynthesizedAnalysis, SynthesisError> {
            let breakdown = |category: Category| {
                let criteria = CriteriaCatalog::aug()
                    .for_category(category)
                    .into_iter()
                    .map(|c| CriterionEntry {
                        name: c.name.to_string(),
                        score: crate::domain::aug::CriterionScore::try_new(self.score).unwrap(),
                        analysis: "Strong".to_string(),
                    })
                    .collect();
                CategoryBreakdown::from_entries(criteria).unwrap()
            };
            Ok(SynthesizedAnalysis {
                categories: CategoryBreakdowns {
                    architectural: breakdown(Category::Architectural),
                    urban: breakdown(Category::Urban),
                    green: breakdown(Category::Green),
                },
                recommendations: vec![Recommendation::new(
                    Category::Urban,
                    Priority::Medium,
                    "Add shaded seating",
                )],
                insights: vec!["Dense and green".to_string()],
            })
        }
    }

    struct SlowSynthesizer;

    #[async_trait]
    impl ScoreSynthesizer for SlowSynthesizer {
        async fn synthesize(
            &self,
            _request: &SynthesisRequest,
        ) -> Result<SynthesizedAnalysis, SynthesisError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(SynthesisError::Unavailable("never".into()))
        }
    }

    fn request(name: &str, description: Option<&str>) -> SynthesisRequest {
        SynthesisRequest {
            name: name.to_string(),
            description: description.map(str::to_string),
            ..Default::default()
        }
    }

    fn orchestrator(synthesizer: Arc<dyn ScoreSynthesizer>) -> AnalysisOrchestrator {
        AnalysisOrchestrator::new(synthesizer, OrchestratorSettings::default())
    }

    #[tokio::test]
    async fn synthesized_scores_are_authoritative() {
        let result = orchestrator(Arc::new(FixedSynthesizer { score: 15 }))
            .analyze(&request("Tower", None))
            .await
            .unwrap();

        assert_eq!(result.source(), AnalysisSource::Synthesized);
        assert_eq!(result.overall_score(), 270);
        assert_eq!(result.sustainability_percentage(), 75.0);
        assert!(result.note().is_none());
        assert_eq!(result.insights(), ["Dense and green".to_string()]);
    }

    #[tokio::test]
    async fn unavailable_synthesis_falls_back_to_base_budgets() {
        let result = orchestrator(Arc::new(UnavailableSynthesizer))
            .analyze(&request("", None))
            .await
            .unwrap();

        assert_eq!(result.source(), AnalysisSource::Fallback);
        assert!(result.note().is_some());
        let scores = result.categories().scores();
        assert_eq!(scores.map(|s| s.value()), [85, 90, 82]);
        assert_eq!(result.overall_score(), 257);
        assert_eq!(result.sustainability_percentage(), 71.4);
        assert_eq!(result.recommendations(), fallback_recommendations().as_slice());
    }

    #[tokio::test]
    async fn solar_energy_boosts_green_only() {
        let result = orchestrator(Arc::new(UnavailableSynthesizer))
            .analyze(&request("", Some("solar energy")))
            .await
            .unwrap();

        assert_eq!(result.categories().scores().map(|s| s.value()), [85, 90, 92]);
        assert_eq!(result.overall_score(), 267);
        assert_eq!(result.sustainability_percentage(), 74.2);
    }

    #[tokio::test]
    async fn malformed_payload_falls_back() {
        let provider = MockAIProvider::new().with_response("I think this project is lovely.");
        let synthesizer = LlmScoreSynthesizer::new(Arc::new(provider), SynthesisSettings::default());

        let result = orchestrator(Arc::new(synthesizer))
            .analyze(&request("Harbour Flats", None))
            .await
            .unwrap();

        assert_eq!(result.source(), AnalysisSource::Fallback);
        for breakdown in [
            &result.categories().architectural,
            &result.categories().urban,
            &result.categories().green,
        ] {
            assert_eq!(breakdown.criteria().len(), 6);
            assert!(breakdown.criteria().iter().all(|c| c.score.value() <= 20));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_synthesis_times_out_into_fallback() {
        let settings = OrchestratorSettings {
            synthesis_timeout: Duration::from_secs(5),
            ..Default::default()
        };
        let result = AnalysisOrchestrator::new(Arc::new(SlowSynthesizer), settings)
            .analyze(&request("", None))
            .await
            .unwrap();

        assert_eq!(result.source(), AnalysisSource::Fallback);
        assert!(result.note().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn seeded_fallback_is_deterministic() {
        let settings = OrchestratorSettings {
            fallback_seed: Some(42),
            ..Default::default()
        };
        let orchestrator = AnalysisOrchestrator::new(Arc::new(UnavailableSynthesizer), settings);

        let first = orchestrator.analyze(&request("Park", None)).await.unwrap();
        let second = orchestrator.analyze(&request("Park", None)).await.unwrap();
        assert_eq!(first.categories(), second.categories());
    }

    #[test]
    fn request_seed_depends_on_project_name_and_base() {
        let park = request("Park", None);
        assert_eq!(request_seed(42, &park), request_seed(42, &request("Park", None)));
        assert_ne!(request_seed(42, &park), request_seed(42, &request("Plaza", None)));
        assert_ne!(request_seed(42, &park), request_seed(7, &park));
    }

    #[tokio::test]
    async fn seeded_fallback_draws_from_the_request_seed() {
        let settings = OrchestratorSettings {
            fallback_seed: Some(42),
            ..Default::default()
        };
        let orchestrator = AnalysisOrchestrator::new(Arc::new(UnavailableSynthesizer), settings);
        let plaza = request("Plaza", None);

        let seeded = orchestrator.analyze(&plaza).await.unwrap();
        let mut rng = StdRng::seed_from_u64(request_seed(42, &plaza));
        let explicit = orchestrator.analyze_with_rng(&plaza, &mut rng).await.unwrap();
        assert_eq!(seeded.categories(), explicit.categories());
    }

    #[tokio::test]
    async fn out_of_range_budget_is_internal_error() {
        let settings = OrchestratorSettings {
            budgets: CategoryBudgets {
                architectural: 119,
                urban: 90,
                green: 82,
            },
            ..Default::default()
        };
        let err = AnalysisOrchestrator::new(Arc::new(UnavailableSynthesizer), settings)
            .analyze(&request("innovative", None))
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Internal(_)));
    }
}
