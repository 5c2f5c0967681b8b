//! Finalized analysis results and the analysis pipeline stages.

use serde::{Deserialize, Serialize};

use super::breakdown::{CategoryBreakdowns, Priority, Recommendation};
use super::catalog::Category;
use super::overall::{OverallScore, OverallScoreCalculator};
use crate::domain::foundation::{StateMachine, Timestamp};

/// Where the criterion scores of a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Synthesized,
    Fallback,
}

/// Stages of a single analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    /// Project data gathered, nothing scored yet.
    Pending,
    /// Criterion scores available from synthesis or fallback.
    Scored,
    /// Overall score computed, recommendations and insights attached.
    Finalized,
}

impl StateMachine for AnalysisStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AnalysisStage::*;
        matches!((self, target), (Pending, Scored) | (Scored, Finalized))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AnalysisStage::*;
        match self {
            Pending => vec![Scored],
            Scored => vec![Finalized],
            Finalized => vec![],
        }
    }
}

/// Immutable result of one analysis.
///
/// The overall score and percentage are derived from the breakdowns when
/// the result is built and again when it is deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AnalysisResultRecord")]
pub struct AnalysisResult {
    categories: CategoryBreakdowns,
    recommendations: Vec<Recommendation>,
    insights: Vec<String>,
    overall_score: u16,
    max_score: u16,
    sustainability_percentage: f64,
    source: AnalysisSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    analyzed_at: Timestamp,
}

#[derive(Deserialize)]
struct AnalysisResultRecord {
    categories: CategoryBreakdowns,
    #[serde(default)]
    recommendations: Vec<Recommendation>,
    #[serde(default)]
    insights: Vec<String>,
    source: AnalysisSource,
    #[serde(default)]
    note: Option<String>,
    analyzed_at: Timestamp,
}

impl From<AnalysisResultRecord> for AnalysisResult {
    fn from(record: AnalysisResultRecord) -> Self {
        let mut result = AnalysisResult::new(
            record.categories,
            record.recommendations,
            record.insights,
            record.source,
            record.note,
        );
        result.analyzed_at = record.analyzed_at;
        result
    }
}

impl AnalysisResult {
    pub fn new(
        categories: CategoryBreakdowns,
        recommendations: Vec<Recommendation>,
        insights: Vec<String>,
        source: AnalysisSource,
        note: Option<String>,
    ) -> Self {
        let overall = OverallScoreCalculator::overall(categories.scores());
        Self {
            categories,
            recommendations,
            insights,
            overall_score: overall.total,
            max_score: overall.max,
            sustainability_percentage: overall.percentage,
            source,
            note,
            analyzed_at: Timestamp::now(),
        }
    }

    pub fn categories(&self) -> &CategoryBreakdowns {
        &self.categories
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn insights(&self) -> &[String] {
        &self.insights
    }

    pub fn overall(&self) -> OverallScore {
        OverallScore {
            total: self.overall_score,
            max: self.max_score,
            percentage: self.sustainability_percentage,
        }
    }

    pub fn overall_score(&self) -> u16 {
        self.overall_score
    }

    pub fn sustainability_percentage(&self) -> f64 {
        self.sustainability_percentage
    }

    pub fn source(&self) -> AnalysisSource {
        self.source
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn analyzed_at(&self) -> &Timestamp {
        &self.analyzed_at
    }
}

/// Recommendations attached to fallback results.
pub fn fallback_recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation::new(
            Category::Green,
            Priority::High,
            "Consider implementing more renewable energy solutions",
        ),
        Recommendation::new(
            Category::Architectural,
            Priority::Medium,
            "Enhance flexibility with modular design elements",
        ),
        Recommendation::new(
            Category::Urban,
            Priority::Medium,
            "Improve community integration and walkability",
        ),
    ]
}

/// Insights attached to fallback results.
pub fn fallback_insights() -> Vec<String> {
    [
        "This project shows good potential for sustainable development",
        "Urban integration could be enhanced with better community spaces",
        "Architectural design demonstrates solid sustainability principles",
        "Green features are present but could be expanded for better performance",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
