//! AUG scoring engine.
//!
//! Sub-criterion inputs (0-5) roll up into criterion totals (0-20),
//! category totals (0-120) and an overall score (0-360). When no
//! synthesized breakdown is available, the fallback allocator manufactures
//! criterion scores from per-category budgets.

mod aggregator;
mod assessment;
mod breakdown;
mod catalog;
mod errors;
mod fallback;
mod overall;
mod result;
mod sub_criterion;

pub use aggregator::{CategoryScore, CriterionAggregator, CriterionScore, CATEGORY_MAX, CRITERION_MAX};
pub use assessment::{
    radar_profile, AssessmentOutcome, AssessmentResponses, CategoryAssessment, CriteriaAssessment,
    CriteriaAssessor, CriterionAssessment, ProfilePoint,
};
pub use breakdown::{CategoryBreakdown, CategoryBreakdowns, CriterionEntry, Priority, Recommendation};
pub use catalog::{
    sub_criterion_label, Category, CriteriaCatalog, Criterion, CRITERIA_PER_CATEGORY,
    SUB_CRITERIA_PER_CRITERION,
};
pub use errors::ScoringError;
pub use fallback::{
    fallback_rationale, CategoryAllocation, CategoryBudgets, CriterionAllocation, FallbackAllocator,
    KeywordBoost, Rebalance, ALLOCATION_CEILING, ALLOCATION_FLOOR, KEYWORD_BOOSTS,
};
pub use overall::{percentage_of, OverallScore, OverallScoreCalculator, OVERALL_MAX};
pub use result::{
    fallback_insights, fallback_recommendations, AnalysisResult, AnalysisSource, AnalysisStage,
};
pub use sub_criterion::{SubCriterionScore, SubCriterionScorer, SUB_CRITERION_MAX};
