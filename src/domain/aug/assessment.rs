//! Direct criteria assessment from sub-criterion responses, and the radar
//! profile derived from it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::aggregator::{CategoryScore, CriterionAggregator, CriterionScore};
use super::catalog::{Category, CriteriaCatalog};
use super::errors::ScoringError;
use super::overall::{OverallScore, OverallScoreCalculator};
use super::sub_criterion::{SubCriterionScore, SubCriterionScorer};
use crate::domain::foundation::Timestamp;

/// Raw responses per category, keyed `"{criterion}_{sub_criterion}"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponses {
    #[serde(default)]
    pub architectural: Map<String, Value>,
    #[serde(default)]
    pub urban: Map<String, Value>,
    #[serde(default)]
    pub green: Map<String, Value>,
}

impl AssessmentResponses {
    pub fn for_category(&self, category: Category) -> &Map<String, Value> {
        match category {
            Category::Architectural => &self.architectural,
            Category::Urban => &self.urban,
            Category::Green => &self.green,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionAssessment {
    pub key: String,
    pub name: String,
    pub sub_scores: BTreeMap<String, SubCriterionScore>,
    pub total: CriterionScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAssessment {
    pub category: Category,
    pub criteria: Vec<CriterionAssessment>,
    pub total: CategoryScore,
}

/// Scores of every sub-criterion, criterion and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaAssessment {
    pub categories: Vec<CategoryAssessment>,
    pub overall: OverallScore,
    pub assessed_at: Timestamp,
}

/// An assessment plus the inputs that could not be read.
///
/// Unreadable inputs score 0; the rest of the assessment is unaffected.
#[derive(Debug, Clone)]
pub struct AssessmentOutcome {
    pub assessment: CriteriaAssessment,
    pub input_errors: Vec<ScoringError>,
}

/// Scores raw sub-criterion responses against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct CriteriaAssessor<'a> {
    catalog: &'a CriteriaCatalog,
}

impl<'a> CriteriaAssessor<'a> {
    pub fn new(catalog: &'a CriteriaCatalog) -> Self {
        Self { catalog }
    }

    /// Fails only when the catalog itself is malformed.
    pub fn assess(&self, responses: &AssessmentResponses) -> Result<AssessmentOutcome, ScoringError> {
        let mut input_errors = Vec::new();
        let mut categories = Vec::with_capacity(Category::ALL.len());

        for category in Category::ALL {
            let answers = responses.for_category(category);
            let mut criteria = Vec::new();

            for criterion in self.catalog.for_category(category) {
                let mut sub_scores = BTreeMap::new();
                let mut ordered = Vec::with_capacity(criterion.sub_criteria.len());

                for sub in criterion.sub_criteria {
                    let key = criterion.response_key(sub);
                    let score = match SubCriterionScorer::score(&key, answers.get(&key)) {
                        Ok(score) => score,
                        Err(err) => {
                            input_errors.push(err);
                            SubCriterionScore::ZERO
                        }
                    };
                    sub_scores.insert(sub.to_string(), score);
                    ordered.push(score);
                }

                criteria.push(CriterionAssessment {
                    key: criterion.key.to_string(),
                    name: criterion.name.to_string(),
                    sub_scores,
                    total: CriterionAggregator::criterion_total(&ordered)?,
                });
            }

            let totals: Vec<CriterionScore> = criteria.iter().map(|c| c.total).collect();
            categories.push(CategoryAssessment {
                category,
                total: CriterionAggregator::category_total(&totals)?,
                criteria,
            });
        }

        let overall = OverallScoreCalculator::overall([
            categories[0].total,
            categories[1].total,
            categories[2].total,
        ]);

        Ok(AssessmentOutcome {
            assessment: CriteriaAssessment {
                categories,
                overall,
                assessed_at: Timestamp::now(),
            },
            input_errors,
        })
    }
}

/// One spoke of the radar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub criterion: String,
    pub score: u8,
    pub category: String,
}

/// Lists all criteria in catalog order with their assessed totals.
///
/// Criteria missing from the assessment, or every criterion when there is
/// no assessment, score 0.
pub fn radar_profile(catalog: &CriteriaCatalog, assessment: Option<&CriteriaAssessment>) -> Vec<ProfilePoint> {
    catalog
        .criteria()
        .iter()
        .map(|criterion| {
            let score = assessment
                .and_then(|a| {
                    a.categories
                        .iter()
                        .filter(|c| c.category == criterion.category)
                        .flat_map(|c| c.criteria.iter())
                        .find(|c| c.key == criterion.key)
                })
                .map(|c| c.total.value())
                .unwrap_or(0);
            ProfilePoint {
                criterion: criterion.name.to_string(),
                score,
                category: criterion.category.label().to_string(),
            }
        })
        .collect()
}
