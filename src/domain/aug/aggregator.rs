//! Criterion and category aggregation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::catalog::{CRITERIA_PER_CATEGORY, SUB_CRITERIA_PER_CRITERION};
use super::errors::ScoringError;
use super::sub_criterion::SubCriterionScore;
use crate::domain::foundation::ValidationError;

/// Maximum points for a criterion.
pub const CRITERION_MAX: u8 = 20;

/// Maximum points for a category.
pub const CATEGORY_MAX: u16 = 120;

/// Score of one criterion, always in [0, 20].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CriterionScore(u8);

impl CriterionScore {
    pub const ZERO: CriterionScore = CriterionScore(0);

    /// Creates a criterion score, rejecting values above 20.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > CRITERION_MAX {
            return Err(ValidationError::out_of_range(
                "criterion_score",
                0,
                CRITERION_MAX as i64,
                value as i64,
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for CriterionScore {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<CriterionScore> for u8 {
    fn from(score: CriterionScore) -> Self {
        score.0
    }
}

impl fmt::Display for CriterionScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Score of one category, always in [0, 120].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct CategoryScore(u16);

impl CategoryScore {
    pub const ZERO: CategoryScore = CategoryScore(0);

    pub fn try_new(value: u16) -> Result<Self, ValidationError> {
        if value > CATEGORY_MAX {
            return Err(ValidationError::out_of_range(
                "category_score",
                0,
                CATEGORY_MAX as i64,
                value as i64,
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for CategoryScore {
    type Error = ValidationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<CategoryScore> for u16 {
    fn from(score: CategoryScore) -> Self {
        score.0
    }
}

impl fmt::Display for CategoryScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sums sub-scores into criteria and criteria into categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct CriterionAggregator;

impl CriterionAggregator {
    /// Sums exactly four sub-criterion scores.
    pub fn criterion_total(scores: &[SubCriterionScore]) -> Result<CriterionScore, ScoringError> {
        if scores.len() != SUB_CRITERIA_PER_CRITERION {
            return Err(ScoringError::catalog(format!(
                "criterion needs {} sub-scores, got {}",
                SUB_CRITERIA_PER_CRITERION,
                scores.len()
            )));
        }
        let total: u8 = scores.iter().map(SubCriterionScore::value).sum();
        CriterionScore::try_new(total).map_err(|e| ScoringError::catalog(e.to_string()))
    }

    /// Sums exactly six criterion scores.
    pub fn category_total(scores: &[CriterionScore]) -> Result<CategoryScore, ScoringError> {
        if scores.len() != CRITERIA_PER_CATEGORY {
            return Err(ScoringError::catalog(format!(
                "category needs {} criterion scores, got {}",
                CRITERIA_PER_CATEGORY,
                scores.len()
            )));
        }
        let total: u16 = scores.iter().map(|s| s.value() as u16).sum();
        CategoryScore::try_new(total).map_err(|e| ScoringError::catalog(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(values: &[i64]) -> Vec<SubCriterionScore> {
        values.iter().map(|v| SubCriterionScore::clamped(*v)).collect()
    }

    fn crits(values: &[u8]) -> Vec<CriterionScore> {
        values
            .iter()
            .map(|v| CriterionScore::try_new(*v).unwrap())
            .collect()
    }

    #[test]
    fn criterion_total_sums_four_scores() {
        let total = CriterionAggregator::criterion_total(&subs(&[5, 4, 3, 0])).unwrap();
        assert_eq!(total.value(), 12);
    }

    #[test]
    fn criterion_total_of_maximums_is_twenty() {
        let total = CriterionAggregator::criterion_total(&subs(&[5, 5, 5, 5])).unwrap();
        assert_eq!(total.value(), CRITERION_MAX);
    }

    #[test]
    fn criterion_total_rejects_wrong_count() {
        let err = CriterionAggregator::criterion_total(&subs(&[5, 5, 5])).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn category_total_sums_six_scores() {
        let total = CriterionAggregator::category_total(&crits(&[20, 20, 20, 20, 20, 20])).unwrap();
        assert_eq!(total.value(), CATEGORY_MAX);

        let total = CriterionAggregator::category_total(&crits(&[15, 14, 14, 14, 14, 14])).unwrap();
        assert_eq!(total.value(), 85);
    }

    #[test]
    fn category_total_rejects_wrong_count() {
        let err = CriterionAggregator::category_total(&crits(&[10; 7])).unwrap_err();
        assert!(matches!(err, ScoringError::CatalogInconsistency(_)));
    }

    #[test]
    fn criterion_score_rejects_values_above_twenty() {
        assert!(CriterionScore::try_new(21).is_err());
        assert!(serde_json::from_str::<CriterionScore>("25").is_err());
    }

    #[test]
    fn category_score_rejects_values_above_limit() {
        assert!(CategoryScore::try_new(121).is_err());
        assert_eq!(CategoryScore::try_new(120).unwrap().value(), 120);
    }
}
