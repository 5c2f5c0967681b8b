//! Overall score and sustainability percentage.

use serde::{Deserialize, Serialize};

use super::aggregator::CategoryScore;

/// Maximum overall score across the three categories.
pub const OVERALL_MAX: u16 = 360;

/// Overall AUG score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub total: u16,
    pub max: u16,
    /// `total / max * 100`, rounded to one decimal.
    pub percentage: f64,
}

/// Combines the three category scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverallScoreCalculator;

impl OverallScoreCalculator {
    pub fn overall(categories: [CategoryScore; 3]) -> OverallScore {
        let total: u16 = categories.iter().map(CategoryScore::value).sum();
        OverallScore {
            total,
            max: OVERALL_MAX,
            percentage: percentage_of(total),
        }
    }
}

/// Rounds `total / 360 * 100` to one decimal place.
pub fn percentage_of(total: u16) -> f64 {
    let raw = total as f64 / OVERALL_MAX as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}
