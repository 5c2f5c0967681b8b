//! Per-category score breakdowns and recommendations.

use serde::{Deserialize, Serialize};

use super::aggregator::{CategoryScore, CriterionAggregator, CriterionScore};
use super::catalog::Category;
use super::errors::ScoringError;
use super::fallback::CategoryAllocation;

/// Score and short analysis for one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionEntry {
    pub name: String,
    pub score: CriterionScore,
    pub analysis: String,
}

/// One category's total and its six criterion entries.
///
/// The total is always the sum of the entries, including after
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CategoryBreakdownRecord")]
pub struct CategoryBreakdown {
    score: CategoryScore,
    criteria: Vec<CriterionEntry>,
}

#[derive(Deserialize)]
struct CategoryBreakdownRecord {
    #[allow(dead_code)]
    score: Option<u16>,
    criteria: Vec<CriterionEntry>,
}

impl TryFrom<CategoryBreakdownRecord> for CategoryBreakdown {
    type Error = ScoringError;

    fn try_from(record: CategoryBreakdownRecord) -> Result<Self, Self::Error> {
        CategoryBreakdown::from_entries(record.criteria)
    }
}

impl CategoryBreakdown {
    /// Builds a breakdown, recomputing the total from the entries.
    pub fn from_entries(criteria: Vec<CriterionEntry>) -> Result<Self, ScoringError> {
        let scores: Vec<CriterionScore> = criteria.iter().map(|c| c.score).collect();
        let score = CriterionAggregator::category_total(&scores)?;
        Ok(Self { score, criteria })
    }

    pub fn from_allocation(allocation: &CategoryAllocation) -> Result<Self, ScoringError> {
        Self::from_entries(
            allocation
                .criteria
                .iter()
                .map(|a| CriterionEntry {
                    name: a.name.clone(),
                    score: a.score,
                    analysis: a.rationale.clone(),
                })
                .collect(),
        )
    }

    pub fn score(&self) -> CategoryScore {
        self.score
    }

    pub fn criteria(&self) -> &[CriterionEntry] {
        &self.criteria
    }
}

/// The three category breakdowns of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdowns {
    pub architectural: CategoryBreakdown,
    pub urban: CategoryBreakdown,
    pub green: CategoryBreakdown,
}

impl CategoryBreakdowns {
    pub fn from_allocations(allocations: &[CategoryAllocation; 3]) -> Result<Self, ScoringError> {
        let find = |category: Category| {
            allocations
                .iter()
                .find(|a| a.category == category)
                .ok_or_else(|| ScoringError::catalog(format!("missing {} allocation", category)))
                .and_then(CategoryBreakdown::from_allocation)
        };
        Ok(Self {
            architectural: find(Category::Architectural)?,
            urban: find(Category::Urban)?,
            green: find(Category::Green)?,
        })
    }

    pub fn get(&self, category: Category) -> &CategoryBreakdown {
        match category {
            Category::Architectural => &self.architectural,
            Category::Urban => &self.urban,
            Category::Green => &self.green,
        }
    }

    /// Category totals in framework order.
    pub fn scores(&self) -> [CategoryScore; 3] {
        [
            self.architectural.score(),
            self.urban.score(),
            self.green.score(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "high")]
    High,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "low")]
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: Category,
    pub priority: Priority,
    pub suggestion: String,
}

impl Recommendation {
    pub fn new(category: Category, priority: Priority, suggestion: impl Into<String>) -> Self {
        Self {
            category,
            priority,
            suggestion: suggestion.into(),
        }
    }
}
