//! Fallback scoring configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::aug::{Category, CategoryBudgets, CATEGORY_MAX};

/// Fallback allocation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_architectural")]
    pub architectural_budget: i32,

    #[serde(default = "default_urban")]
    pub urban_budget: i32,

    #[serde(default = "default_green")]
    pub green_budget: i32,

    /// Seed for fallback jitter. Unset draws from entropy per request.
    pub fallback_seed: Option<u64>,
}

impl ScoringConfig {
    pub fn budgets(&self) -> CategoryBudgets {
        CategoryBudgets {
            architectural: self.architectural_budget,
            urban: self.urban_budget,
            green: self.green_budget,
        }
    }

    /// Every budget must stay in [0, 120] even with all keyword boosts.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let base = self.budgets();
        let boosted = base.fully_boosted();
        for category in Category::ALL {
            let (budget, with_boosts) = (base.get(category), boosted.get(category));
            if budget < 0 || with_boosts > CATEGORY_MAX as i32 {
                return Err(ValidationError::BudgetOutOfRange {
                    category: category.key(),
                    budget,
                    boosted: with_boosts,
                });
            }
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            architectural_budget: default_architectural(),
            urban_budget: default_urban(),
            green_budget: default_green(),
            fallback_seed: None,
        }
    }
}

fn default_architectural() -> i32 {
    85
}

fn default_urban() -> i32 {
    90
}

fn default_green() -> i32 {
    82
}
