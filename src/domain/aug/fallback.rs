//! Fallback allocation of category budgets over criteria.
//!
//! Used when no synthesized breakdown is available. The allocator is pure
//! apart from the injected RNG, so a seeded generator reproduces the
//! exact same scores.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::aggregator::{CriterionAggregator, CriterionScore, CATEGORY_MAX, CRITERION_MAX};
use super::catalog::{Category, CriteriaCatalog, CRITERIA_PER_CATEGORY};
use super::errors::ScoringError;

/// Lower clamp bound for every criterion but the last.
pub const ALLOCATION_FLOOR: i32 = 10;

/// Upper clamp bound for every criterion but the last.
pub const ALLOCATION_CEILING: i32 = 18;

/// Maximum absolute jitter applied per criterion.
pub const JITTER: i32 = 2;

/// Per-category point budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBudgets {
    pub architectural: i32,
    pub urban: i32,
    pub green: i32,
}

impl Default for CategoryBudgets {
    fn default() -> Self {
        Self {
            architectural: 85,
            urban: 90,
            green: 82,
        }
    }
}

impl CategoryBudgets {
    pub fn get(&self, category: Category) -> i32 {
        match category {
            Category::Architectural => self.architectural,
            Category::Urban => self.urban,
            Category::Green => self.green,
        }
    }

    fn add(&mut self, category: Category, bonus: i32) {
        match category {
            Category::Architectural => self.architectural += bonus,
            Category::Urban => self.urban += bonus,
            Category::Green => self.green += bonus,
        }
    }

    /// Applies keyword boosts found in `text`, case-insensitively.
    ///
    /// Each group contributes at most once regardless of how many of its
    /// keywords appear.
    pub fn adjusted_for(&self, text: &str) -> CategoryBudgets {
        let haystack = text.to_lowercase();
        let mut adjusted = *self;
        for boost in KEYWORD_BOOSTS.iter() {
            if boost.keywords.iter().any(|k| haystack.contains(k)) {
                adjusted.add(boost.category, boost.bonus);
            }
        }
        adjusted
    }

    /// Budgets after every keyword boost has been applied.
    pub fn fully_boosted(&self) -> CategoryBudgets {
        let mut boosted = *self;
        for boost in KEYWORD_BOOSTS.iter() {
            boosted.add(boost.category, boost.bonus);
        }
        boosted
    }
}

/// A keyword group and the budget bonus it grants.
#[derive(Debug, Clone, Copy)]
pub struct KeywordBoost {
    pub category: Category,
    pub keywords: &'static [&'static str],
    pub bonus: i32,
}

pub const KEYWORD_BOOSTS: [KeywordBoost; 3] = [
    KeywordBoost {
        category: Category::Green,
        keywords: &["sustainable", "green", "eco", "solar", "energy"],
        bonus: 10,
    },
    KeywordBoost {
        category: Category::Urban,
        keywords: &["mixed", "community", "public", "walkable"],
        bonus: 8,
    },
    KeywordBoost {
        category: Category::Architectural,
        keywords: &["innovative", "flexible", "modular", "adaptive"],
        bonus: 8,
    },
];

/// Score manufactured for one criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionAllocation {
    pub name: String,
    pub score: CriterionScore,
    pub rationale: String,
}

/// Record of a leftover that had to be pushed back onto earlier criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rebalance {
    /// What the last criterion would have received.
    pub leftover: i32,
    /// Points moved onto (positive) or taken from (negative) earlier criteria.
    pub redistributed: i32,
}

/// Fallback scores for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAllocation {
    pub category: Category,
    pub budget: i32,
    pub criteria: Vec<CriterionAllocation>,
    pub rebalanced: Option<Rebalance>,
}

impl CategoryAllocation {
    pub fn scores(&self) -> Vec<CriterionScore> {
        self.criteria.iter().map(|c| c.score).collect()
    }

    pub fn total(&self) -> i32 {
        self.criteria.iter().map(|c| c.score.value() as i32).sum()
    }
}

/// Distributes category budgets over the catalog's criteria.
#[derive(Debug, Clone, Copy)]
pub struct FallbackAllocator<'a> {
    catalog: &'a CriteriaCatalog,
}

impl<'a> FallbackAllocator<'a> {
    pub fn new(catalog: &'a CriteriaCatalog) -> Self {
        Self { catalog }
    }

    /// Allocates `budget` over the six criteria of `category`.
    ///
    /// All criteria but the last get `remaining / left + jitter` clamped
    /// into [10, 18]; the last takes what remains. A leftover outside
    /// [0, 20] is clamped and the difference is spread back over earlier
    /// criteria so the category still sums to `budget`.
    pub fn allocate<R: Rng>(
        &self,
        category: Category,
        budget: i32,
        rng: &mut R,
    ) -> Result<CategoryAllocation, ScoringError> {
        if !(0..=CATEGORY_MAX as i32).contains(&budget) {
            return Err(ScoringError::catalog(format!(
                "{} budget {} outside [0, {}]",
                category, budget, CATEGORY_MAX
            )));
        }

        let criteria = self.catalog.for_category(category);
        if criteria.len() != CRITERIA_PER_CATEGORY {
            return Err(ScoringError::catalog(format!(
                "{} category has {} criteria, expected {}",
                category,
                criteria.len(),
                CRITERIA_PER_CATEGORY
            )));
        }

        let mut points = Vec::with_capacity(criteria.len());
        let mut remaining = budget;
        for i in 0..criteria.len() - 1 {
            let left = (criteria.len() - i) as i32;
            let jitter = rng.gen_range(-JITTER..=JITTER);
            let score = (remaining.div_euclid(left) + jitter).clamp(ALLOCATION_FLOOR, ALLOCATION_CEILING);
            points.push(score);
            remaining -= score;
        }
        points.push(remaining);

        let rebalanced = rebalance(&mut points);
        if let Some(r) = rebalanced {
            warn!(
                category = %category,
                budget,
                leftover = r.leftover,
                redistributed = r.redistributed,
                "Fallback leftover outside criterion range, rebalanced"
            );
        }

        let conserved: i32 = points.iter().sum();
        if conserved != budget {
            return Err(ScoringError::catalog(format!(
                "{} allocation sums to {} instead of {}",
                category, conserved, budget
            )));
        }

        let allocations = criteria
            .iter()
            .zip(points)
            .map(|(criterion, p)| {
                let score = u8::try_from(p)
                    .ok()
                    .and_then(|v| CriterionScore::try_new(v).ok())
                    .ok_or_else(|| {
                        ScoringError::catalog(format!("allocated {} to '{}'", p, criterion.key))
                    })?;
                Ok(CriterionAllocation {
                    name: criterion.name.to_string(),
                    score,
                    rationale: fallback_rationale(criterion.name),
                })
            })
            .collect::<Result<Vec<_>, ScoringError>>()?;

        // Guards the category total range through the same path as assessments.
        CriterionAggregator::category_total(&allocations.iter().map(|a| a.score).collect::<Vec<_>>())?;

        Ok(CategoryAllocation {
            category,
            budget,
            criteria: allocations,
            rebalanced,
        })
    }

    /// Allocates all three categories in framework order.
    pub fn allocate_all<R: Rng>(
        &self,
        budgets: &CategoryBudgets,
        rng: &mut R,
    ) -> Result<[CategoryAllocation; 3], ScoringError> {
        Ok([
            self.allocate(Category::Architectural, budgets.architectural, rng)?,
            self.allocate(Category::Urban, budgets.urban, rng)?,
            self.allocate(Category::Green, budgets.green, rng)?,
        ])
    }
}

/// Templated analysis text for a fallback criterion.
pub fn fallback_rationale(name: &str) -> String {
    format!(
        "Good performance in {} with room for improvement",
        name.to_lowercase()
    )
}

/// Pulls the last entry into [0, 20], moving the difference onto earlier
/// entries from the back. Returns what happened, if anything.
fn rebalance(points: &mut [i32]) -> Option<Rebalance> {
    let max = CRITERION_MAX as i32;
    let (last, earlier) = points.split_last_mut()?;
    let leftover = *last;

    if leftover > max {
        let mut excess = leftover - max;
        *last = max;
        for p in earlier.iter_mut().rev() {
            let take = excess.min(max - *p);
            *p += take;
            excess -= take;
        }
        *last += excess;
        Some(Rebalance {
            leftover,
            redistributed: leftover - max,
        })
    } else if leftover < 0 {
        let mut deficit = -leftover;
        *last = 0;
        for p in earlier.iter_mut().rev() {
            let take = deficit.min(*p);
            *p -= take;
            deficit -= take;
        }
        *last -= deficit;
        Some(Rebalance {
            leftover,
            redistributed: leftover,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn allocator() -> FallbackAllocator<'static> {
        FallbackAllocator::new(CriteriaCatalog::aug())
    }

    #[test]
    fn default_budgets_are_85_90_82() {
        let b = CategoryBudgets::default();
        assert_eq!((b.architectural, b.urban, b.green), (85, 90, 82));
    }

    #[test]
    fn blank_text_leaves_budgets_unchanged() {
        assert_eq!(CategoryBudgets::default().adjusted_for(""), CategoryBudgets::default());
    }

    #[test]
    fn solar_energy_boosts_green_once() {
        let b = CategoryBudgets::default().adjusted_for("solar energy");
        assert_eq!((b.architectural, b.urban, b.green), (85, 90, 92));
    }

    #[test]
    fn keyword_match_is_case_insensitive_substring() {
        let b = CategoryBudgets::default().adjusted_for("An ECOlogical Community with MODULAR units");
        assert_eq!((b.architectural, b.urban, b.green), (93, 98, 92));
        assert_eq!(b, CategoryBudgets::default().fully_boosted());
    }

    #[test]
    fn allocation_sums_to_budget() {
        let mut rng = StdRng::seed_from_u64(7);
        let alloc = allocator().allocate(Category::Urban, 90, &mut rng).unwrap();
        assert_eq!(alloc.criteria.len(), 6);
        assert_eq!(alloc.total(), 90);
    }

    #[test]
    fn same_seed_gives_same_allocation() {
        let a = allocator()
            .allocate(Category::Green, 82, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let b = allocator()
            .allocate(Category::Green, 82, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_final_criteria_stay_within_clamp_unless_rebalanced() {
        for seed in 0..50 {
            let alloc = allocator()
                .allocate(Category::Architectural, 85, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            if alloc.rebalanced.is_none() {
                for c in &alloc.criteria[..5] {
                    let v = c.score.value() as i32;
                    assert!((ALLOCATION_FLOOR..=ALLOCATION_CEILING).contains(&v));
                }
            }
        }
    }

    #[test]
    fn high_budget_leftover_is_rebalanced_within_range() {
        for seed in 0..200 {
            let alloc = allocator()
                .allocate(Category::Green, 120, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            assert_eq!(alloc.total(), 120);
            assert!(alloc.criteria.iter().all(|c| c.score.value() <= 20));
        }
    }

    #[test]
    fn low_budget_deficit_is_rebalanced() {
        let alloc = allocator()
            .allocate(Category::Urban, 30, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(alloc.total(), 30);
        let r = alloc.rebalanced.expect("deficit must be rebalanced");
        assert!(r.leftover < 0);
    }

    #[test]
    fn zero_budget_allocates_zeros() {
        let alloc = allocator()
            .allocate(Category::Green, 0, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert!(alloc.criteria.iter().all(|c| c.score == CriterionScore::ZERO));
    }

    #[test]
    fn out_of_range_budget_is_catalog_inconsistency() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(allocator().allocate(Category::Green, 121, &mut rng).unwrap_err().is_fatal());
        assert!(allocator().allocate(Category::Green, -1, &mut rng).unwrap_err().is_fatal());
    }

    #[test]
    fn rationale_uses_lowercased_name() {
        let alloc = allocator()
            .allocate(Category::Architectural, 85, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(alloc.criteria[2].name, "New Forms of Living");
        assert_eq!(
            alloc.criteria[2].rationale,
            "Good performance in new forms of living with room for improvement"
        );
    }

    #[test]
    fn rebalance_spreads_excess_from_the_back() {
        let mut points = vec![18, 18, 18, 18, 18, 22];
        let r = rebalance(&mut points).unwrap();
        assert_eq!(points, vec![18, 18, 18, 18, 20, 20]);
        assert_eq!(r.redistributed, 2);
    }

    #[test]
    fn rebalance_leaves_in_range_leftover_alone() {
        let mut points = vec![14, 14, 14, 14, 14, 15];
        assert!(rebalance(&mut points).is_none());
        assert_eq!(points, vec![14, 14, 14, 14, 14, 15]);
    }
}
