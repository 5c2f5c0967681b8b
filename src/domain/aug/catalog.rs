//! AUG criteria catalog - the 18 criteria and their sub-criteria.
//!
//! The catalog is immutable process-wide data. Callers obtain it with
//! [`CriteriaCatalog::aug`] and pass it around by reference.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ScoringError;

/// Number of criteria in each category.
pub const CRITERIA_PER_CATEGORY: usize = 6;

/// Number of sub-criteria in each criterion.
pub const SUB_CRITERIA_PER_CRITERION: usize = 4;

/// Top-level grouping of the AUG framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "Architectural")]
    Architectural,
    #[serde(alias = "Urban")]
    Urban,
    #[serde(alias = "Green")]
    Green,
}

impl Category {
    /// All categories in framework order.
    pub const ALL: [Category; 3] = [Category::Architectural, Category::Urban, Category::Green];

    /// Returns the lowercase key used in payloads.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Architectural => "architectural",
            Category::Urban => "urban",
            Category::Green => "green",
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Architectural => "Architectural",
            Category::Urban => "Urban",
            Category::Green => "Green",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "architectural" => Ok(Category::Architectural),
            "urban" => Ok(Category::Urban),
            "green" => Ok(Category::Green),
            other => Err(ScoringError::invalid_input(
                "category",
                format!("unknown category '{}'", other),
            )),
        }
    }
}

/// One of the 18 evaluation axes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criterion {
    /// Stable snake_case identifier (e.g. `new_forms_living`).
    pub key: &'static str,
    /// Display name (e.g. `New Forms of Living`).
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    /// Ordered sub-criterion identifiers.
    pub sub_criteria: &'static [&'static str],
}

impl Criterion {
    /// Key under which a sub-criterion response is submitted.
    pub fn response_key(&self, sub_criterion: &str) -> String {
        format!("{}_{}", self.key, sub_criterion)
    }
}

/// Human readable label for a snake_case sub-criterion key.
pub fn sub_criterion_label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Validated, immutable set of AUG criteria.
#[derive(Debug, Clone)]
pub struct CriteriaCatalog {
    criteria: Vec<Criterion>,
}

static AUG_CATALOG: Lazy<CriteriaCatalog> = Lazy::new(|| {
    CriteriaCatalog::new(aug_criteria()).expect("built-in AUG catalog is well-formed")
});

impl CriteriaCatalog {
    /// Builds a catalog, rejecting anything but 6 criteria per category
    /// with 4 sub-criteria each.
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, ScoringError> {
        for category in Category::ALL {
            let count = criteria.iter().filter(|c| c.category == category).count();
            if count != CRITERIA_PER_CATEGORY {
                return Err(ScoringError::catalog(format!(
                    "{} category has {} criteria, expected {}",
                    category, count, CRITERIA_PER_CATEGORY
                )));
            }
        }

        if let Some(bad) = criteria
            .iter()
            .find(|c| c.sub_criteria.len() != SUB_CRITERIA_PER_CRITERION)
        {
            return Err(ScoringError::catalog(format!(
                "criterion '{}' has {} sub-criteria, expected {}",
                bad.key,
                bad.sub_criteria.len(),
                SUB_CRITERIA_PER_CRITERION
            )));
        }

        Ok(Self { criteria })
    }

    /// The standard AUG catalog.
    pub fn aug() -> &'static CriteriaCatalog {
        &AUG_CATALOG
    }

    /// All criteria in catalog order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Criteria of one category, in catalog order.
    pub fn for_category(&self, category: Category) -> Vec<&Criterion> {
        self.criteria
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }

    /// Looks up a criterion by key.
    pub fn find(&self, key: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.key == key)
    }

    /// Looks up a criterion of a category by display name, ignoring case.
    pub fn find_by_name(&self, category: Category, name: &str) -> Option<&Criterion> {
        let wanted = name.trim();
        self.criteria
            .iter()
            .find(|c| c.category == category && c.name.eq_ignore_ascii_case(wanted))
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

fn aug_criteria() -> Vec<Criterion> {
    use Category::*;

    vec![
        Criterion {
            key: "compactness",
            name: "Compactness",
            description: "Space efficiency, optimal density, and resource optimization",
            category: Architectural,
            sub_criteria: &[
                "site_coverage_ratio",
                "floor_area_ratio",
                "building_footprint_efficiency",
                "verticality_horizontal_spread",
            ],
        },
        Criterion {
            key: "shared_spaces",
            name: "Shared Spaces",
            description: "Community areas, social interaction spaces, and collective facilities",
            category: Architectural,
            sub_criteria: &[
                "proportion_shared_area",
                "accessibility_shared_spaces",
                "diversity_shared_functions",
                "management_maintenance_plan",
            ],
        },
        Criterion {
            key: "new_forms_living",
            name: "New Forms of Living",
            description: "Innovative living concepts, modern lifestyle adaptation, and housing typology innovation",
            category: Architectural,
            sub_criteria: &[
                "adaptability_multi_generational",
                "integration_live_work",
                "support_community_interaction",
                "technological_integration",
            ],
        },
        Criterion {
            key: "flexibility",
            name: "Flexibility",
            description: "Adaptability for future modifications, modular design, and changing needs accommodation",
            category: Architectural,
            sub_criteria: &[
                "spatial_reconfigurability",
                "functional_adaptability",
                "structural_modifiability",
                "material_system_interchangeability",
            ],
        },
        Criterion {
            key: "identity",
            name: "Identity",
            description: "Architectural character, cultural relevance, and distinctive design features",
            category: Architectural,
            sub_criteria: &[
                "contextual_responsiveness",
                "distinctive_features",
                "resident_personalization",
                "public_perception",
            ],
        },
        Criterion {
            key: "functionality_access",
            name: "Functionality Access",
            description: "Efficient circulation, accessibility features, and functional organization",
            category: Architectural,
            sub_criteria: &[
                "universal_design",
                "circulation_efficiency",
                "proximity_services",
                "safety_security",
            ],
        },
        Criterion {
            key: "open_spaces",
            name: "Open Spaces",
            description: "Public space integration, green areas, and outdoor activity spaces",
            category: Urban,
            sub_criteria: &[
                "quantity_open_space",
                "quality_open_space",
                "accessibility_open_space",
                "integration_urban_fabric",
            ],
        },
        Criterion {
            key: "mixed_use",
            name: "Mixed Use",
            description: "Balance of residential and commercial functions, activity diversity",
            category: Urban,
            sub_criteria: &[
                "diversity_functions",
                "integration_uses",
                "activity_throughout_day",
                "economic_viability",
            ],
        },
        Criterion {
            key: "variation_context",
            name: "Variation in Context",
            description: "Response to local urban fabric, contextual sensitivity, and neighborhood integration",
            category: Urban,
            sub_criteria: &[
                "respect_urban_grain",
                "material_architectural_palette",
                "adaptability_topography",
                "preservation_heritage",
            ],
        },
        Criterion {
            key: "densification_human_scale",
            name: "Densification Human Scale",
            description: "Optimal density while maintaining human scale and livability",
            category: Urban,
            sub_criteria: &[
                "density_achieved",
                "pedestrian_experience",
                "building_height_massing",
                "permeability_connectivity",
            ],
        },
        Criterion {
            key: "walkability",
            name: "Walkability",
            description: "Pedestrian-friendly design, connectivity, and accessibility",
            category: Urban,
            sub_criteria: &[
                "pedestrian_network_quality",
                "proximity_amenities",
                "streetscape_design",
                "traffic_calming",
            ],
        },
        Criterion {
            key: "neighborhood_benefits",
            name: "Neighborhood Benefits",
            description: "Positive impact on surrounding community and local development",
            category: Urban,
            sub_criteria: &[
                "local_economic_contribution",
                "social_cohesion",
                "access_public_services",
                "environmental_improvement",
            ],
        },
        Criterion {
            key: "daylight",
            name: "Daylight",
            description: "Natural lighting optimization, solar access, and light quality",
            category: Green,
            sub_criteria: &[
                "daylight_autonomy",
                "glare_control",
                "view_quality",
                "uniformity_daylight",
            ],
        },
        Criterion {
            key: "wind_air_quality",
            name: "Wind Air Quality",
            description: "Ventilation systems, air quality management, and natural airflow",
            category: Green,
            sub_criteria: &[
                "natural_ventilation_potential",
                "cross_ventilation_effectiveness",
                "indoor_air_pollutant_control",
                "outdoor_air_quality_impact",
            ],
        },
        Criterion {
            key: "energy_efficiency",
            name: "Energy Efficiency",
            description: "Energy systems, passive design, and renewable energy integration",
            category: Green,
            sub_criteria: &[
                "building_envelope_performance",
                "renewable_energy_integration",
                "efficient_hvac_systems",
                "smart_energy_management",
            ],
        },
        Criterion {
            key: "costs_affordability",
            name: "Costs Affordability",
            description: "Cost-benefit ratio for sustainability, economic viability, and long-term value",
            category: Green,
            sub_criteria: &[
                "initial_construction_cost",
                "lifecycle_cost_analysis",
                "affordability_target_demographics",
                "financial_incentives",
            ],
        },
        Criterion {
            key: "biophilia",
            name: "Biophilia",
            description: "Integration of natural elements, connection to nature, and biophilic design",
            category: Green,
            sub_criteria: &[
                "connection_nature_buildings",
                "access_green_spaces",
                "use_natural_materials",
                "biodiversity_enhancement",
            ],
        },
        Criterion {
            key: "special_solutions",
            name: "Special Solutions",
            description: "Innovative green technologies, unique sustainability features, and advanced systems",
            category: Green,
            sub_criteria: &[
                "water_harvesting_reuse",
                "waste_management_recycling",
                "resilience_climate_change",
                "innovative_technologies",
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aug_catalog_has_eighteen_criteria() {
        let catalog = CriteriaCatalog::aug();
        assert_eq!(catalog.len(), 18);
        for category in Category::ALL {
            assert_eq!(catalog.for_category(category).len(), CRITERIA_PER_CATEGORY);
        }
    }

    #[test]
    fn every_criterion_has_four_sub_criteria() {
        for criterion in CriteriaCatalog::aug().criteria() {
            assert_eq!(criterion.sub_criteria.len(), SUB_CRITERIA_PER_CRITERION);
        }
    }

    #[test]
    fn criterion_keys_are_unique() {
        let catalog = CriteriaCatalog::aug();
        let mut keys: Vec<_> = catalog.criteria().iter().map(|c| c.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 18);
    }

    #[test]
    fn categories_keep_framework_order() {
        let names: Vec<_> = CriteriaCatalog::aug()
            .for_category(Category::Urban)
            .iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Open Spaces",
                "Mixed Use",
                "Variation in Context",
                "Densification Human Scale",
                "Walkability",
                "Neighborhood Benefits",
            ]
        );
    }

    #[test]
    fn find_by_name_ignores_case() {
        let catalog = CriteriaCatalog::aug();
        let found = catalog
            .find_by_name(Category::Architectural, "new forms of living")
            .unwrap();
        assert_eq!(found.key, "new_forms_living");
        assert!(catalog.find_by_name(Category::Green, "Compactness").is_none());
    }

    #[test]
    fn response_key_joins_criterion_and_sub_criterion() {
        let criterion = CriteriaCatalog::aug().find("compactness").unwrap();
        assert_eq!(
            criterion.response_key("floor_area_ratio"),
            "compactness_floor_area_ratio"
        );
    }

    #[test]
    fn catalog_rejects_missing_criteria() {
        let mut criteria = aug_criteria();
        criteria.pop();
        let err = CriteriaCatalog::new(criteria).unwrap_err();
        assert!(matches!(err, ScoringError::CatalogInconsistency(_)));
    }

    #[test]
    fn catalog_rejects_wrong_sub_criteria_count() {
        let mut criteria = aug_criteria();
        criteria[0].sub_criteria = &["only_one"];
        let err = CriteriaCatalog::new(criteria).unwrap_err();
        assert!(err.to_string().contains("compactness"));
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Green".parse::<Category>().unwrap(), Category::Green);
        assert_eq!(" URBAN ".parse::<Category>().unwrap(), Category::Urban);
        assert!("blue".parse::<Category>().is_err());
    }

    #[test]
    fn category_deserializes_from_label_or_key() {
        let c: Category = serde_json::from_str("\"Architectural\"").unwrap();
        assert_eq!(c, Category::Architectural);
        let c: Category = serde_json::from_str("\"green\"").unwrap();
        assert_eq!(c, Category::Green);
    }

    #[test]
    fn sub_criterion_label_is_humanized() {
        assert_eq!(sub_criterion_label("site_coverage_ratio"), "Site coverage ratio");
        assert_eq!(sub_criterion_label(""), "");
    }
}
