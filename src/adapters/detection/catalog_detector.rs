//! Project detector backed by a fixed table of well-known schemes.
//!
//! Names are matched case-insensitively after trimming. Anything else gets
//! fallback placeholder information rather than an error.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::foundation::DomainError;
use crate::domain::project::{DetectedProject, DetectionSource, ProjectMetrics};
use crate::ports::ProjectDetector;

struct KnownProject {
    name: &'static str,
    location: &'static str,
    architect: &'static str,
    year: i32,
    description: &'static str,
    website: &'static str,
    plot_area: f64,
    floor_area: f64,
    building_height: f64,
    unit_count: u32,
    units_per_hectare: f64,
    floor_area_ratio: f64,
    green_space_ratio: f64,
    densification_type: &'static str,
    images: &'static [&'static str],
}

impl KnownProject {
    fn to_detected(&self) -> DetectedProject {
        DetectedProject {
            name: self.name.to_string(),
            location: Some(self.location.to_string()),
            architect: Some(self.architect.to_string()),
            year: Some(self.year),
            description: Some(self.description.to_string()),
            website: Some(self.website.to_string()),
            metrics: ProjectMetrics {
                plot_area: Some(self.plot_area),
                floor_area: Some(self.floor_area),
                building_height: Some(self.building_height),
                unit_count: Some(self.unit_count),
                units_per_hectare: Some(self.units_per_hectare),
                floor_area_ratio: Some(self.floor_area_ratio),
                green_space_ratio: Some(self.green_space_ratio),
                densification_type: Some(self.densification_type.to_string()),
            },
            images: self.images.iter().map(|s| s.to_string()).collect(),
            source: DetectionSource::Catalog,
        }
    }
}

static KNOWN_PROJECTS: &[KnownProject] = &[
    KnownProject {
        name: "Bosco Verticale",
        location: "Milan, Italy",
        architect: "Stefano Boeri Architetti",
        year: 2014,
        description: "Bosco Verticale (Vertical Forest) is a pair of residential towers in the Porta Nuova district of Milan, Italy. The towers host 900 trees and over 20,000 plants from a wide range of shrubs and floral plants distributed according to the building's sun exposure and microclimate.",
        website: "https://www.stefanoboeriarchitetti.net/en/project/vertical-forest/",
        plot_area: 3000.0,
        floor_area: 40000.0,
        building_height: 116.0,
        unit_count: 113,
        units_per_hectare: 377.0,
        floor_area_ratio: 13.3,
        green_space_ratio: 75.0,
        densification_type: "Vertical Densification",
        images: &[
            "https://images.adsttc.com/media/images/5038/0e2e/28ba/0d59/9b00/0985/large_jpg/stringio.jpg",
            "https://images.adsttc.com/media/images/5038/0e40/28ba/0d59/9b00/0987/large_jpg/stringio.jpg",
        ],
    },
    KnownProject {
        name: "VIA 57 West",
        location: "New York, USA",
        architect: "BIG - Bjarke Ingels Group",
        year: 2016,
        description: "VIA 57 West is a residential building located on the West Side of Manhattan. The building features a unique pyramid shape that creates a large central courtyard while maximizing views of the Hudson River.",
        website: "https://big.dk/#projects-via",
        plot_area: 2800.0,
        floor_area: 45000.0,
        building_height: 142.0,
        unit_count: 709,
        units_per_hectare: 2532.0,
        floor_area_ratio: 16.1,
        green_space_ratio: 25.0,
        densification_type: "Vertical Densification",
        images: &[
            "https://images.adsttc.com/media/images/559b/0b5e/e58e/ce5a/0700/0199/large_jpg/VIA_57_WEST_-_EXTERIOR_-_PHOTO_BY_IWAN_BAAN_-_23.jpg",
        ],
    },
    KnownProject {
        name: "Marina Bay Sands",
        location: "Singapore",
        architect: "Moshe Safdie",
        year: 2010,
        description: "Marina Bay Sands is an integrated resort fronting Marina Bay in Singapore. The resort features three 55-story towers topped by a sky park with an infinity pool, observation deck, and restaurants.",
        website: "https://www.marinabaysands.com/",
        plot_area: 15600.0,
        floor_area: 518000.0,
        building_height: 200.0,
        unit_count: 2561,
        units_per_hectare: 1642.0,
        floor_area_ratio: 33.2,
        green_space_ratio: 15.0,
        densification_type: "Mixed Densification",
        images: &[],
    },
];

/// Detector that recognises a handful of reference projects.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogProjectDetector;

impl CatalogProjectDetector {
    pub fn new() -> Self {
        Self
    }

    fn lookup(name: &str) -> Option<&'static KnownProject> {
        let needle = name.trim().to_lowercase();
        KNOWN_PROJECTS
            .iter()
            .find(|known| known.name.to_lowercase() == needle)
    }
}

#[async_trait]
impl ProjectDetector for CatalogProjectDetector {
    async fn detect(&self, name: &str) -> Result<DetectedProject, DomainError> {
        match Self::lookup(name) {
            Some(known) => {
                debug!(project = known.name, "Detected known project");
                Ok(known.to_detected())
            }
            None => {
                debug!(project = name.trim(), "No detection match, using fallback");
                Ok(DetectedProject::fallback(name))
            }
        }
    }
}
