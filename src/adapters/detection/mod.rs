//! Project detection adapters.

mod catalog_detector;

pub use catalog_detector::CatalogProjectDetector;
