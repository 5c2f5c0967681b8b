//! Project module - stored architectural schemes and their scores.

mod aggregate;
mod detected;
mod errors;
mod metrics;

pub use aggregate::{Project, ProjectDetails, MAX_NAME_LENGTH};
pub use detected::{DetectedProject, DetectionSource};
pub use errors::{AnalysisError, ProjectError};
pub use metrics::{loose_number, loose_text, ProjectMetrics};
