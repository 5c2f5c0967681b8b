//! Project detector port.
//!
//! Detection is best-effort enrichment by project name. Results are
//! untrusted: every field is optional and callers must cope with blanks.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::project::DetectedProject;

#[async_trait]
pub trait ProjectDetector: Send + Sync {
    /// Look up information about a project by name.
    ///
    /// Unknown names still succeed with fallback information. An error
    /// means the detector itself failed.
    ///
    /// # Errors
    ///
    /// - `DetectionFailed` when the lookup could not run
    async fn detect(&self, name: &str) -> Result<DetectedProject, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_detector_is_object_safe() {
        fn _accepts_dyn(_detector: &dyn ProjectDetector) {}
    }
}
