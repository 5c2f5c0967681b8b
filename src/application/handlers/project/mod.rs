//! Project handlers.

mod assess_project;
mod create_project;
mod get_profile;
mod get_project;

pub use assess_project::{AssessProjectCommand, AssessProjectHandler, AssessProjectResult};
pub use create_project::{CreateProjectCommand, CreateProjectHandler};
pub use get_profile::GetProfileHandler;
pub use get_project::{GetProjectHandler, ListProjectsHandler};
