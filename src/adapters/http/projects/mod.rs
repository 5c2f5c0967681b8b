//! HTTP adapter for projects: CRUD, criteria assessment and radar profile.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::projects_router;
