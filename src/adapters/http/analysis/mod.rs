//! HTTP adapter for analysis: single, detected, batch and comparison.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::analysis_router;
