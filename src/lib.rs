//! AUG Compass - Sustainability scoring for architecture projects
//!
//! This crate scores buildings against the AUG framework (Architectural,
//! Urban and Green categories, six criteria each) either from
//! synthesized model output or from deterministic fallback allocation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
