//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `aug` - Criteria catalog and the scoring engine
//! - `project` - Project aggregate, detection results and metrics

pub mod aug;
pub mod foundation;
pub mod project;
