//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresProjectRepository` - JSONB project snapshots

mod project_repository;

pub use project_repository::PostgresProjectRepository;
