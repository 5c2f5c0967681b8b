//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Model providers and the score synthesizer built on them
//! - `detection` - Known-project catalog detector
//! - `http` - REST API
//! - `memory` - In-memory project store
//! - `postgres` - PostgreSQL project store

pub mod ai;
pub mod detection;
pub mod http;
pub mod memory;
pub mod postgres;

pub use ai::{LlmScoreSynthesizer, OpenAIConfig, OpenAIProvider, SynthesisSettings, UnavailableSynthesizer};
pub use detection::CatalogProjectDetector;
pub use self::http::{api_router, AppState};
pub use memory::InMemoryProjectRepository;
pub use postgres::PostgresProjectRepository;
