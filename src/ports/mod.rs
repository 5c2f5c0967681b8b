//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - chat-completion access to a language model
//! - `ScoreSynthesizer` - validated criterion breakdowns for a project
//! - `ProjectRepository` - whole-snapshot project persistence
//! - `ProjectDetector` - best-effort project enrichment by name

mod ai_provider;
mod project_detector;
mod project_repository;
mod score_synthesizer;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message, MessageRole,
    ProviderInfo, RequestMetadata, TokenUsage,
};
pub use project_detector::ProjectDetector;
pub use project_repository::ProjectRepository;
pub use score_synthesizer::{ScoreSynthesizer, SynthesisError, SynthesisRequest, SynthesizedAnalysis};
