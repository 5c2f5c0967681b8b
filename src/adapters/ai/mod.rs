//! AI Adapters.
//!
//! ## Available Adapters
//!
//! - `OpenAIProvider` - OpenAI chat completions (GPT-4 family)
//! - `MockAIProvider` - Configurable mock for testing
//! - `LlmScoreSynthesizer` - ScoreSynthesizer backed by any AIProvider
//! - `UnavailableSynthesizer` - ScoreSynthesizer used when no model is configured

mod llm_synthesizer;
mod mock_provider;
mod openai_provider;

pub use llm_synthesizer::{extract_json, LlmScoreSynthesizer, SynthesisSettings, UnavailableSynthesizer};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
