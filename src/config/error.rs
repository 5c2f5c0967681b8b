//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid host or port: {0}")]
    InvalidAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Invalid synthesis timeout")]
    InvalidSynthesisTimeout,

    #[error("Provider call timeout must be between 1s and the synthesis timeout")]
    InvalidCallTimeout,

    #[error("Synthesis timeout ({synthesis_secs}s) must be shorter than the request timeout ({request_secs}s)")]
    SynthesisOutlastsRequest {
        synthesis_secs: u64,
        request_secs: u64,
    },

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("Invalid AI base URL")]
    InvalidBaseUrl,

    #[error("{category} budget {budget} must stay within [0, 120] after keyword boosts (boosted: {boosted})")]
    BudgetOutOfRange {
        category: &'static str,
        budget: i32,
        boosted: i32,
    },
}
