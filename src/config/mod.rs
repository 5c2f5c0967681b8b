//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `AUG_COMPASS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use aug_compass::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod database;
mod error;
mod scoring;
mod server;

pub use ai::AiConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use scoring::ScoringConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

use crate::application::OrchestratorSettings;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// in-memory, fallback-only service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (optional PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// AI provider configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Fallback scoring configuration
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AUG_COMPASS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `AUG_COMPASS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `AUG_COMPASS__DATABASE__URL=...` -> `database.url = ...`
    /// - `AUG_COMPASS__SCORING__FALLBACK_SEED=7` -> `scoring.fallback_seed = 7`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AUG_COMPASS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.ai.validate()?;
        self.scoring.validate()?;

        // Fallback must be reachable before the HTTP layer gives up.
        if self.ai.timeout_secs >= self.server.request_timeout_secs {
            return Err(ValidationError::SynthesisOutlastsRequest {
                synthesis_secs: self.ai.timeout_secs,
                request_secs: self.server.request_timeout_secs,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Orchestrator settings derived from the AI and scoring sections.
    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            synthesis_timeout: self.ai.timeout(),
            budgets: self.scoring.budgets(),
            fallback_seed: self.scoring.fallback_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use std::time::Duration;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "AUG_COMPASS__SERVER__PORT",
        "AUG_COMPASS__SERVER__ENVIRONMENT",
        "AUG_COMPASS__DATABASE__URL",
        "AUG_COMPASS__AI__TIMEOUT_SECS",
        "AUG_COMPASS__SCORING__GREEN_BUDGET",
        "AUG_COMPASS__SCORING__FALLBACK_SEED",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(config.database.url().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AUG_COMPASS__SERVER__PORT", "3000");
        env::set_var("AUG_COMPASS__DATABASE__URL", "postgresql://test@localhost/aug");
        env::set_var("AUG_COMPASS__SCORING__FALLBACK_SEED", "42");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url(), Some("postgresql://test@localhost/aug"));
        assert_eq!(config.scoring.fallback_seed, Some(42));
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AUG_COMPASS__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn test_invalid_budget_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AUG_COMPASS__SCORING__GREEN_BUDGET", "118");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::BudgetOutOfRange { .. })
        ));
    }

    #[test]
    fn test_synthesis_timeout_must_fit_inside_request_timeout() {
        let mut config = AppConfig::default();
        config.server.request_timeout_secs = 10;
        config.ai.timeout_secs = 120;
        config.ai.call_timeout_secs = 30;
        assert_eq!(
            config.validate(),
            Err(ValidationError::SynthesisOutlastsRequest {
                synthesis_secs: 120,
                request_secs: 10,
            })
        );

        config.ai.timeout_secs = 10;
        config.ai.call_timeout_secs = 10;
        assert!(config.validate().is_err());

        config.ai.timeout_secs = 9;
        config.ai.call_timeout_secs = 5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_orchestrator_settings_follow_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AUG_COMPASS__AI__TIMEOUT_SECS", "12");
        let result = AppConfig::load();
        clear_env();

        let settings = result.unwrap().orchestrator_settings();
        assert_eq!(settings.synthesis_timeout, Duration::from_secs(12));
        assert_eq!(settings.budgets.urban, 90);
    }
}
