//! AUG Compass server
//!
//! Wires configuration, storage, the score synthesizer and the HTTP API,
//! then serves until Ctrl+C or SIGTERM.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aug_compass::adapters::ai::{
    LlmScoreSynthesizer, OpenAIConfig, OpenAIProvider, SynthesisSettings, UnavailableSynthesizer,
};
use aug_compass::adapters::detection::CatalogProjectDetector;
use aug_compass::adapters::http::{api_router, AppState};
use aug_compass::adapters::memory::InMemoryProjectRepository;
use aug_compass::adapters::postgres::PostgresProjectRepository;
use aug_compass::application::AnalysisOrchestrator;
use aug_compass::config::{AppConfig, ConfigError, ServerConfig, ValidationError};
use aug_compass::ports::{AIError, ProjectRepository, ScoreSynthesizer};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("AI provider setup failed: {0}")]
    Provider(#[from] AIError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    let repository = project_repository(&config).await?;
    let synthesizer = score_synthesizer(&config)?;
    let orchestrator = Arc::new(AnalysisOrchestrator::new(
        synthesizer,
        config.orchestrator_settings(),
    ));
    let state = AppState::new(
        repository,
        Arc::new(CatalogProjectDetector::new()),
        orchestrator,
    );

    let app = with_middleware(api_router(state), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "AUG Compass listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("AUG Compass shutting down");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| server.log_level.clone().into());

    if server.is_production() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn project_repository(
    config: &AppConfig,
) -> Result<Arc<dyn ProjectRepository>, StartupError> {
    let Some(url) = config.database.url() else {
        warn!("No database URL configured, projects are kept in memory");
        return Ok(Arc::new(InMemoryProjectRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.connect_timeout())
        .connect(url)
        .await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to PostgreSQL"
    );
    Ok(Arc::new(PostgresProjectRepository::new(pool)))
}

fn score_synthesizer(config: &AppConfig) -> Result<Arc<dyn ScoreSynthesizer>, StartupError> {
    let Some(key) = config.ai.openai_key() else {
        warn!("No OpenAI key configured, analyses use fallback allocation");
        return Ok(Arc::new(UnavailableSynthesizer));
    };

    let provider = OpenAIProvider::new(
        OpenAIConfig::from_secret(key.clone())
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.call_timeout())
            .with_max_retries(config.ai.max_retries),
    )?;
    info!(model = %config.ai.model, "Score synthesis enabled");

    Ok(Arc::new(LlmScoreSynthesizer::new(
        Arc::new(provider),
        SynthesisSettings {
            temperature: config.ai.temperature,
            max_tokens: config.ai.max_tokens,
        },
    )))
}

fn with_middleware(router: Router, server: &ServerConfig) -> Router {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    router
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(allow_origin)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
