//! Voice survey server entry point.
//!
//! Loads configuration from the environment, connects to PostgreSQL, runs
//! pending migrations and serves the REST API until SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use voice_survey::adapters::http::{build_router, AppState};
use voice_survey::adapters::postgres::{
    PostgresCallRepository, PostgresCustomerRepository, PostgresHealthCheck,
    PostgresReportReader, PostgresSurveyRepository,
};
use voice_survey::adapters::voice::{ElevenLabsConfig, ElevenLabsVoiceProvider};
use voice_survey::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.server);
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        environment = ?config.server.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting voice survey backend"
    );

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await
        .with_context(|| format!("Failed to connect to {}", config.database.redacted_url()))?;
    tracing::info!(database = %config.database.redacted_url(), "Connected to PostgreSQL");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    }

    if config.voice.webhook_secret().is_none() {
        tracing::warn!("No webhook secret configured; voice webhooks will not be authenticated");
    }
    let voice = ElevenLabsVoiceProvider::new(ElevenLabsConfig::from(&config.voice))
        .context("Failed to build voice platform client")?;

    let state = AppState::new(
        Arc::new(PostgresCustomerRepository::new(pool.clone())),
        Arc::new(PostgresCallRepository::new(pool.clone())),
        Arc::new(PostgresSurveyRepository::new(pool.clone())),
        Arc::new(PostgresReportReader::new(pool.clone())),
        Arc::new(voice),
        Arc::new(PostgresHealthCheck::new(pool.clone())),
        config.batch.clone(),
    );
    let app = build_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// JSON logs outside development, human-readable otherwise. `RUST_LOG` wins
/// over the configured level.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.json_logs() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
