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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool max_connections must be positive and at least min_connections")]
    InvalidPoolSize,

    #[error("Pool max_connections exceeds 50")]
    PoolSizeTooLarge,

    #[error("Voice API base URL must use HTTPS in production")]
    VoiceBaseUrlMustBeHttps,

    #[error("Webhook secret is required in production")]
    WebhookSecretRequired,

    #[error("Batch chunk size must be between 1 and 50")]
    InvalidChunkSize,

    #[error("Batch pause must not exceed 60 seconds")]
    InvalidBatchPause,
}
