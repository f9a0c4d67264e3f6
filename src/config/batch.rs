//! Batch call submission configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// How batch calls are paced
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// Calls placed concurrently per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Pause between chunks in milliseconds
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
}

impl BatchConfig {
    /// Get pause as Duration
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    /// Validate batch configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.chunk_size == 0 || self.chunk_size > 50 {
            return Err(ValidationError::InvalidChunkSize);
        }
        if self.pause_ms > 60_000 {
            return Err(ValidationError::InvalidBatchPause);
        }
        Ok(())
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            pause_ms: default_pause_ms(),
        }
    }
}

fn default_chunk_size() -> usize {
    5
}

fn default_pause_ms() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BatchConfig::default();
        assert_eq!(config.chunk_size, 5);
        assert_eq!(config.pause(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_chunk_size_bounds() {
        let config = BatchConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidChunkSize)
        ));

        let config = BatchConfig {
            chunk_size: 51,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_pause_limit() {
        let config = BatchConfig {
            pause_ms: 120_000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBatchPause)
        ));
    }
}
