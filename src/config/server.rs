//! HTTP listener settings (`VOICE_SURVEY__SERVER__*`).

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upper bound on a single request, batch calls included
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Comma-separated browser origins allowed by CORS; any origin when unset
    #[serde(default)]
    pub cors_origins: Option<String>,
}

/// Deployment stage. Production tightens validation and switches logs to JSON.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ValidationError::InvalidBindAddress(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Structured logs for anything that ships to a log pipeline.
    pub fn json_logs(&self) -> bool {
        self.environment != Environment::Development
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured origins, trimmed, empty entries dropped.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .iter()
            .flat_map(|list| list.split(','))
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        self.socket_addr()?;
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout_secs(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info,voice_survey=debug,sqlx=warn".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8000");
        assert_eq!(config.environment, Environment::Development);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn host_must_be_an_ip() {
        let config = ServerConfig {
            host: "survey.local".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBindAddress(host)) if host == "survey.local"
        ));
    }

    #[test]
    fn ipv6_host_is_accepted() {
        let config = ServerConfig {
            host: "::1".to_string(),
            port: 9000,
            ..Default::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "[::1]:9000");
    }

    #[test]
    fn json_logs_outside_development() {
        let mut config = ServerConfig::default();
        assert!(!config.json_logs());

        config.environment = Environment::Staging;
        assert!(config.json_logs());
        assert!(!config.is_production());

        config.environment = Environment::Production;
        assert!(config.is_production());
    }

    #[test]
    fn allowed_origins_are_trimmed() {
        let config = ServerConfig {
            cors_origins: Some(" https://survey.example.com ,, http://localhost:5173,".into()),
            ..Default::default()
        };
        assert_eq!(
            config.allowed_origins(),
            vec!["https://survey.example.com", "http://localhost:5173"]
        );
        assert!(ServerConfig::default().allowed_origins().is_empty());
    }

    #[test]
    fn timeout_must_be_bounded() {
        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
        }
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPort)));
    }
}
