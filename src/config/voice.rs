//! Voice platform configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Voice platform configuration (conversational agent + telephony number)
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceConfig {
    /// Platform API key
    pub api_key: String,

    /// Survey agent ID
    pub agent_id: String,

    /// Telephony number the agent dials from
    pub agent_phone_number_id: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Post-call webhook signing secret
    pub webhook_secret: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl VoiceConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Webhook secret, if one is set and non-blank
    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Validate voice configuration
    ///
    /// Production requires HTTPS and a webhook secret.
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.api_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("VOICE_SURVEY__VOICE__API_KEY"));
        }
        if self.agent_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("VOICE_SURVEY__VOICE__AGENT_ID"));
        }
        if self.agent_phone_number_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired(
                "VOICE_SURVEY__VOICE__AGENT_PHONE_NUMBER_ID",
            ));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if production {
            if !self.base_url.starts_with("https://") {
                return Err(ValidationError::VoiceBaseUrlMustBeHttps);
            }
            if self.webhook_secret().is_none() {
                return Err(ValidationError::WebhookSecretRequired);
            }
        }
        Ok(())
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            agent_id: String::new(),
            agent_phone_number_id: String::new(),
            base_url: default_base_url(),
            webhook_secret: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_timeout() -> u64 {
    30
}
