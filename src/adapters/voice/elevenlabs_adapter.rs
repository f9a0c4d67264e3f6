//! Conversational-agent voice platform adapter.
//!
//! Implements `VoiceProvider` against the ElevenLabs Conversational AI API:
//! outbound calls through the Twilio integration, conversation lookup, and
//! HMAC-signed post-call webhooks.
//!
//! # Example
//!
//! ```ignore
//! let config = ElevenLabsConfig::new("xi-key", "agent_123", "phnum_456")
//!     .with_webhook_secret("wsec_...");
//! let provider = ElevenLabsVoiceProvider::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};

use super::wire_types::{parse_webhook, ConversationData, OutboundCallBody, OutboundCallResponse};
use crate::config::VoiceConfig;
use crate::domain::foundation::ConversationId;
use crate::domain::webhook::{WebhookError, WebhookVerifier};
use crate::ports::{
    ConversationOutcome, OutboundCallRequest, PlacedCall, VoiceError, VoiceProvider, WebhookEvent,
};

/// Configuration for the voice platform client.
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    api_key: Secret<String>,
    pub agent_id: String,
    pub agent_phone_number_id: String,
    /// Base URL for the API (default: https://api.elevenlabs.io).
    pub base_url: String,
    pub timeout: Duration,
    webhook_secret: Option<Secret<String>>,
}

impl ElevenLabsConfig {
    pub fn new(
        api_key: impl Into<String>,
        agent_id: impl Into<String>,
        agent_phone_number_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            agent_id: agent_id.into(),
            agent_phone_number_id: agent_phone_number_id.into(),
            base_url: "https://api.elevenlabs.io".to_string(),
            timeout: Duration::from_secs(30),
            webhook_secret: None,
        }
    }

    /// Sets a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the webhook signing secret.
    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(Secret::new(secret.into()));
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl From<&VoiceConfig> for ElevenLabsConfig {
    fn from(config: &VoiceConfig) -> Self {
        let base = Self::new(
            config.api_key.clone(),
            config.agent_id.clone(),
            config.agent_phone_number_id.clone(),
        )
        .with_base_url(config.base_url.clone())
        .with_timeout(config.timeout());

        match config.webhook_secret() {
            Some(secret) => base.with_webhook_secret(secret),
            None => base,
        }
    }
}

/// Voice platform client.
pub struct ElevenLabsVoiceProvider {
    config: ElevenLabsConfig,
    client: Client,
    verifier: Option<WebhookVerifier>,
}

impl ElevenLabsVoiceProvider {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `VoiceError::Network` if the HTTP client cannot be built.
    pub fn new(config: ElevenLabsConfig) -> Result<Self, VoiceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| VoiceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let verifier = config
            .webhook_secret
            .as_ref()
            .map(|secret| WebhookVerifier::new(secret.expose_secret().clone()));

        Ok(Self {
            config,
            client,
            verifier,
        })
    }

    fn outbound_call_url(&self) -> String {
        format!("{}/v1/convai/twilio/outbound-call", self.config.base_url)
    }

    fn conversation_url(&self, conversation_id: &ConversationId) -> String {
        format!(
            "{}/v1/convai/conversations/{}",
            self.config.base_url,
            conversation_id.as_str()
        )
    }

    fn map_send_error(e: reqwest::Error) -> VoiceError {
        if e.is_timeout() {
            VoiceError::Timeout
        } else if e.is_connect() {
            VoiceError::Network(format!("Connection failed: {}", e))
        } else {
            VoiceError::Network(e.to_string())
        }
    }

    /// Maps non-success statuses to typed errors.
    async fn handle_response_status(response: Response) -> Result<Response, VoiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(VoiceError::AuthenticationFailed),
            404 => Err(VoiceError::NotFound(error_body)),
            429 => Err(VoiceError::RateLimited),
            500..=599 => Err(VoiceError::Unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            code => Err(VoiceError::Rejected {
                status: code,
                message: error_body,
            }),
        }
    }
}

#[async_trait]
impl VoiceProvider for ElevenLabsVoiceProvider {
    async fn place_call(&self, request: OutboundCallRequest) -> Result<PlacedCall, VoiceError> {
        let body = OutboundCallBody::new(
            &self.config.agent_id,
            &self.config.agent_phone_number_id,
            request,
        );

        let response = self
            .client
            .post(self.outbound_call_url())
            .header("xi-api-key", self.config.api_key())
            .json(&body)
            .send()
            .await
            .map_err(Self::map_send_error)?;
        let response = Self::handle_response_status(response).await?;

        let parsed: OutboundCallResponse = response
            .json()
            .await
            .map_err(|e| VoiceError::Parse(e.to_string()))?;

        if !parsed.success {
            return Err(VoiceError::Rejected {
                status: 200,
                message: parsed
                    .message
                    .unwrap_or_else(|| "call not initiated".to_string()),
            });
        }

        let conversation_id = parsed
            .conversation_id
            .ok_or_else(|| VoiceError::Parse("response has no conversation_id".to_string()))
            .and_then(|id| ConversationId::new(id).map_err(|e| VoiceError::Parse(e.to_string())))?;

        tracing::info!(
            conversation_id = %conversation_id,
            call_sid = ?parsed.call_sid,
            "Outbound call accepted"
        );

        Ok(PlacedCall {
            conversation_id,
            call_sid: parsed.call_sid,
        })
    }

    async fn get_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<ConversationOutcome, VoiceError> {
        let response = self
            .client
            .get(self.conversation_url(conversation_id))
            .header("xi-api-key", self.config.api_key())
            .send()
            .await
            .map_err(Self::map_send_error)?;
        let response = Self::handle_response_status(response).await?;

        let data: ConversationData = response
            .json()
            .await
            .map_err(|e| VoiceError::Parse(e.to_string()))?;

        data.into_outcome()
            .map_err(|e| VoiceError::Parse(e.to_string()))
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookEvent, VoiceError> {
        match &self.verifier {
            Some(verifier) => {
                let signature = signature.ok_or(WebhookError::MissingSignature)?;
                verifier.verify(payload, signature)?;
            }
            None => {
                tracing::warn!("Webhook secret not configured, skipping signature verification");
            }
        }

        Ok(parse_webhook(payload)?)
    }
}
