//! Voice provider port for the conversational-voice platform.
//!
//! Defines the contract for placing outbound survey calls, reading back a
//! finished conversation and authenticating post-call webhooks.
//! Implementations translate the vendor's wire format into these types.

use std::collections::BTreeMap;

use crate::domain::foundation::ConversationId;
use crate::domain::survey::Transcript;
use crate::domain::webhook::WebhookError;
use async_trait::async_trait;

/// Port for the voice platform.
#[async_trait]
pub trait VoiceProvider: Send + Sync {
    /// Dial a customer and start the survey agent.
    async fn place_call(&self, request: OutboundCallRequest) -> Result<PlacedCall, VoiceError>;

    /// Fetch a conversation's current state, transcript and analysis.
    async fn get_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<ConversationOutcome, VoiceError>;

    /// Verify a webhook signature and parse the event.
    ///
    /// `signature` is the raw signature header, if the request carried one.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookEvent, VoiceError>;
}

/// Request to place one outbound survey call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCallRequest {
    /// E.164 number to dial.
    pub to_number: String,
    /// Injected into the agent as the `customer_name` dynamic variable.
    pub customer_name: String,
    /// System prompt override for the agent.
    pub prompt: String,
    /// Opening line override for the agent.
    pub first_message: String,
}

/// Identifiers returned when the platform accepts a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedCall {
    pub conversation_id: ConversationId,
    /// Telephony call SID, when the platform reports one.
    pub call_sid: Option<String>,
}

/// Platform-side state of a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationStatus {
    /// Conversation ended and analysis is available.
    Done,
    /// The platform gave up on the conversation.
    Failed,
    /// Still dialling, talking or processing; carries the raw status.
    Ongoing(String),
}

impl ConversationStatus {
    /// Maps the platform's status string.
    pub fn from_vendor(status: &str) -> Self {
        match status {
            "done" => ConversationStatus::Done,
            "failed" => ConversationStatus::Failed,
            other => ConversationStatus::Ongoing(other.to_string()),
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self, ConversationStatus::Ongoing(_))
    }
}

/// A conversation as reported by the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationOutcome {
    pub conversation_id: ConversationId,
    pub status: ConversationStatus,
    pub transcript: Transcript,
    pub duration_secs: Option<u32>,
    pub summary: Option<String>,
    /// Data collection results keyed by identifier (`q1`..`q5`), values as text.
    pub data_collection: BTreeMap<String, String>,
}

/// An authenticated webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    /// Post-call transcription with analysis.
    PostCallTranscription(ConversationOutcome),
    /// Any other event type, by name.
    Other(String),
}

/// Voice platform errors.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by the platform.
    #[error("rate limited by voice platform")]
    RateLimited,

    /// Conversation or agent unknown to the platform.
    #[error("not found: {0}")]
    NotFound(String),

    /// The platform rejected the request.
    #[error("request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status returned.
        status: u16,
        /// Error details.
        message: String,
    },

    /// Platform is unavailable.
    #[error("voice platform unavailable: {0}")]
    Unavailable(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Failed to parse platform response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Webhook could not be authenticated or decoded.
    #[error("invalid webhook: {0}")]
    InvalidWebhook(#[from] WebhookError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn VoiceProvider) {}
    }

    #[test]
    fn vendor_status_mapping() {
        assert_eq!(ConversationStatus::from_vendor("done"), ConversationStatus::Done);
        assert_eq!(ConversationStatus::from_vendor("failed"), ConversationStatus::Failed);
        assert_eq!(
            ConversationStatus::from_vendor("processing"),
            ConversationStatus::Ongoing("processing".to_string())
        );
        assert!(!ConversationStatus::from_vendor("in-progress").is_finished());
        assert!(ConversationStatus::Done.is_finished());
    }

    #[test]
    fn webhook_error_converts_into_voice_error() {
        let err: VoiceError = WebhookError::InvalidSignature.into();
        assert_eq!(err.to_string(), "invalid webhook: Invalid signature");
    }
}
