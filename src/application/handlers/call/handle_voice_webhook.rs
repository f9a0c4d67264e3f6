//! HandleVoiceWebhookHandler - Receives post-call webhooks.
//!
//! The provider authenticates and parses the raw body. Transcription events
//! are handed to `ProcessConversationHandler`; other event types are
//! acknowledged without side effects.

use std::sync::Arc;

use super::process_conversation::{ConversationProcessed, ProcessConversationHandler};
use crate::domain::call::CallError;
use crate::ports::{CallRepository, SurveyRepository, VoiceProvider, WebhookEvent};

/// Raw webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleVoiceWebhookCommand {
    pub payload: Vec<u8>,
    /// Value of the signature header, if sent.
    pub signature: Option<String>,
}

/// Result of a webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookDisposition {
    Processed(ConversationProcessed),
    /// Event type this service does not act on.
    Ignored(String),
}

/// Handler for voice platform webhooks.
pub struct HandleVoiceWebhookHandler {
    voice: Arc<dyn VoiceProvider>,
    processor: ProcessConversationHandler,
}

impl HandleVoiceWebhookHandler {
    pub fn new(
        voice: Arc<dyn VoiceProvider>,
        calls: Arc<dyn CallRepository>,
        surveys: Arc<dyn SurveyRepository>,
    ) -> Self {
        Self {
            voice,
            processor: ProcessConversationHandler::new(calls, surveys),
        }
    }

    /// # Errors
    ///
    /// - `InvalidWebhook` if the signature is missing, stale or wrong
    /// - `ValidationFailed` if the body is not a valid event
    /// - `ConversationNotFound` if no call carries the conversation id
    pub async fn handle(
        &self,
        cmd: HandleVoiceWebhookCommand,
    ) -> Result<WebhookDisposition, CallError> {
        let event = self
            .voice
            .verify_webhook(&cmd.payload, cmd.signature.as_deref())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected voice webhook");
                CallError::from(e)
            })?;

        match event {
            WebhookEvent::PostCallTranscription(outcome) => {
                let processed = self.processor.handle(outcome).await?;
                Ok(WebhookDisposition::Processed(processed))
            }
            WebhookEvent::Other(event_type) => {
                tracing::debug!(event_type = %event_type, "Ignoring voice webhook event");
                Ok(WebhookDisposition::Ignored(event_type))
            }
        }
    }
}
