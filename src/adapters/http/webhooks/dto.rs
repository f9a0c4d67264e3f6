//! Acknowledgement body for webhook deliveries.

use serde::Serialize;

use crate::application::handlers::call::{ConversationProcessed, WebhookDisposition};

/// Acknowledgement returned to the voice platform.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    /// `processed`, `duplicate` or `ignored`.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
}

impl From<WebhookDisposition> for WebhookAck {
    fn from(disposition: WebhookDisposition) -> Self {
        match disposition {
            WebhookDisposition::Processed(processed) => {
                let status = match processed {
                    ConversationProcessed::Recorded { .. } => "processed",
                    ConversationProcessed::AlreadyFinished(_) => "duplicate",
                };
                Self {
                    status,
                    call_id: Some(processed.call().id().to_string()),
                    event_type: None,
                }
            }
            WebhookDisposition::Ignored(event_type) => Self {
                status: "ignored",
                call_id: None,
                event_type: Some(event_type),
            },
        }
    }
}
