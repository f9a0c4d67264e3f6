//! Mock voice provider for testing.
//!
//! Places no real calls. Supports:
//! - Sequential conversation IDs (`conv_1`, `conv_2`, ...)
//! - Per-number failure injection
//! - Pre-configured conversations for sync
//! - Webhook parsing with the real wire format, optionally rejecting all

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::wire_types::parse_webhook;
use crate::domain::foundation::ConversationId;
use crate::domain::webhook::WebhookError;
use crate::ports::{
    ConversationOutcome, OutboundCallRequest, PlacedCall, VoiceError, VoiceProvider, WebhookEvent,
};

/// Mock voice provider.
///
/// # Example
///
/// ```ignore
/// let mock = MockVoiceProvider::new();
/// mock.fail_number("+14155550100");
/// let placed = mock.place_call(request).await;
/// assert_eq!(mock.placed_calls().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockVoiceProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_id: u32,
    placed: Vec<OutboundCallRequest>,
    failing_numbers: HashSet<String>,
    conversations: HashMap<String, ConversationOutcome>,
    reject_webhooks: bool,
    latency: Option<Duration>,
    in_flight: usize,
    max_in_flight: usize,
}

impl MockVoiceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that rejects every webhook signature.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.lock().reject_webhooks = true;
        mock
    }

    /// Make calls to `number` fail as if the platform refused them.
    pub fn fail_number(&self, number: &str) {
        self.lock().failing_numbers.insert(number.to_string());
    }

    /// Delay every `place_call` by `latency`.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.lock().latency = Some(latency);
        self
    }

    /// Serve `outcome` from `get_conversation`.
    pub fn set_conversation(&self, outcome: ConversationOutcome) {
        self.lock()
            .conversations
            .insert(outcome.conversation_id.as_str().to_string(), outcome);
    }

    /// Requests received by `place_call`, in order.
    pub fn placed_calls(&self) -> Vec<OutboundCallRequest> {
        self.lock().placed.clone()
    }

    /// Highest number of `place_call` futures running at once.
    pub fn max_in_flight(&self) -> usize {
        self.lock().max_in_flight
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned lock only happens after a test already panicked.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl VoiceProvider for MockVoiceProvider {
    async fn place_call(&self, request: OutboundCallRequest) -> Result<PlacedCall, VoiceError> {
        let latency = {
            let mut state = self.lock();
            state.placed.push(request.clone());
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            state.latency
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let mut state = self.lock();
        state.in_flight -= 1;

        if state.failing_numbers.contains(&request.to_number) {
            return Err(VoiceError::Rejected {
                status: 400,
                message: format!("cannot dial {}", request.to_number),
            });
        }

        state.next_id += 1;
        let conversation_id = ConversationId::new(format!("conv_{}", state.next_id))
            .map_err(|e| VoiceError::Parse(e.to_string()))?;
        Ok(PlacedCall {
            conversation_id,
            call_sid: Some(format!("CA{:04}", state.next_id)),
        })
    }

    async fn get_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<ConversationOutcome, VoiceError> {
        self.lock()
            .conversations
            .get(conversation_id.as_str())
            .cloned()
            .ok_or_else(|| VoiceError::NotFound(conversation_id.to_string()))
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        _signature: Option<&str>,
    ) -> Result<WebhookEvent, VoiceError> {
        if self.lock().reject_webhooks {
            return Err(WebhookError::InvalidSignature.into());
        }
        Ok(parse_webhook(payload)?)
    }
}
