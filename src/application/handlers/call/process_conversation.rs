//! ProcessConversationHandler - Records a finished conversation.
//!
//! Shared by the webhook receiver and manual sync. The transcript is stored,
//! responses are derived and replaced, then the call is closed.

use std::sync::Arc;

use crate::domain::call::{Call, CallError};
use crate::domain::survey::derive_responses;
use crate::ports::{CallRepository, ConversationOutcome, ConversationStatus, SurveyRepository};

/// What happened to a conversation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationProcessed {
    /// Outcome stored and the call closed.
    Recorded { call: Call, responses: usize },
    /// The call was already terminal; nothing changed.
    AlreadyFinished(Call),
}

impl ConversationProcessed {
    pub fn call(&self) -> &Call {
        match self {
            ConversationProcessed::Recorded { call, .. } => call,
            ConversationProcessed::AlreadyFinished(call) => call,
        }
    }
}

/// Handler that applies a conversation outcome to its call.
pub struct ProcessConversationHandler {
    calls: Arc<dyn CallRepository>,
    surveys: Arc<dyn SurveyRepository>,
}

impl ProcessConversationHandler {
    pub fn new(calls: Arc<dyn CallRepository>, surveys: Arc<dyn SurveyRepository>) -> Self {
        Self { calls, surveys }
    }

    /// Applies `outcome` to the call that owns its conversation.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if no call carries the conversation id
    pub async fn handle(
        &self,
        outcome: ConversationOutcome,
    ) -> Result<ConversationProcessed, CallError> {
        let mut call = self
            .calls
            .find_by_conversation_id(&outcome.conversation_id)
            .await?
            .ok_or_else(|| CallError::conversation_not_found(outcome.conversation_id.as_str()))?;

        if call.status().is_terminal() {
            tracing::info!(
                call_id = %call.id(),
                status = %call.status(),
                "Conversation already recorded, ignoring"
            );
            return Ok(ConversationProcessed::AlreadyFinished(call));
        }

        self.surveys
            .save_transcript(call.id(), &outcome.transcript)
            .await?;

        let responses = derive_responses(call.id(), &outcome.transcript, &outcome.data_collection);
        self.surveys.replace_responses(call.id(), &responses).await?;

        match &outcome.status {
            ConversationStatus::Done => {
                call.mark_completed(outcome.duration_secs, outcome.summary.clone())?;
            }
            ConversationStatus::Failed => {
                call.mark_failed("conversation failed", outcome.duration_secs)?;
            }
            ConversationStatus::Ongoing(status) => {
                call.mark_failed(
                    format!("conversation ended with status '{}'", status),
                    outcome.duration_secs,
                )?;
            }
        }
        self.calls.update(&call).await?;

        tracing::info!(
            call_id = %call.id(),
            status = %call.status(),
            responses = responses.len(),
            turns = outcome.transcript.len(),
            "Conversation recorded"
        );
        Ok(ConversationProcessed::Recorded {
            call,
            responses: responses.len(),
        })
    }
}
