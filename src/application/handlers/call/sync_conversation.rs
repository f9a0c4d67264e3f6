//! SyncConversationHandler - Pulls a conversation from the voice platform.
//!
//! Recovers calls whose webhook never arrived. The fetched conversation goes
//! through the same processing as a webhook delivery.

use std::sync::Arc;

use super::process_conversation::{ConversationProcessed, ProcessConversationHandler};
use crate::domain::call::CallError;
use crate::domain::foundation::CallId;
use crate::ports::{CallRepository, SurveyRepository, VoiceProvider};

/// Command to sync one call.
#[derive(Debug, Clone)]
pub struct SyncConversationCommand {
    pub call_id: CallId,
}

/// Handler for manual conversation sync.
pub struct SyncConversationHandler {
    calls: Arc<dyn CallRepository>,
    voice: Arc<dyn VoiceProvider>,
    processor: ProcessConversationHandler,
}

impl SyncConversationHandler {
    pub fn new(
        calls: Arc<dyn CallRepository>,
        surveys: Arc<dyn SurveyRepository>,
        voice: Arc<dyn VoiceProvider>,
    ) -> Self {
        Self {
            processor: ProcessConversationHandler::new(calls.clone(), surveys),
            calls,
            voice,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if the call doesn't exist
    /// - `InvalidState` if the call was never placed or the conversation
    ///   is still running
    /// - `Voice` if the platform lookup fails
    pub async fn handle(
        &self,
        cmd: SyncConversationCommand,
    ) -> Result<ConversationProcessed, CallError> {
        let call = self
            .calls
            .find_by_id(cmd.call_id)
            .await?
            .ok_or_else(|| CallError::not_found(cmd.call_id))?;

        let conversation_id = call
            .conversation_id()
            .cloned()
            .ok_or_else(|| CallError::invalid_state("call has no conversation to sync"))?;

        let outcome = self.voice.get_conversation(&conversation_id).await?;
        if !outcome.status.is_finished() {
            return Err(CallError::invalid_state(
                "conversation is still in progress",
            ));
        }

        tracing::info!(
            call_id = %call.id(),
            conversation_id = %conversation_id,
            "Syncing conversation from voice platform"
        );
        self.processor.handle(outcome).await
    }
}
