//! Call command and query handlers.

mod get_call;
mod handle_voice_webhook;
mod initiate_batch;
mod initiate_call;
mod process_conversation;
mod sync_conversation;

pub use get_call::{
    CallDetail, GetCallHandler, GetCallQuery, GetTranscriptHandler, GetTranscriptQuery,
    ListCallsHandler, ListCallsQuery,
};
pub use handle_voice_webhook::{
    HandleVoiceWebhookCommand, HandleVoiceWebhookHandler, WebhookDisposition,
};
pub use initiate_batch::{
    BatchCallOutcome, BatchResult, InitiateBatchCommand, InitiateBatchHandler,
};
pub use initiate_call::{InitiateCallCommand, InitiateCallHandler};
pub use process_conversation::{ConversationProcessed, ProcessConversationHandler};
pub use sync_conversation::{SyncConversationCommand, SyncConversationHandler};

#[cfg(test)]
pub(crate) use process_conversation::tests::{outcome, placed_call, stored_customer, survey_transcript};
