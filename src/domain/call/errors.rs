//! Call-specific error types.

use crate::domain::foundation::{CallId, CustomerId, DomainError, ErrorCode, ValidationError};
use crate::ports::VoiceError;

/// Call-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// Call was not found.
    NotFound(CallId),
    /// No call is linked to this vendor conversation.
    ConversationNotFound(String),
    /// The customer to dial does not exist.
    CustomerNotFound(CustomerId),
    /// No transcript has been stored for the call yet.
    TranscriptNotFound(CallId),
    /// Call is not in a state that allows the operation.
    InvalidState(String),
    /// Webhook signature or payload was rejected.
    InvalidWebhook(String),
    /// The voice platform refused or failed the request.
    Voice(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl CallError {
    pub fn not_found(id: CallId) -> Self {
        CallError::NotFound(id)
    }
    pub fn conversation_not_found(conversation_id: impl Into<String>) -> Self {
        CallError::ConversationNotFound(conversation_id.into())
    }
    pub fn customer_not_found(id: CustomerId) -> Self {
        CallError::CustomerNotFound(id)
    }
    pub fn transcript_not_found(id: CallId) -> Self {
        CallError::TranscriptNotFound(id)
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        CallError::InvalidState(message.into())
    }
    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        CallError::InvalidWebhook(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CallError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CallError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            CallError::NotFound(_) | CallError::ConversationNotFound(_) => ErrorCode::CallNotFound,
            CallError::CustomerNotFound(_) => ErrorCode::CustomerNotFound,
            CallError::TranscriptNotFound(_) => ErrorCode::TranscriptNotFound,
            CallError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            CallError::InvalidWebhook(_) | CallError::ValidationFailed { .. } => {
                ErrorCode::ValidationFailed
            }
            CallError::Voice(_) => ErrorCode::InternalError,
            CallError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            CallError::NotFound(id) => format!("Call not found: {}", id),
            CallError::ConversationNotFound(conv) => {
                format!("No call found for conversation {}", conv)
            }
            CallError::CustomerNotFound(id) => format!("Customer not found: {}", id),
            CallError::TranscriptNotFound(id) => format!("No transcript stored for call {}", id),
            CallError::InvalidState(msg) => format!("Invalid state: {}", msg),
            CallError::InvalidWebhook(msg) => format!("Invalid webhook: {}", msg),
            CallError::Voice(msg) => format!("Voice platform error: {}", msg),
            CallError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CallError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CallError {}

impl From<DomainError> for CallError {
    fn from(err: DomainError) -> Self {
        CallError::infrastructure(err.to_string())
    }
}

impl From<ValidationError> for CallError {
    fn from(err: ValidationError) -> Self {
        if err.field() == "status" {
            CallError::invalid_state(err.to_string())
        } else {
            CallError::validation(err.field().to_string(), err.to_string())
        }
    }
}

impl From<VoiceError> for CallError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::InvalidWebhook(e) if e.is_authentication_failure() => {
                CallError::invalid_webhook(e.to_string())
            }
            VoiceError::InvalidWebhook(e) => CallError::validation("payload", e.to_string()),
            other => CallError::Voice(other.to_string()),
        }
    }
}
