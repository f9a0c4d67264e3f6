//! Call entity.
//!
//! One record per outbound survey call. The status is updated in place as
//! the voice platform accepts the call and later reports its outcome.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CallId, CallStatus, ConversationId, CustomerId, Timestamp, ValidationError,
};

/// Outbound survey call.
///
/// # Invariants
///
/// - `conversation_id` is set exactly when the platform accepted the call
/// - `completed_at` is set exactly when `status` is terminal
/// - `failure_reason` is only set on failed calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    id: CallId,
    customer_id: CustomerId,
    conversation_id: Option<ConversationId>,
    call_sid: Option<String>,
    status: CallStatus,
    duration_secs: Option<u32>,
    summary: Option<String>,
    failure_reason: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
    completed_at: Option<Timestamp>,
}

impl Call {
    /// Create a pending call for a customer.
    pub fn new(customer_id: CustomerId) -> Self {
        let now = Timestamp::now();
        Self {
            id: CallId::new(),
            customer_id,
            conversation_id: None,
            call_sid: None,
            status: CallStatus::Pending,
            duration_secs: None,
            summary: None,
            failure_reason: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Reconstitute a call from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CallId,
        customer_id: CustomerId,
        conversation_id: Option<ConversationId>,
        call_sid: Option<String>,
        status: CallStatus,
        duration_secs: Option<u32>,
        summary: Option<String>,
        failure_reason: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
        completed_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            customer_id,
            conversation_id,
            call_sid,
            status,
            duration_secs,
            summary,
            failure_reason,
            created_at,
            updated_at,
            completed_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> CallId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn conversation_id(&self) -> Option<&ConversationId> {
        self.conversation_id.as_ref()
    }

    pub fn call_sid(&self) -> Option<&str> {
        self.call_sid.as_deref()
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn duration_secs(&self) -> Option<u32> {
        self.duration_secs
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// The platform accepted the call.
    pub fn mark_placed(
        &mut self,
        conversation_id: ConversationId,
        call_sid: Option<String>,
    ) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(CallStatus::InProgress)?;
        self.conversation_id = Some(conversation_id);
        self.call_sid = call_sid;
        self.touch();
        Ok(())
    }

    /// The conversation finished and its outcome was recorded.
    pub fn mark_completed(
        &mut self,
        duration_secs: Option<u32>,
        summary: Option<String>,
    ) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(CallStatus::Completed)?;
        self.duration_secs = duration_secs;
        self.summary = summary;
        self.finish();
        Ok(())
    }

    /// The call could not be placed or the conversation did not finish.
    pub fn mark_failed(
        &mut self,
        reason: impl Into<String>,
        duration_secs: Option<u32>,
    ) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(CallStatus::Failed)?;
        self.failure_reason = Some(reason.into());
        if duration_secs.is_some() {
            self.duration_secs = duration_secs;
        }
        self.finish();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn finish(&mut self) {
        self.touch();
        self.completed_at = Some(self.updated_at);
    }
}
