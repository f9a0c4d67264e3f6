//! Call repository port.
//!
//! Calls are created `pending`, then updated in place as the voice
//! platform reports progress.

use crate::domain::call::Call;
use crate::domain::foundation::{CallId, CallStatus, ConversationId, CustomerId, DomainError};
use async_trait::async_trait;

/// Repository port for Call persistence.
#[async_trait]
pub trait CallRepository: Send + Sync {
    /// Save a new call.
    async fn save(&self, call: &Call) -> Result<(), DomainError>;

    /// Update an existing call.
    ///
    /// # Errors
    ///
    /// - `CallNotFound` if the call doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, call: &Call) -> Result<(), DomainError>;

    /// Find a call by ID.
    async fn find_by_id(&self, id: CallId) -> Result<Option<Call>, DomainError>;

    /// Find the call placed for a vendor conversation.
    async fn find_by_conversation_id(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<Call>, DomainError>;

    /// List calls newest first, optionally filtered by status.
    async fn list(
        &self,
        status: Option<CallStatus>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Call>, DomainError>;

    /// All calls placed to one customer, newest first.
    async fn list_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Call>, DomainError>;
}
