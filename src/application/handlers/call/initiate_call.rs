//! InitiateCallHandler - Command handler for placing one survey call.
//!
//! The call row is written `pending` before the platform is contacted, so a
//! crash mid-request still leaves a trace. The platform's answer moves it to
//! `in_progress` or `failed`.

use std::sync::Arc;

use crate::domain::call::{Call, CallError};
use crate::domain::customer::Customer;
use crate::domain::foundation::CustomerId;
use crate::domain::survey::{render_prompt, AGENT_PROMPT, FIRST_MESSAGE};
use crate::ports::{CallRepository, CustomerRepository, OutboundCallRequest, VoiceProvider};

/// Command to call one customer.
#[derive(Debug, Clone)]
pub struct InitiateCallCommand {
    pub customer_id: CustomerId,
}

/// Handler for placing survey calls.
pub struct InitiateCallHandler {
    customers: Arc<dyn CustomerRepository>,
    calls: Arc<dyn CallRepository>,
    voice: Arc<dyn VoiceProvider>,
}

impl InitiateCallHandler {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        calls: Arc<dyn CallRepository>,
        voice: Arc<dyn VoiceProvider>,
    ) -> Self {
        Self {
            customers,
            calls,
            voice,
        }
    }

    /// Places the call.
    ///
    /// # Errors
    ///
    /// - `CustomerNotFound` if the customer doesn't exist
    /// - `Voice` if the platform refused; the call is stored as `failed`
    pub async fn handle(&self, cmd: InitiateCallCommand) -> Result<Call, CallError> {
        self.attempt(cmd.customer_id)
            .await
            .map_err(|failed| failed.error)
    }

    /// Places the call, keeping the stored record when the attempt fails.
    pub(crate) async fn attempt(&self, customer_id: CustomerId) -> Result<Call, FailedAttempt> {
        let customer = self
            .customers
            .find_by_id(customer_id)
            .await
            .map_err(|e| FailedAttempt::before_save(e.into()))?
            .ok_or_else(|| FailedAttempt::before_save(CallError::customer_not_found(customer_id)))?;

        let mut call = Call::new(customer.id());
        self.calls
            .save(&call)
            .await
            .map_err(|e| FailedAttempt::before_save(e.into()))?;

        match self.voice.place_call(outbound_request(&customer)).await {
            Ok(placed) => {
                call.mark_placed(placed.conversation_id, placed.call_sid)
                    .map_err(|e| FailedAttempt::after_save(&call, e.into()))?;
                self.calls
                    .update(&call)
                    .await
                    .map_err(|e| FailedAttempt::after_save(&call, e.into()))?;
                tracing::info!(
                    call_id = %call.id(),
                    customer_id = %customer.id(),
                    "Survey call placed"
                );
                Ok(call)
            }
            Err(err) => {
                let reason = err.to_string();
                tracing::warn!(
                    call_id = %call.id(),
                    customer_id = %customer.id(),
                    error = %reason,
                    "Voice platform refused call"
                );
                call.mark_failed(reason, None)
                    .map_err(|e| FailedAttempt::after_save(&call, e.into()))?;
                self.calls
                    .update(&call)
                    .await
                    .map_err(|e| FailedAttempt::after_save(&call, e.into()))?;
                Err(FailedAttempt::after_save(&call, err.into()))
            }
        }
    }
}

/// A call attempt that did not reach the platform successfully.
#[derive(Debug)]
pub(crate) struct FailedAttempt {
    /// The stored call, if one was written before the failure.
    pub call: Option<Call>,
    pub error: CallError,
}

impl FailedAttempt {
    fn before_save(error: CallError) -> Self {
        Self { call: None, error }
    }

    fn after_save(call: &Call, error: CallError) -> Self {
        Self {
            call: Some(call.clone()),
            error,
        }
    }
}

/// Builds the platform request with the survey script personalised.
fn outbound_request(customer: &Customer) -> OutboundCallRequest {
    let name = customer.first_name();
    OutboundCallRequest {
        to_number: customer.phone_number().to_string(),
        customer_name: name.to_string(),
        prompt: render_prompt(AGENT_PROMPT, name),
        first_message: render_prompt(FIRST_MESSAGE, name),
    }
}
