//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::call::{
    GetCallHandler, GetTranscriptHandler, HandleVoiceWebhookHandler, InitiateBatchHandler,
    InitiateCallHandler, ListCallsHandler, SyncConversationHandler,
};
use crate::application::handlers::customer::{
    CreateCustomerHandler, DeleteCustomerHandler, GetCustomerHandler, ImportCustomersHandler,
    ListCustomersHandler,
};
use crate::application::handlers::report::{
    ExportResponsesHandler, GetQuestionStatsHandler, GetSummaryHandler,
};
use crate::config::BatchConfig;
use crate::ports::{
    CallRepository, CustomerRepository, HealthCheck, ReportReader, SurveyRepository,
    VoiceProvider,
};

/// Dependencies shared by every request.
///
/// Cloned per request; handlers are built on demand from the ports.
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerRepository>,
    pub calls: Arc<dyn CallRepository>,
    pub surveys: Arc<dyn SurveyRepository>,
    pub reports: Arc<dyn ReportReader>,
    pub voice: Arc<dyn VoiceProvider>,
    pub health: Arc<dyn HealthCheck>,
    pub batch: BatchConfig,
}

impl AppState {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        calls: Arc<dyn CallRepository>,
        surveys: Arc<dyn SurveyRepository>,
        reports: Arc<dyn ReportReader>,
        voice: Arc<dyn VoiceProvider>,
        health: Arc<dyn HealthCheck>,
        batch: BatchConfig,
    ) -> Self {
        Self {
            customers,
            calls,
            surveys,
            reports,
            voice,
            health,
            batch,
        }
    }

    pub fn list_customers_handler(&self) -> ListCustomersHandler {
        ListCustomersHandler::new(self.customers.clone())
    }

    pub fn create_customer_handler(&self) -> CreateCustomerHandler {
        CreateCustomerHandler::new(self.customers.clone())
    }

    pub fn get_customer_handler(&self) -> GetCustomerHandler {
        GetCustomerHandler::new(self.customers.clone(), self.calls.clone())
    }

    pub fn delete_customer_handler(&self) -> DeleteCustomerHandler {
        DeleteCustomerHandler::new(self.customers.clone())
    }

    pub fn import_customers_handler(&self) -> ImportCustomersHandler {
        ImportCustomersHandler::new(self.customers.clone())
    }

    pub fn initiate_call_handler(&self) -> InitiateCallHandler {
        InitiateCallHandler::new(self.customers.clone(), self.calls.clone(), self.voice.clone())
    }

    pub fn initiate_batch_handler(&self) -> InitiateBatchHandler {
        InitiateBatchHandler::new(
            self.customers.clone(),
            self.calls.clone(),
            self.voice.clone(),
            &self.batch,
        )
    }

    pub fn list_calls_handler(&self) -> ListCallsHandler {
        ListCallsHandler::new(self.calls.clone())
    }

    pub fn get_call_handler(&self) -> GetCallHandler {
        GetCallHandler::new(self.calls.clone(), self.surveys.clone())
    }

    pub fn get_transcript_handler(&self) -> GetTranscriptHandler {
        GetTranscriptHandler::new(self.calls.clone(), self.surveys.clone())
    }

    pub fn sync_conversation_handler(&self) -> SyncConversationHandler {
        SyncConversationHandler::new(self.calls.clone(), self.surveys.clone(), self.voice.clone())
    }

    pub fn voice_webhook_handler(&self) -> HandleVoiceWebhookHandler {
        HandleVoiceWebhookHandler::new(self.voice.clone(), self.calls.clone(), self.surveys.clone())
    }

    pub fn summary_handler(&self) -> GetSummaryHandler {
        GetSummaryHandler::new(self.reports.clone())
    }

    pub fn question_stats_handler(&self) -> GetQuestionStatsHandler {
        GetQuestionStatsHandler::new(self.reports.clone())
    }

    pub fn export_responses_handler(&self) -> ExportResponsesHandler {
        ExportResponsesHandler::new(self.reports.clone())
    }
}
