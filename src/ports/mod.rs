//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `CustomerRepository` - The call list
//! - `CallRepository` - Call records and their status
//! - `SurveyRepository` - Transcripts and derived responses
//! - `ReportReader` - Read-side aggregates for reporting and export
//! - `HealthCheck` - Datastore liveness
//!
//! ## External Service Ports
//!
//! - `VoiceProvider` - Outbound calls, conversation lookup, webhook verification

mod call_repository;
mod customer_repository;
mod health_check;
mod report_reader;
mod survey_repository;
mod voice_provider;

pub use call_repository::CallRepository;
pub use customer_repository::CustomerRepository;
pub use health_check::HealthCheck;
pub use report_reader::{
    QuestionStats, ReportReader, ResponseExportRow, StatusCounts, SurveySummary,
};
pub use survey_repository::SurveyRepository;
pub use voice_provider::{
    ConversationOutcome, ConversationStatus, OutboundCallRequest, PlacedCall, VoiceError,
    VoiceProvider, WebhookEvent,
};
