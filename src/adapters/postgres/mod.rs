//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresCustomerRepository` - The call list
//! - `PostgresCallRepository` - Call records
//! - `PostgresSurveyRepository` - Transcripts (JSONB) and responses
//! - `PostgresReportReader` - Aggregates for reporting and export
//! - `PostgresHealthCheck` - Liveness check

mod call_repository;
mod customer_repository;
mod health_check;
mod report_reader;
mod survey_repository;

pub use call_repository::PostgresCallRepository;
pub use customer_repository::PostgresCustomerRepository;
pub use health_check::PostgresHealthCheck;
pub use report_reader::PostgresReportReader;
pub use survey_repository::PostgresSurveyRepository;
