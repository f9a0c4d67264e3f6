//! Reporting query handlers.

mod export_responses;
mod get_question_stats;
mod get_summary;

pub use export_responses::ExportResponsesHandler;
pub use get_question_stats::GetQuestionStatsHandler;
pub use get_summary::{GetSummaryHandler, SummaryReport};
