//! Route configuration for report endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{export_responses, get_question_stats, get_summary};
use crate::adapters::http::state::AppState;

/// Creates the report router.
///
/// Routes:
/// - `GET /api/reports/summary` - Counts, status breakdown, completion rate
/// - `GET /api/reports/questions` - Per-question sentiment breakdown
/// - `GET /api/reports/responses.csv` - CSV export
pub fn report_router() -> Router<AppState> {
    Router::new()
        .route("/api/reports/summary", get(get_summary))
        .route("/api/reports/questions", get(get_question_stats))
        .route("/api/reports/responses.csv", get(export_responses))
}
