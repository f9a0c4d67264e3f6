//! HTTP handlers for report endpoints.

use axum::extract::{Json, State};
use axum::http::header;
use axum::response::IntoResponse;

use crate::adapters::csv::write_responses;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::domain::foundation::{DomainError, ErrorCode};

use super::dto::QuestionStatsResponse;

pub const EXPORT_FILENAME: &str = "survey_responses.csv";

/// GET /api/reports/summary - Headline counts and completion rate
pub async fn get_summary(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let report = state.summary_handler().handle().await?;
    Ok(Json(report))
}

/// GET /api/reports/questions - Response counts and sentiment per question
pub async fn get_question_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let questions = state.question_stats_handler().handle().await?;
    Ok(Json(QuestionStatsResponse { questions }))
}

/// GET /api/reports/responses.csv - Every response as CSV
pub async fn export_responses(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state.export_responses_handler().handle().await?;
    let csv = write_responses(&rows).map_err(|e| {
        DomainError::new(ErrorCode::InternalError, format!("Failed to render CSV: {}", e))
    })?;

    tracing::debug!(rows = rows.len(), "Exported survey responses");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        csv,
    ))
}
