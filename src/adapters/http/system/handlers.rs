//! HTTP handlers for service endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::state::AppState;

use super::dto::{HealthResponse, SurveyScriptResponse};

/// GET /health - Liveness plus a datastore ping
///
/// Answers 503 when the datastore cannot be reached.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    match state.health.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: "ok",
                version,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    database: "unavailable",
                    version,
                }),
            )
        }
    }
}

/// GET /api/survey/script - Questions and agent prompt
pub async fn survey_script() -> impl IntoResponse {
    Json(SurveyScriptResponse::current())
}
