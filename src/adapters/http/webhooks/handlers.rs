//! HTTP handler for the post-call webhook.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::call::HandleVoiceWebhookCommand;
use crate::domain::webhook::SIGNATURE_HEADER;

use super::dto::WebhookAck;

/// POST /api/webhooks/voice - Signed post-call delivery
pub async fn handle_voice_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let disposition = state
        .voice_webhook_handler()
        .handle(HandleVoiceWebhookCommand {
            payload: body.to_vec(),
            signature,
        })
        .await?;

    Ok(Json(WebhookAck::from(disposition)))
}
