//! HTTP handlers for call endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::customers::handlers::parse_customer_id;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::call::{
    GetCallQuery, GetTranscriptQuery, InitiateBatchCommand, InitiateCallCommand, ListCallsQuery,
    SyncConversationCommand,
};
use crate::domain::foundation::CallId;

use super::dto::{
    CallDetailResponse, CallListResponse, CallResponse, InitiateBatchRequest,
    InitiateCallRequest, ListCallsParams, SyncResponse,
};

/// POST /api/calls - Call one customer
pub async fn initiate_call(
    State(state): State<AppState>,
    request: Result<Json<InitiateCallRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = request?;
    let customer_id = parse_customer_id(&request.customer_id)?;
    let call = state
        .initiate_call_handler()
        .handle(InitiateCallCommand { customer_id })
        .await?;
    Ok((StatusCode::CREATED, Json(CallResponse::from(&call))))
}

/// POST /api/calls/batch - Call many customers in paced chunks
///
/// Per-customer failures are reported in the result, not as an error status.
pub async fn initiate_batch(
    State(state): State<AppState>,
    request: Result<Json<InitiateBatchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = request?;
    let customer_ids = request
        .customer_ids
        .map(|ids| {
            ids.iter()
                .map(|id| parse_customer_id(id))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let result = state
        .initiate_batch_handler()
        .handle(InitiateBatchCommand { customer_ids })
        .await?;
    Ok(Json(result))
}

/// GET /api/calls - Calls, newest first, optionally filtered by status
pub async fn list_calls(
    State(state): State<AppState>,
    params: Result<Query<ListCallsParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let calls = state
        .list_calls_handler()
        .handle(ListCallsQuery {
            status: params.status,
            limit: params.limit,
            offset: params.offset,
        })
        .await?;
    Ok(Json(CallListResponse::from(calls)))
}

/// GET /api/calls/:id - A call with its answers
pub async fn get_call(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let call_id = parse_call_id(&id)?;
    let detail = state
        .get_call_handler()
        .handle(GetCallQuery { call_id })
        .await?;
    Ok(Json(CallDetailResponse::from(detail)))
}

/// GET /api/calls/:id/transcript - The stored transcript
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let call_id = parse_call_id(&id)?;
    let transcript = state
        .get_transcript_handler()
        .handle(GetTranscriptQuery { call_id })
        .await?;
    Ok(Json(transcript))
}

/// POST /api/calls/:id/sync - Pull the conversation from the voice platform
pub async fn sync_call(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let call_id = parse_call_id(&id)?;
    let processed = state
        .sync_conversation_handler()
        .handle(SyncConversationCommand { call_id })
        .await?;
    Ok(Json(SyncResponse::from(processed)))
}

fn parse_call_id(raw: &str) -> Result<CallId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid call id: {}", raw)))
}
