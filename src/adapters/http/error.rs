//! API error type shared by every route.
//!
//! Application errors are mapped to an HTTP status and a JSON body of the
//! form `{ "code": ..., "message": ... }`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::adapters::csv::CsvImportError;
use crate::domain::call::CallError;
use crate::domain::customer::CustomerError;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Body message for 5xx responses; details go to the log only.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource, id))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    Customer(CustomerError),
    Call(CallError),
    Domain(DomainError),
    Import(CsvImportError),
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::Customer(CustomerError::Infrastructure(_))
            | ApiError::Call(CallError::Infrastructure(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::internal(INTERNAL_MESSAGE),
            ),
            ApiError::Customer(err) => {
                let status = match err {
                    CustomerError::NotFound(_) => StatusCode::NOT_FOUND,
                    CustomerError::DuplicatePhoneNumber(_) => StatusCode::CONFLICT,
                    CustomerError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
                    CustomerError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                let body = ErrorResponse::new(err.code().to_string(), err.message());
                match err {
                    CustomerError::ValidationFailed { field, .. } => (
                        status,
                        body.with_details(serde_json::json!({ "field": field })),
                    ),
                    _ => (status, body),
                }
            }
            ApiError::Call(err) => {
                let (status, code) = match err {
                    CallError::NotFound(_) | CallError::ConversationNotFound(_) => {
                        (StatusCode::NOT_FOUND, "CALL_NOT_FOUND")
                    }
                    CallError::CustomerNotFound(_) => (StatusCode::NOT_FOUND, "CUSTOMER_NOT_FOUND"),
                    CallError::TranscriptNotFound(_) => {
                        (StatusCode::NOT_FOUND, "TRANSCRIPT_NOT_FOUND")
                    }
                    CallError::InvalidState(_) => (StatusCode::CONFLICT, "INVALID_STATE_TRANSITION"),
                    CallError::InvalidWebhook(_) => {
                        (StatusCode::UNAUTHORIZED, "INVALID_WEBHOOK_SIGNATURE")
                    }
                    CallError::ValidationFailed { .. } => {
                        (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
                    }
                    CallError::Voice(_) => (StatusCode::BAD_GATEWAY, "VOICE_PLATFORM_ERROR"),
                    CallError::Infrastructure(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                    }
                };
                (status, ErrorResponse::new(code, err.message()))
            }
            ApiError::Domain(err) if err.code.is_infrastructure() => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::internal(INTERNAL_MESSAGE),
            ),
            ApiError::Domain(err) => {
                let status = match err.code {
                    ErrorCode::CustomerNotFound
                    | ErrorCode::CallNotFound
                    | ErrorCode::TranscriptNotFound => StatusCode::NOT_FOUND,
                    ErrorCode::DuplicatePhoneNumber | ErrorCode::InvalidStateTransition => {
                        StatusCode::CONFLICT
                    }
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, ErrorResponse::new(err.code.as_str(), err.message.clone()))
            }
            ApiError::Import(err) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("INVALID_CSV", err.to_string()),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg)),
        }
    }
}

impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        ApiError::Customer(err)
    }
}

impl From<CallError> for ApiError {
    fn from(err: CallError) -> Self {
        ApiError::Call(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<CsvImportError> for ApiError {
    fn from(err: CsvImportError) -> Self {
        ApiError::Import(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!(status = %status, code = %body.code, error = ?self, "Request failed");
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CallId, CustomerId};

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn customer_errors_map_to_statuses() {
        assert_eq!(
            status_of(CustomerError::not_found(CustomerId::new())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CustomerError::DuplicatePhoneNumber("+14155550100".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(CustomerError::validation("name", "empty")),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn call_errors_map_to_statuses() {
        assert_eq!(status_of(CallError::not_found(CallId::new())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(CallError::conversation_not_found("conv_1")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CallError::invalid_webhook("bad signature")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(CallError::invalid_state("done")), StatusCode::CONFLICT);
        assert_eq!(
            status_of(CallError::Voice("busy".to_string())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn infrastructure_domain_error_is_internal_and_opaque() {
        let err = ApiError::from(DomainError::database("Failed to list calls", "connection reset"));
        let (status, body) = err.status_and_body();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "INTERNAL_ERROR");
        assert!(!body.message.contains("connection reset"));
    }

    #[test]
    fn domain_error_codes_keep_their_meaning() {
        assert_eq!(
            status_of(DomainError::new(ErrorCode::TranscriptNotFound, "none")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::new(ErrorCode::DuplicatePhoneNumber, "taken")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DomainError::validation("question_number", "out of range")),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn validation_body_names_the_field() {
        let (_, body) = ApiError::from(CustomerError::validation("phone_number", "too short"))
            .status_and_body();
        assert_eq!(body.code, "VALIDATION_FAILED");
        assert_eq!(body.details, Some(serde_json::json!({ "field": "phone_number" })));
    }

    #[test]
    fn error_response_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::not_found("Call", "abc")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert!(json.get("details").is_none());
    }
}
