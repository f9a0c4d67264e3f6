//! HTTP DTOs (Data Transfer Objects) for call endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::call::{CallDetail, ConversationProcessed};
use crate::domain::call::Call;
use crate::domain::foundation::CallStatus;
use crate::domain::survey::{ResponseSource, Sentiment, SurveyResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to call one customer.
#[derive(Debug, Clone, Deserialize)]
pub struct InitiateCallRequest {
    pub customer_id: String,
}

/// Request to call many customers; every customer when `customer_ids` is omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InitiateBatchRequest {
    #[serde(default)]
    pub customer_ids: Option<Vec<String>>,
}

/// Filters for the call list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCallsParams {
    pub status: Option<CallStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One call record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallResponse {
    pub id: String,
    pub customer_id: String,
    pub status: CallStatus,
    pub conversation_id: Option<String>,
    pub call_sid: Option<String>,
    pub duration_secs: Option<u32>,
    pub summary: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub completed_at: Option<String>,
}

impl From<&Call> for CallResponse {
    fn from(call: &Call) -> Self {
        Self {
            id: call.id().to_string(),
            customer_id: call.customer_id().to_string(),
            status: call.status(),
            conversation_id: call.conversation_id().map(|c| c.as_str().to_string()),
            call_sid: call.call_sid().map(str::to_string),
            duration_secs: call.duration_secs(),
            summary: call.summary().map(str::to_string),
            failure_reason: call.failure_reason().map(str::to_string),
            created_at: call.created_at().to_rfc3339(),
            updated_at: call.updated_at().to_rfc3339(),
            completed_at: call.completed_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// One answered question.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyResponseDto {
    pub question_number: u8,
    pub question_text: String,
    pub answer: String,
    pub sentiment: Sentiment,
    pub source: ResponseSource,
}

impl From<&SurveyResponse> for SurveyResponseDto {
    fn from(response: &SurveyResponse) -> Self {
        Self {
            question_number: response.question_number.get(),
            question_text: response.question_text.clone(),
            answer: response.answer.clone(),
            sentiment: response.sentiment,
            source: response.source,
        }
    }
}

/// A call with its answers.
#[derive(Debug, Clone, Serialize)]
pub struct CallDetailResponse {
    #[serde(flatten)]
    pub call: CallResponse,
    pub responses: Vec<SurveyResponseDto>,
}

impl From<CallDetail> for CallDetailResponse {
    fn from(detail: CallDetail) -> Self {
        Self {
            call: CallResponse::from(&detail.call),
            responses: detail.responses.iter().map(SurveyResponseDto::from).collect(),
        }
    }
}

/// A page of calls.
#[derive(Debug, Clone, Serialize)]
pub struct CallListResponse {
    pub calls: Vec<CallResponse>,
    pub count: usize,
}

impl From<Vec<Call>> for CallListResponse {
    fn from(calls: Vec<Call>) -> Self {
        let calls: Vec<CallResponse> = calls.iter().map(CallResponse::from).collect();
        Self {
            count: calls.len(),
            calls,
        }
    }
}

/// Outcome of a manual sync.
#[derive(Debug, Clone, Serialize)]
pub struct SyncResponse {
    /// `recorded` or `already_finished`.
    pub result: &'static str,
    pub responses: usize,
    pub call: CallResponse,
}

impl From<ConversationProcessed> for SyncResponse {
    fn from(processed: ConversationProcessed) -> Self {
        match processed {
            ConversationProcessed::Recorded { call, responses } => Self {
                result: "recorded",
                responses,
                call: CallResponse::from(&call),
            },
            ConversationProcessed::AlreadyFinished(call) => Self {
                result: "already_finished",
                responses: 0,
                call: CallResponse::from(&call),
            },
        }
    }
}
