//! Call query handlers - detail, list and transcript.

use std::sync::Arc;

use crate::domain::call::{Call, CallError};
use crate::domain::foundation::{CallId, CallStatus};
use crate::domain::survey::{SurveyResponse, Transcript};
use crate::ports::{CallRepository, SurveyRepository};

use crate::application::handlers::customer::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Query for one call.
#[derive(Debug, Clone)]
pub struct GetCallQuery {
    pub call_id: CallId,
}

/// A call with its recorded answers.
#[derive(Debug, Clone)]
pub struct CallDetail {
    pub call: Call,
    pub responses: Vec<SurveyResponse>,
}

pub struct GetCallHandler {
    calls: Arc<dyn CallRepository>,
    surveys: Arc<dyn SurveyRepository>,
}

impl GetCallHandler {
    pub fn new(calls: Arc<dyn CallRepository>, surveys: Arc<dyn SurveyRepository>) -> Self {
        Self { calls, surveys }
    }

    pub async fn handle(&self, query: GetCallQuery) -> Result<CallDetail, CallError> {
        let call = self
            .calls
            .find_by_id(query.call_id)
            .await?
            .ok_or_else(|| CallError::not_found(query.call_id))?;
        let responses = self.surveys.responses_for_call(call.id()).await?;
        Ok(CallDetail { call, responses })
    }
}

/// Query for a page of calls, newest first.
#[derive(Debug, Clone, Default)]
pub struct ListCallsQuery {
    pub status: Option<CallStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

pub struct ListCallsHandler {
    calls: Arc<dyn CallRepository>,
}

impl ListCallsHandler {
    pub fn new(calls: Arc<dyn CallRepository>) -> Self {
        Self { calls }
    }

    pub async fn handle(&self, query: ListCallsQuery) -> Result<Vec<Call>, CallError> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = query.offset.unwrap_or(0);
        Ok(self.calls.list(query.status, limit, offset).await?)
    }
}

/// Query for the stored transcript of a call.
#[derive(Debug, Clone)]
pub struct GetTranscriptQuery {
    pub call_id: CallId,
}

pub struct GetTranscriptHandler {
    calls: Arc<dyn CallRepository>,
    surveys: Arc<dyn SurveyRepository>,
}

impl GetTranscriptHandler {
    pub fn new(calls: Arc<dyn CallRepository>, surveys: Arc<dyn SurveyRepository>) -> Self {
        Self { calls, surveys }
    }

    /// # Errors
    ///
    /// - `NotFound` if the call doesn't exist
    /// - `TranscriptNotFound` if the conversation hasn't been recorded yet
    pub async fn handle(&self, query: GetTranscriptQuery) -> Result<Transcript, CallError> {
        if self.calls.find_by_id(query.call_id).await?.is_none() {
            return Err(CallError::not_found(query.call_id));
        }
        self.surveys
            .find_transcript(query.call_id)
            .await?
            .ok_or_else(|| CallError::transcript_not_found(query.call_id))
    }
}
