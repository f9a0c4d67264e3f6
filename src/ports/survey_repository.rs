//! Survey repository port - transcripts and derived responses.

use crate::domain::foundation::{CallId, DomainError};
use crate::domain::survey::{SurveyResponse, Transcript};
use async_trait::async_trait;

/// Repository port for the results of a finished conversation.
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Store the transcript for a call, replacing any earlier copy.
    async fn save_transcript(
        &self,
        call_id: CallId,
        transcript: &Transcript,
    ) -> Result<(), DomainError>;

    /// Load the stored transcript for a call.
    async fn find_transcript(&self, call_id: CallId) -> Result<Option<Transcript>, DomainError>;

    /// Replace every response of a call with `responses`.
    ///
    /// Keeps at most one response per (call, question).
    async fn replace_responses(
        &self,
        call_id: CallId,
        responses: &[SurveyResponse],
    ) -> Result<(), DomainError>;

    /// Responses of one call ordered by question number.
    async fn responses_for_call(&self, call_id: CallId) -> Result<Vec<SurveyResponse>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survey_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SurveyRepository) {}
    }
}
