//! HTTP DTOs for service endpoints.

use serde::Serialize;

use crate::domain::survey::{SurveyQuestion, AGENT_PROMPT, FIRST_MESSAGE, SURVEY_QUESTIONS};

/// Liveness check body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: &'static str,
    /// `ok` or `unavailable`.
    pub database: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionDto {
    pub number: u8,
    pub text: &'static str,
}

impl From<&SurveyQuestion> for QuestionDto {
    fn from(question: &SurveyQuestion) -> Self {
        Self {
            number: question.number,
            text: question.text,
        }
    }
}

/// The script the voice agent follows.
///
/// `{{customer_name}}` placeholders are filled per call.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyScriptResponse {
    pub questions: Vec<QuestionDto>,
    pub first_message: &'static str,
    pub agent_prompt: &'static str,
}

impl SurveyScriptResponse {
    pub fn current() -> Self {
        Self {
            questions: SURVEY_QUESTIONS.iter().map(QuestionDto::from).collect(),
            first_message: FIRST_MESSAGE,
            agent_prompt: AGENT_PROMPT,
        }
    }
}
