//! Survey responses derived from a finished conversation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::classifier::attribute_answers;
use super::questions::QuestionNumber;
use super::sentiment::{analyze, Sentiment};
use super::transcript::Transcript;
use crate::domain::foundation::{CallId, ResponseId, Timestamp, ValidationError};

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    /// Extracted by the voice platform's data collection.
    DataCollection,
    /// Attributed by the local transcript classifier.
    Transcript,
}

impl ResponseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseSource::DataCollection => "data_collection",
            ResponseSource::Transcript => "transcript",
        }
    }
}

impl fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseSource {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data_collection" => Ok(ResponseSource::DataCollection),
            "transcript" => Ok(ResponseSource::Transcript),
            other => Err(ValidationError::invalid_format(
                "source",
                format!("unknown response source '{}'", other),
            )),
        }
    }
}

/// The answer to one survey question on one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: ResponseId,
    pub call_id: CallId,
    pub question_number: QuestionNumber,
    pub question_text: String,
    pub answer: String,
    pub sentiment: Sentiment,
    pub source: ResponseSource,
    pub created_at: Timestamp,
}

impl SurveyResponse {
    /// Builds a response, labelling the answer's sentiment.
    pub fn new(
        call_id: CallId,
        question_number: QuestionNumber,
        answer: impl Into<String>,
        source: ResponseSource,
    ) -> Self {
        let answer = answer.into();
        Self {
            id: ResponseId::new(),
            call_id,
            question_number,
            question_text: question_number.question().text.to_string(),
            sentiment: analyze(&answer),
            answer,
            source,
            created_at: Timestamp::now(),
        }
    }
}

/// Builds responses from the platform's `q1`..`q5` data collection map.
///
/// Unknown keys and blank values are ignored.
pub fn responses_from_data_collection(
    call_id: CallId,
    data_collection: &BTreeMap<String, String>,
) -> Vec<SurveyResponse> {
    let mut answers: BTreeMap<QuestionNumber, &str> = BTreeMap::new();
    for (key, value) in data_collection {
        let Some(question) = QuestionNumber::from_data_key(key) else {
            continue;
        };
        let value = value.trim();
        if !value.is_empty() {
            answers.insert(question, value);
        }
    }

    answers
        .into_iter()
        .map(|(q, answer)| SurveyResponse::new(call_id, q, answer, ResponseSource::DataCollection))
        .collect()
}

/// Builds responses by classifying the transcript.
pub fn responses_from_transcript(call_id: CallId, transcript: &Transcript) -> Vec<SurveyResponse> {
    attribute_answers(transcript)
        .into_iter()
        .map(|(q, answer)| SurveyResponse::new(call_id, q, answer, ResponseSource::Transcript))
        .collect()
}

/// Derives the responses for a finished call.
///
/// Data collection results are authoritative: if they yield any answer the
/// transcript classifier is not consulted at all.
pub fn derive_responses(
    call_id: CallId,
    transcript: &Transcript,
    data_collection: &BTreeMap<String, String>,
) -> Vec<SurveyResponse> {
    let collected = responses_from_data_collection(call_id, data_collection);
    if !collected.is_empty() {
        return collected;
    }
    responses_from_transcript(call_id, transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::survey::questions::SURVEY_QUESTIONS;
    use crate::domain::survey::transcript::TranscriptTurn;

    fn transcript() -> Transcript {
        Transcript::new(vec![
            TranscriptTurn::agent(SURVEY_QUESTIONS[0].text),
            TranscriptTurn::user("Honestly the service was terrible."),
            TranscriptTurn::agent(SURVEY_QUESTIONS[1].text),
            TranscriptTurn::user("They were helpful and great."),
        ])
    }

    fn collected(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn data_collection_wins_over_transcript() {
        let call_id = CallId::new();
        let data = collected(&[("q2", "Excellent staff"), ("q5", "No")]);

        let responses = derive_responses(call_id, &transcript(), &data);

        assert_eq!(responses.len(), 2);
        assert!(responses
            .iter()
            .all(|r| r.source == ResponseSource::DataCollection));
        assert_eq!(responses[0].question_number.get(), 2);
        assert_eq!(responses[0].sentiment, Sentiment::Positive);
        assert_eq!(responses[1].question_number.get(), 5);
    }

    #[test]
    fn blank_data_collection_falls_back_to_transcript() {
        let call_id = CallId::new();
        let data = collected(&[("q1", "  "), ("call_reason", "feedback")]);

        let responses = derive_responses(call_id, &transcript(), &data);

        assert_eq!(responses.len(), 2);
        assert!(responses.iter().all(|r| r.source == ResponseSource::Transcript));
        assert_eq!(responses[0].sentiment, Sentiment::Negative);
        assert_eq!(responses[1].sentiment, Sentiment::Positive);
    }

    #[test]
    fn response_carries_question_text() {
        let q = QuestionNumber::new(3).unwrap();
        let response =
            SurveyResponse::new(CallId::new(), q, "Definitely", ResponseSource::Transcript);
        assert_eq!(response.question_text, SURVEY_QUESTIONS[2].text);
        assert_eq!(response.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn empty_inputs_give_no_responses() {
        let responses = derive_responses(CallId::new(), &Transcript::default(), &BTreeMap::new());
        assert!(responses.is_empty());
    }

    #[test]
    fn source_label_round_trips() {
        for source in [ResponseSource::DataCollection, ResponseSource::Transcript] {
            assert_eq!(source.as_str().parse::<ResponseSource>().unwrap(), source);
        }
    }
}
