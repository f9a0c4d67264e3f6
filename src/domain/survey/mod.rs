//! Survey module - the script, the transcript classifier and sentiment.
//!
//! - `questions` - the five fixed questions and the agent prompt
//! - `classifier` - substring heuristics mapping agent speech to questions
//! - `sentiment` - positive/negative keyword counting
//! - `response` - turning a finished conversation into stored answers

mod classifier;
mod questions;
mod response;
mod sentiment;
mod transcript;

pub use classifier::{
    attribute_answers, classify_utterance, is_follow_up, Classification, QuestionTracker,
};
pub use questions::{
    render_prompt, QuestionNumber, SurveyQuestion, AGENT_PROMPT, FIRST_MESSAGE,
    FOLLOW_UP_PHRASES, QUESTION_COUNT, SURVEY_QUESTIONS,
};
pub use response::{
    derive_responses, responses_from_data_collection, responses_from_transcript,
    ResponseSource, SurveyResponse,
};
pub use sentiment::{analyze, count_keywords, KeywordCounts, Sentiment, NEGATIVE_WORDS, POSITIVE_WORDS};
pub use transcript::{Role, Transcript, TranscriptTurn};
