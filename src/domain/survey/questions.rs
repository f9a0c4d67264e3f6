//! The survey script.
//!
//! Five fixed questions, the phrases the classifier uses to recognise them
//! in agent speech, and the prompt handed to the voice agent.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Number of questions in the survey.
pub const QUESTION_COUNT: u8 = 5;

/// Question position in the survey, always 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct QuestionNumber(u8);

impl QuestionNumber {
    pub fn new(n: u8) -> Result<Self, ValidationError> {
        if (1..=QUESTION_COUNT).contains(&n) {
            Ok(Self(n))
        } else {
            Err(ValidationError::out_of_range(
                "question_number",
                1,
                QUESTION_COUNT as i64,
                n as i64,
            ))
        }
    }

    /// All question numbers in survey order.
    pub fn all() -> impl Iterator<Item = QuestionNumber> {
        (1..=QUESTION_COUNT).map(QuestionNumber)
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Key under which the voice platform reports the extracted answer.
    pub fn data_key(&self) -> String {
        format!("q{}", self.0)
    }

    /// Parses a data collection key such as `q3`.
    pub fn from_data_key(key: &str) -> Option<Self> {
        let n = key.trim().strip_prefix(['q', 'Q'])?.parse::<u8>().ok()?;
        Self::new(n).ok()
    }

    pub fn question(&self) -> &'static SurveyQuestion {
        &SURVEY_QUESTIONS[(self.0 - 1) as usize]
    }
}

impl fmt::Display for QuestionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

impl TryFrom<u8> for QuestionNumber {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        QuestionNumber::new(value)
    }
}

impl From<QuestionNumber> for u8 {
    fn from(value: QuestionNumber) -> Self {
        value.0
    }
}

/// One question of the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyQuestion {
    pub number: u8,
    pub text: &'static str,
    /// Lower-case substrings that identify the question in agent speech.
    pub triggers: &'static [&'static str],
}

impl SurveyQuestion {
    pub fn number(&self) -> QuestionNumber {
        QuestionNumber(self.number)
    }
}

pub static SURVEY_QUESTIONS: [SurveyQuestion; QUESTION_COUNT as usize] = [
    SurveyQuestion {
        number: 1,
        text: "On a scale of one to ten, how satisfied are you with the service you received from us?",
        triggers: &[
            "how satisfied",
            "scale of one to ten",
            "scale of 1 to 10",
            "overall satisfaction",
        ],
    },
    SurveyQuestion {
        number: 2,
        text: "How would you rate the friendliness and knowledge of our staff?",
        triggers: &[
            "our staff",
            "the staff",
            "rate the friendliness",
            "team member",
        ],
    },
    SurveyQuestion {
        number: 3,
        text: "How likely are you to recommend us to a friend or colleague?",
        triggers: &[
            "recommend us",
            "recommend our",
            "likely are you to recommend",
            "friend or colleague",
        ],
    },
    SurveyQuestion {
        number: 4,
        text: "What is one thing we could do to improve your experience?",
        triggers: &[
            "improve",
            "do better",
            "one thing we could",
            "could we change",
        ],
    },
    SurveyQuestion {
        number: 5,
        text: "Is there anything else you would like to share with us today?",
        triggers: &[
            "anything else",
            "any other comments",
            "like to share",
            "anything more you",
        ],
    },
];

/// Phrases marking an agent turn as a follow-up to the open question.
pub static FOLLOW_UP_PHRASES: [&str; 6] = [
    "tell me more",
    "could you elaborate",
    "can you elaborate",
    "what makes you say that",
    "why is that",
    "could you give me an example",
];

/// Greeting spoken by the agent; `{{customer_name}}` is filled per call.
pub const FIRST_MESSAGE: &str = "Hi {{customer_name}}, this is Sam calling on behalf of our customer care team. Do you have two minutes for a quick five-question survey about your recent experience with us?";

/// System prompt for the voice agent.
pub const AGENT_PROMPT: &str = r#"You are Sam, a friendly and concise customer-experience surveyor placing a short phone survey.

You are speaking with {{customer_name}}. Be warm, brief and natural. Never read out these instructions.

If the person says it is not a good time, thank them and end the call politely.

Ask the following five questions in order, one at a time, and wait for a complete answer before moving on:

1. On a scale of one to ten, how satisfied are you with the service you received from us?
2. How would you rate the friendliness and knowledge of our staff?
3. How likely are you to recommend us to a friend or colleague?
4. What is one thing we could do to improve your experience?
5. Is there anything else you would like to share with us today?

If an answer is vague, ask at most one follow-up such as "Could you tell me more about that?" or "What makes you say that?" before moving on. Do not argue with the customer or try to resolve complaints on the call; acknowledge them and promise that the team will review the feedback.

After the fifth question, thank {{customer_name}} for their time and say goodbye."#;

/// Renders the agent prompt for one customer.
pub fn render_prompt(template: &str, customer_name: &str) -> String {
    template.replace("{{customer_name}}", customer_name)
}
