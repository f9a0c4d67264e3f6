//! Heuristic mapping of agent speech to survey questions.
//!
//! Triggers are plain substrings checked against the lower-cased utterance
//! in question order; the first question with a matching trigger wins.
//! Questions 3 and 4 are skipped when the utterance also contains a
//! follow-up phrase, since their triggers ("recommend us", "improve") show
//! up naturally in follow-ups to earlier answers.

use std::collections::BTreeMap;

use super::questions::{QuestionNumber, FOLLOW_UP_PHRASES, SURVEY_QUESTIONS};
use super::transcript::{Role, Transcript};

/// Questions whose triggers yield to follow-up phrasing.
const FOLLOW_UP_SENSITIVE: [u8; 2] = [3, 4];

/// Result of classifying one agent utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Question(QuestionNumber),
    Unclassified,
}

/// True if the utterance contains any follow-up phrase (case-insensitive).
pub fn is_follow_up(utterance: &str) -> bool {
    let lowered = utterance.to_lowercase();
    contains_follow_up(&lowered)
}

fn contains_follow_up(lowered: &str) -> bool {
    FOLLOW_UP_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

/// Guesses which question an agent utterance asks.
pub fn classify_utterance(utterance: &str) -> Classification {
    let lowered = utterance.to_lowercase();
    let follow_up = contains_follow_up(&lowered);

    for question in SURVEY_QUESTIONS.iter() {
        if follow_up && FOLLOW_UP_SENSITIVE.contains(&question.number) {
            continue;
        }
        if question.triggers.iter().any(|t| lowered.contains(t)) {
            return Classification::Question(question.number());
        }
    }

    Classification::Unclassified
}

/// Tracks the question currently open while walking a transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionTracker {
    open: Option<QuestionNumber>,
}

impl QuestionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_question(&self) -> Option<QuestionNumber> {
        self.open
    }

    /// Updates the open question from an agent turn.
    ///
    /// A recognised question opens it; an unrecognised follow-up keeps the
    /// current one; anything else closes it.
    pub fn observe_agent(&mut self, utterance: &str) -> Option<QuestionNumber> {
        self.open = match classify_utterance(utterance) {
            Classification::Question(n) => Some(n),
            Classification::Unclassified if is_follow_up(utterance) => self.open,
            Classification::Unclassified => None,
        };
        self.open
    }
}

/// Attributes user speech to questions.
///
/// Multiple user turns for the same question are joined with a space.
/// Questions that received no user speech are absent from the map.
pub fn attribute_answers(transcript: &Transcript) -> BTreeMap<QuestionNumber, String> {
    let mut tracker = QuestionTracker::new();
    let mut answers: BTreeMap<QuestionNumber, String> = BTreeMap::new();

    for turn in transcript.turns().iter().filter(|t| t.has_speech()) {
        match turn.role {
            Role::Agent => {
                tracker.observe_agent(&turn.message);
            }
            Role::User => {
                let Some(question) = tracker.open_question() else {
                    continue;
                };
                let text = turn.message.trim();
                let answer = answers.entry(question).or_default();
                if !answer.is_empty() {
                    answer.push(' ');
                }
                answer.push_str(text);
            }
            Role::Other(_) => {}
        }
    }

    answers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::survey::transcript::TranscriptTurn;

    fn q(n: u8) -> QuestionNumber {
        QuestionNumber::new(n).unwrap()
    }

    #[test]
    fn classifies_each_script_question() {
        for question in SURVEY_QUESTIONS.iter() {
            assert_eq!(
                classify_utterance(question.text),
                Classification::Question(question.number()),
                "{}",
                question.text
            );
        }
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(
            classify_utterance("HOW SATISFIED WERE YOU?"),
            Classification::Question(q(1))
        );
    }

    #[test]
    fn earlier_question_wins_on_overlap() {
        // Mentions both the staff (Q2) and improving (Q4).
        let utterance = "How could our staff improve?";
        assert_eq!(classify_utterance(utterance), Classification::Question(q(2)));
    }

    #[test]
    fn follow_up_suppresses_question_three() {
        let utterance = "Could you tell me more about why you would recommend us?";
        assert_eq!(classify_utterance(utterance), Classification::Unclassified);
    }

    #[test]
    fn follow_up_suppresses_question_four() {
        let utterance = "Why is that? What would you improve?";
        assert_eq!(classify_utterance(utterance), Classification::Unclassified);
    }

    #[test]
    fn follow_up_does_not_suppress_other_questions() {
        let utterance = "Tell me more. Is there anything else you'd like to add?";
        assert_eq!(classify_utterance(utterance), Classification::Question(q(5)));
    }

    #[test]
    fn small_talk_is_unclassified() {
        assert_eq!(
            classify_utterance("Thanks so much for your time today, goodbye!"),
            Classification::Unclassified
        );
    }

    #[test]
    fn follow_up_detection_is_case_insensitive() {
        assert!(is_follow_up("Could You Elaborate on that?"));
        assert!(is_follow_up("what makes you say that"));
        assert!(!is_follow_up("Great, thank you."));
    }

    #[test]
    fn every_follow_up_phrase_suppresses_questions_three_and_four() {
        for phrase in FOLLOW_UP_PHRASES {
            assert!(is_follow_up(phrase), "{}", phrase);
            assert!(is_follow_up(&phrase.to_uppercase()), "{}", phrase);

            for question in [&SURVEY_QUESTIONS[2], &SURVEY_QUESTIONS[3]] {
                let utterance = format!("{}? {}", phrase, question.text);
                assert_eq!(
                    classify_utterance(&utterance),
                    Classification::Unclassified,
                    "{}",
                    utterance
                );
            }
        }
    }

    #[test]
    fn tracker_keeps_question_through_follow_up() {
        let mut tracker = QuestionTracker::new();
        tracker.observe_agent("How likely are you to recommend us to a friend or colleague?");
        assert_eq!(tracker.open_question(), Some(q(3)));

        tracker.observe_agent("Interesting, why is that?");
        assert_eq!(tracker.open_question(), Some(q(3)));

        tracker.observe_agent("Alright, thank you.");
        assert_eq!(tracker.open_question(), None);
    }

    #[test]
    fn attributes_answers_across_follow_ups() {
        let transcript = Transcript::new(vec![
            TranscriptTurn::agent("Hi Ada, do you have two minutes for a quick survey?"),
            TranscriptTurn::user("Sure."),
            TranscriptTurn::agent(SURVEY_QUESTIONS[0].text),
            TranscriptTurn::user("I'd say a nine."),
            TranscriptTurn::agent(SURVEY_QUESTIONS[2].text),
            TranscriptTurn::user("Very likely."),
            TranscriptTurn::agent("Could you tell me more about why you'd recommend us?"),
            TranscriptTurn::user("The support team was great."),
            TranscriptTurn::agent("Thank you, goodbye."),
            TranscriptTurn::user("Bye!"),
        ]);

        let answers = attribute_answers(&transcript);

        assert_eq!(answers.len(), 2);
        assert_eq!(answers[&q(1)], "I'd say a nine.");
        assert_eq!(answers[&q(3)], "Very likely. The support team was great.");
    }

    #[test]
    fn user_speech_before_any_question_is_dropped() {
        let transcript = Transcript::new(vec![
            TranscriptTurn::user("Hello?"),
            TranscriptTurn::agent("Hi, this is Sam."),
            TranscriptTurn::user("Who is this?"),
        ]);
        assert!(attribute_answers(&transcript).is_empty());
    }

    #[test]
    fn blank_user_turns_are_skipped() {
        let transcript = Transcript::new(vec![
            TranscriptTurn::agent(SURVEY_QUESTIONS[4].text),
            TranscriptTurn::user("   "),
        ]);
        assert!(attribute_answers(&transcript).is_empty());
    }

    #[test]
    fn silent_and_system_turns_do_not_move_the_open_question() {
        let mut tool_call = TranscriptTurn::agent("");
        tool_call.tool_calls = Some(serde_json::json!([{"tool_name": "lookup_order"}]));
        let transcript = Transcript::new(vec![
            TranscriptTurn::agent(SURVEY_QUESTIONS[3].text),
            tool_call,
            TranscriptTurn {
                role: Role::Other("system".to_string()),
                message: "Caller is on hold".to_string(),
                time_in_call_secs: None,
                tool_calls: None,
            },
            TranscriptTurn::user("Answer the phone faster."),
        ]);

        let answers = attribute_answers(&transcript);

        assert_eq!(answers[&q(4)], "Answer the phone faster.");
    }
}
